//! Show the cart, apply discounts and take payment.

use anyhow::{bail, Context as _, Result};
use cartwright_commerce::cart::{Cart, ItemUpdate};
use cartwright_commerce::money::Money;
use cartwright_commerce::payment::{Credentials, PaymentMethod};
use cartwright_commerce::CommerceError;
use dialoguer::{Confirm, Input, Password};

use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.config.discount_catalog()?;
    let mut cart = ctx.config.cart()?;

    apply_edits(&mut cart, &args, ctx)?;

    for code in &args.discounts {
        match cart.apply_discount(code, &catalog) {
            Ok(()) => ctx.output.debug(&format!("Applied discount {}", code)),
            // Unknown codes are reported and skipped.
            Err(CommerceError::InvalidDiscountCode(code)) => {
                ctx.output.warn(&format!("Discount code '{}' is not valid!", code))
            }
            Err(e) => return Err(e.into()),
        }
    }

    let pricing = cart.calculate_pricing()?;
    if ctx.output.is_json() && args.no_pay {
        ctx.output.json(&pricing);
    } else {
        ctx.output.block(&pricing.to_string());
    }
    if pricing.is_over_discounted() {
        ctx.output.warn("Discounts exceed the subtotal; the total is negative");
    }

    if args.no_pay {
        return Ok(());
    }

    let method = match &args.method {
        Some(key) => key.parse::<PaymentMethod>()?,
        None if ctx.output.is_json() => bail!("--method is required with --json"),
        None => request_payment_method(ctx)?,
    };

    let credentials = collect_credentials(method, &args, ctx)?;
    let mut handler = method.handler(&credentials)?;
    if let Some(api_key) = &ctx.config.payment.api_key {
        handler.set_api_key(api_key);
    }

    if !confirm_payment(pricing.grand_total, args.yes, ctx)? {
        ctx.output.warn("Payment cancelled");
        return Ok(());
    }

    let spinner = ctx.output.spinner("Processing payment...");
    let receipt = handler.process_payment(pricing.grand_total);
    spinner.finish_and_clear();
    let receipt = receipt.with_context(|| format!("{} payment failed", method.display_name()))?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "pricing": pricing,
            "receipt": receipt,
        }));
    } else {
        ctx.output.info(&receipt.summary);
        ctx.output
            .success(&format!("Paid {} with {}", receipt.amount, method.display_name()));
    }

    Ok(())
}

/// Apply `--set-quantity`, `--set-price` and `--remove` in that order.
fn apply_edits(cart: &mut Cart, args: &CheckoutArgs, ctx: &Context) -> Result<()> {
    for (name, quantity) in &args.set_quantity {
        cart.update_item(name, ItemUpdate::new().quantity(*quantity))
            .with_context(|| format!("Cannot update '{}'", name))?;
        ctx.output.debug(&format!("Set quantity of {} to {}", name, quantity));
    }

    for (name, price) in &args.set_price {
        let price = Money::from_decimal(*price, cart.currency())?;
        cart.update_item(name, ItemUpdate::new().price(price))
            .with_context(|| format!("Cannot update '{}'", name))?;
        ctx.output.debug(&format!("Set price of {} to {}", name, price));
    }

    for name in &args.remove {
        cart.remove_item(name)
            .with_context(|| format!("Cannot remove '{}'", name))?;
        ctx.output.debug(&format!("Removed {}", name));
    }

    Ok(())
}

/// Ask before charging unless `--yes` was given.
fn confirm_payment(total: Money, yes: bool, ctx: &Context) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    if ctx.output.is_json() {
        bail!("--yes is required with --json");
    }

    ctx.output.info("");
    let confirmed = Confirm::new()
        .with_prompt(format!("Pay {}?", total))
        .default(true)
        .interact()?;
    Ok(confirmed)
}

/// Ask until a known payment method key is entered.
fn request_payment_method(ctx: &Context) -> Result<PaymentMethod> {
    let keys: Vec<&str> = PaymentMethod::keys().collect();
    let prompt = format!(
        "What payment method would you like to use? ({})",
        keys.join("/")
    );

    loop {
        let input: String = Input::new().with_prompt(&prompt).interact_text()?;
        match input.parse::<PaymentMethod>() {
            Ok(method) => return Ok(method),
            Err(_) => ctx.output.warn(&invalid_method_message(&input, &keys)),
        }
    }
}

/// Take credentials from `--credential` flags and prompt for the rest.
fn collect_credentials(
    method: PaymentMethod,
    args: &CheckoutArgs,
    ctx: &Context,
) -> Result<Credentials> {
    let mut credentials = Credentials::new();
    for (key, value) in &args.credentials {
        credentials.insert(key.as_str(), value.as_str());
    }

    for field in method.credential_fields() {
        if credentials.require(field.key).is_ok() {
            continue;
        }
        if ctx.output.is_json() {
            bail!("Missing --credential {}=...", field.key);
        }
        let value = if field.secret {
            Password::new().with_prompt(field.prompt).interact()?
        } else {
            Input::<String>::new()
                .with_prompt(field.prompt)
                .interact_text()?
        };
        credentials.insert(field.key, value);
    }

    Ok(credentials)
}

fn invalid_method_message(input: &str, keys: &[&str]) -> String {
    format!(
        "Payment method '{}' is not valid. Please choose one of the following: {}",
        input.trim(),
        keys.join(", ")
    )
}
