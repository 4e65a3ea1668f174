//! Deposit into and withdraw from the configured accounts.

use anyhow::{Context as _, Result};
use cartwright_commerce::bank::BankService;
use cartwright_commerce::money::Money;
use cartwright_commerce::payment::{PaymentService, StripePaymentService};

use super::BankArgs;
use crate::context::Context;

/// Run the bank command.
pub fn run(args: BankArgs, ctx: &Context) -> Result<()> {
    let currency = ctx.config.currency;
    let deposit = Money::from_decimal(args.deposit, currency)?;
    let withdraw = Money::from_decimal(args.withdraw, currency)?;

    let mut stripe = StripePaymentService::new();
    if let Some(api_key) = &ctx.config.payment.api_key {
        stripe.set_api_key(api_key);
    }
    let mut bank = BankService::new(stripe);
    let mut accounts = ctx.config.accounts()?;

    ctx.output.header("Bank transactions");

    let mut receipts = Vec::new();
    for account in &mut accounts {
        ctx.output.info(&format!(
            "Depositing {} into {} {}.",
            deposit,
            account.kind(),
            account.id()
        ));
        let receipt = bank
            .deposit(deposit, account)
            .with_context(|| format!("Deposit into {} failed", account.id()))?;
        ctx.output.debug(&receipt.summary);
        receipts.push(receipt);
    }

    for account in &mut accounts {
        ctx.output.info(&format!(
            "Withdrawing {} from {} {}.",
            withdraw,
            account.kind(),
            account.id()
        ));
        let receipt = bank
            .withdraw(withdraw, account)
            .with_context(|| format!("Withdrawal from {} failed", account.id()))?;
        ctx.output.debug(&receipt.summary);
        receipts.push(receipt);
    }

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "accounts": accounts,
            "receipts": receipts,
        }));
        return Ok(());
    }

    ctx.output.header("Balances");
    for account in &accounts {
        ctx.output.kv(
            &format!("{} {}", account.kind(), account.id()),
            &account.balance().display(),
        );
    }

    Ok(())
}
