//! Process an order and print the notification email.

use anyhow::Result;
use cartwright_commerce::money::Money;
use cartwright_commerce::order::{calculate_price, process_order, Order, OrderType};

use super::{OrderArgs, OrderKind};
use crate::context::Context;

/// Run the order command.
pub fn run(args: OrderArgs, ctx: &Context) -> Result<()> {
    let currency = ctx.config.currency;
    let order_type = match args.order_type {
        OrderKind::Online => OrderType::Online,
        OrderKind::InStore => OrderType::InStore,
    };

    let total = if args.prices.is_empty() {
        None
    } else {
        let prices = args
            .prices
            .iter()
            .map(|p| Money::from_decimal(*p, currency))
            .collect::<Result<Vec<_>, _>>()?;
        Some(calculate_price(&prices, currency, args.discount_rate)?)
    };

    let mut order = Order::new(args.id.as_str(), order_type, args.email.as_str());
    ctx.output.info(&format!("Processing {} order...", order.order_type));
    let email = process_order(&mut order);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "order": order,
            "total": total,
            "email": email,
        }));
        return Ok(());
    }

    if let Some(total) = total {
        ctx.output.kv("Total price", &total.display());
    }
    ctx.output.kv("Status", order.status.as_str());
    ctx.output.header("Email");
    ctx.output.block(&format!("{}\n", email));
    ctx.output.success("Order processed successfully.");

    Ok(())
}
