//! List discount codes.

use anyhow::Result;
use rust_decimal::Decimal;

use crate::context::Context;

/// Run the discounts command.
pub fn run(ctx: &Context) -> Result<()> {
    let catalog = ctx.config.discount_catalog()?;

    if ctx.output.is_json() {
        ctx.output.json(&catalog);
        return Ok(());
    }

    ctx.output.header("Discount codes");

    let widths = [14, 10, 8];
    ctx.output.table_row(&["CODE", "FIXED", "PERCENT"], &widths);
    for discount in catalog.iter() {
        let percent = format!("{}%", (discount.rate() * Decimal::ONE_HUNDRED).normalize());
        ctx.output.table_row(
            &[
                discount.code(),
                &discount.fixed_amount().display(),
                &percent,
            ],
            &widths,
        );
    }

    Ok(())
}
