//! Cart pricing calculations and the printed cart report.

use crate::money::{Currency, Money};
use serde::Serialize;
use std::fmt;

/// Width of the `=` rule under the item rows.
const RULE_WIDTH: usize = 40;

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CartPricing {
    /// Currency all amounts are in.
    pub currency: Currency,
    /// Subtotal before discounts.
    pub subtotal: Money,
    /// Total discount amount.
    pub discount_total: Money,
    /// Final total (subtotal - discounts). May be negative.
    pub grand_total: Money,
    /// Per-line-item pricing breakdown, in cart order.
    pub line_items: Vec<LineItemPricing>,
    /// Per-code discount amounts, in the order the codes were applied.
    pub discounts: Vec<AppliedDiscount>,
}

impl CartPricing {
    /// Check if any discounts are applied.
    pub fn has_discounts(&self) -> bool {
        !self.discounts.is_empty()
    }

    /// Check if discounts exceed the subtotal.
    pub fn is_over_discounted(&self) -> bool {
        self.grand_total.is_negative()
    }
}

/// Pricing breakdown for a single line item.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LineItemPricing {
    pub name: String,
    pub unit_price: Money,
    pub quantity: i64,
    /// Subtotal (unit_price * quantity).
    pub subtotal: Money,
}

/// A discount code together with the amount it took off.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AppliedDiscount {
    pub code: String,
    pub amount: Money,
}

/// Renders the fixed-width "Shopping Cart:" report.
impl fmt::Display for CartPricing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.currency.symbol();

        writeln!(f, "Shopping Cart:")?;
        writeln!(f, "{:<10}{:>10}{:>7}{:>13}", "Item", "Price", "Qty", "Total")?;
        for line in &self.line_items {
            writeln!(
                f,
                "{:<12}{}{:>7}{:>7}     {}{:>7}",
                line.name,
                symbol,
                line.unit_price.display_amount(),
                line.quantity,
                symbol,
                line.subtotal.display_amount(),
            )?;
        }
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(f, "Subtotal: {}{:>7}", symbol, self.subtotal.display_amount())?;
        writeln!(f, "Discount: {}{:>7}", symbol, self.discount_total.display_amount())?;
        writeln!(f, "Total:    {}{:>7}", symbol, self.grand_total.display_amount())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd(cents: i64) -> Money {
        Money::new(cents, Currency::USD)
    }

    #[test]
    fn test_report_layout() {
        let pricing = CartPricing {
            currency: Currency::USD,
            subtotal: usd(1500),
            discount_total: usd(150),
            grand_total: usd(1350),
            line_items: vec![LineItemPricing {
                name: "Apple".to_string(),
                unit_price: usd(150),
                quantity: 10,
                subtotal: usd(1500),
            }],
            discounts: vec![AppliedDiscount {
                code: "SAVE10".to_string(),
                amount: usd(150),
            }],
        };

        let expected = "\
Shopping Cart:
Item           Price    Qty        Total
Apple       $   1.50     10     $  15.00
========================================
Subtotal: $  15.00
Discount: $   1.50
Total:    $  13.50
";
        assert_eq!(pricing.to_string(), expected);
        assert!(pricing.has_discounts());
        assert!(!pricing.is_over_discounted());
    }

    #[test]
    fn test_over_discounted() {
        let pricing = CartPricing {
            currency: Currency::USD,
            subtotal: usd(300),
            discount_total: usd(500),
            grand_total: usd(-200),
            line_items: vec![],
            discounts: vec![],
        };
        assert!(pricing.is_over_discounted());
        assert!(pricing.to_string().ends_with("Total:    $  -2.00\n"));
    }
}
