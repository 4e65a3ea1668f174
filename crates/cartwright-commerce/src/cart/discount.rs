//! Discount codes and the catalog they are resolved against.

use crate::error::CommerceError;
use crate::money::{Currency, Money};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// A discount code: a fixed amount off plus a fraction of the subtotal.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Discount {
    code: String,
    fixed_amount: Money,
    percentage: Decimal,
}

impl Discount {
    /// Create a discount.
    ///
    /// `fixed_amount` must be non-negative and `percentage` must lie in `[0, 1]`.
    pub fn new(
        code: impl Into<String>,
        fixed_amount: Money,
        percentage: Decimal,
    ) -> Result<Self, CommerceError> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(CommerceError::InvalidDiscount(
                "discount code must not be empty".to_string(),
            ));
        }
        if fixed_amount.is_negative() {
            return Err(CommerceError::InvalidDiscount(format!(
                "{}: fixed amount {} is negative",
                code, fixed_amount
            )));
        }
        if percentage < Decimal::ZERO || percentage > Decimal::ONE {
            return Err(CommerceError::InvalidDiscount(format!(
                "{}: percentage {} is outside [0, 1]",
                code, percentage
            )));
        }
        Ok(Self {
            code,
            fixed_amount,
            percentage,
        })
    }

    /// A discount that only takes a fixed amount off.
    pub fn fixed(code: impl Into<String>, amount: Money) -> Result<Self, CommerceError> {
        Self::new(code, amount, Decimal::ZERO)
    }

    /// A discount that only takes a fraction of the subtotal off.
    pub fn percentage(
        code: impl Into<String>,
        percentage: Decimal,
        currency: Currency,
    ) -> Result<Self, CommerceError> {
        Self::new(code, Money::zero(currency), percentage)
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn fixed_amount(&self) -> Money {
        self.fixed_amount
    }

    pub fn rate(&self) -> Decimal {
        self.percentage
    }

    /// Amount this discount takes off the given subtotal.
    ///
    /// Not capped at the subtotal.
    pub fn amount_for(&self, subtotal: &Money) -> Result<Money, CommerceError> {
        let proportional = subtotal.try_multiply_decimal(self.percentage)?;
        self.fixed_amount.try_add(&proportional)
    }
}

/// Read-only lookup table from discount code to rule.
///
/// Built once at startup and handed to the cart when a code is applied.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DiscountCatalog {
    currency: Currency,
    discounts: BTreeMap<String, Discount>,
}

impl DiscountCatalog {
    /// An empty catalog for the given currency.
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            discounts: BTreeMap::new(),
        }
    }

    /// The stock codes: `SAVE10`, `5BUCKSOFF`, `FREESHIPPING`, `BLKFRIDAY`.
    pub fn standard(currency: Currency) -> Self {
        let units = 10_i64.pow(currency.decimal_places());
        let mut catalog = Self::new(currency);
        let stock = [
            ("SAVE10", 0, Decimal::new(1, 1)),
            ("5BUCKSOFF", 5 * units, Decimal::ZERO),
            ("FREESHIPPING", 2 * units, Decimal::ZERO),
            ("BLKFRIDAY", 0, Decimal::new(2, 1)),
        ];
        for (code, fixed, rate) in stock {
            catalog.discounts.insert(
                code.to_string(),
                Discount {
                    code: code.to_string(),
                    fixed_amount: Money::new(fixed, currency),
                    percentage: rate,
                },
            );
        }
        catalog
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Add or replace a discount. Returns the one it replaced, if any.
    pub fn insert(&mut self, discount: Discount) -> Result<Option<Discount>, CommerceError> {
        if discount.fixed_amount.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: discount.fixed_amount.currency.code().to_string(),
            });
        }
        Ok(self.discounts.insert(discount.code.clone(), discount))
    }

    /// Look up a code. Codes are case-sensitive.
    pub fn get(&self, code: &str) -> Option<&Discount> {
        self.discounts.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.discounts.contains_key(code)
    }

    /// Discounts in code order.
    pub fn iter(&self) -> impl Iterator<Item = &Discount> {
        self.discounts.values()
    }

    pub fn len(&self) -> usize {
        self.discounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.discounts.is_empty()
    }
}
