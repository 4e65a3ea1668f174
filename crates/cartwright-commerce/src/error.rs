//! Commerce error types.

use crate::money::Money;
use thiserror::Error;

/// Errors that can occur in cart, payment and account operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// No item with this name is in the cart.
    #[error("Item '{0}' not found")]
    ItemNotFound(String),

    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Invalid unit price.
    #[error("Invalid price: {0}")]
    InvalidPrice(Money),

    /// Invalid item name.
    #[error("Invalid item name: {0:?}")]
    InvalidName(String),

    /// Discount code not present in the catalog.
    #[error("Discount code '{0}' is not valid")]
    InvalidDiscountCode(String),

    /// Discount definition out of range.
    #[error("Invalid discount: {0}")]
    InvalidDiscount(String),

    /// Payment method key not recognised.
    #[error("Unknown payment method '{0}'")]
    UnknownPaymentMethod(String),

    /// A credential required by the payment method was not supplied.
    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),

    /// Amount not accepted by a payment or account operation.
    #[error("Invalid amount: {0}")]
    InvalidAmount(Money),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,
}

impl CommerceError {
    /// Build a currency mismatch error from two amounts.
    pub fn currency_mismatch(expected: &Money, got: &Money) -> Self {
        CommerceError::CurrencyMismatch {
            expected: expected.currency.code().to_string(),
            got: got.currency.code().to_string(),
        }
    }
}
