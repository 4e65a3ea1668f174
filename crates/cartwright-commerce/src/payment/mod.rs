//! Payment strategies.
//!
//! Every provider implements [`PaymentService`]. Checkout picks one at
//! runtime through [`PaymentMethod`], keyed by a short string (`cc`,
//! `paypal`, `apple`); the bank talks to [`StripePaymentService`]
//! directly. Providers are mocked: processing validates the amount,
//! logs, and returns a [`PaymentReceipt`] describing what would have
//! been charged.

mod method;
mod stripe;

pub use method::{ApplePayPayment, CreditCardPayment, PayPalPayment, PaymentMethod};
pub use stripe::StripePaymentService;

use crate::error::CommerceError;
use crate::money::Money;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A payment provider.
pub trait PaymentService {
    /// Short provider name used in receipts and logs.
    fn name(&self) -> &'static str;

    fn set_api_key(&mut self, api_key: &str);

    /// Charge the customer.
    fn process_payment(&mut self, amount: Money) -> Result<PaymentReceipt, CommerceError>;

    /// Send money to the customer.
    fn process_payout(&mut self, amount: Money) -> Result<PaymentReceipt, CommerceError>;
}

/// Direction of a processed transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Payment,
    Payout,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Payment => write!(f, "payment"),
            TransactionKind::Payout => write!(f, "payout"),
        }
    }
}

/// Outcome of a mocked provider call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentReceipt {
    pub provider: &'static str,
    pub kind: TransactionKind,
    pub amount: Money,
    /// Human-readable description with secrets masked.
    pub summary: String,
}

/// A credential a payment method asks the customer for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialField {
    pub key: &'static str,
    pub prompt: &'static str,
    /// Read without echo when prompting.
    pub secret: bool,
}

/// Credentials collected for a payment method, by field key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials(BTreeMap<String, String>);

impl Credentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style [`Credentials::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get a non-blank credential.
    pub fn require(&self, key: &'static str) -> Result<&str, CommerceError> {
        self.0
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .ok_or(CommerceError::MissingCredential(key))
    }
}

/// Replace all but the last four characters with `*`, keeping the length.
pub fn mask_tail(value: &str) -> String {
    const VISIBLE: usize = 4;
    let len = value.chars().count();
    let hidden = len.saturating_sub(VISIBLE);
    "*".repeat(hidden) + &value.chars().skip(hidden).collect::<String>()
}

/// Replace every character with `*`.
pub fn mask_all(value: &str) -> String {
    "*".repeat(value.chars().count())
}

/// Payments may be zero but never negative.
pub(crate) fn check_payment_amount(amount: &Money) -> Result<(), CommerceError> {
    if amount.is_negative() {
        return Err(CommerceError::InvalidAmount(*amount));
    }
    Ok(())
}

/// Payouts must move some money.
pub(crate) fn check_payout_amount(amount: &Money) -> Result<(), CommerceError> {
    if !amount.is_positive() {
        return Err(CommerceError::InvalidAmount(*amount));
    }
    Ok(())
}
