//! Checkout payment methods and their handlers.

use super::{
    check_payment_amount, check_payout_amount, mask_all, mask_tail, CredentialField, Credentials,
    PaymentReceipt, PaymentService, TransactionKind,
};
use crate::error::CommerceError;
use crate::money::Money;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::info;

const CARD_FIELDS: &[CredentialField] = &[
    CredentialField {
        key: "card_number",
        prompt: "Please enter your credit card number",
        secret: false,
    },
    CredentialField {
        key: "expiration_date",
        prompt: "Please enter your credit card expiration date",
        secret: false,
    },
    CredentialField {
        key: "ccv",
        prompt: "Please enter your credit card CCV",
        secret: true,
    },
];

const PAYPAL_FIELDS: &[CredentialField] = &[
    CredentialField {
        key: "username",
        prompt: "Please enter your PayPal username",
        secret: false,
    },
    CredentialField {
        key: "password",
        prompt: "Please enter your PayPal password",
        secret: true,
    },
];

const APPLE_FIELDS: &[CredentialField] = &[CredentialField {
    key: "device_id",
    prompt: "Please enter your Apple Pay device ID",
    secret: false,
}];

/// The payment methods offered at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    CreditCard,
    PayPal,
    ApplePay,
}

impl PaymentMethod {
    /// All methods, in menu order.
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::CreditCard,
        PaymentMethod::PayPal,
        PaymentMethod::ApplePay,
    ];

    /// Lookup key (`cc`, `paypal`, `apple`).
    pub fn key(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "cc",
            PaymentMethod::PayPal => "paypal",
            PaymentMethod::ApplePay => "apple",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit card",
            PaymentMethod::PayPal => "PayPal",
            PaymentMethod::ApplePay => "Apple Pay",
        }
    }

    /// All keys, in menu order.
    pub fn keys() -> impl Iterator<Item = &'static str> {
        Self::ALL.into_iter().map(|m| m.key())
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.key() == key)
    }

    /// Credentials the customer must supply for this method.
    pub fn credential_fields(&self) -> &'static [CredentialField] {
        match self {
            PaymentMethod::CreditCard => CARD_FIELDS,
            PaymentMethod::PayPal => PAYPAL_FIELDS,
            PaymentMethod::ApplePay => APPLE_FIELDS,
        }
    }

    /// Build the handler for this method from collected credentials.
    pub fn handler(
        &self,
        credentials: &Credentials,
    ) -> Result<Box<dyn PaymentService>, CommerceError> {
        let handler: Box<dyn PaymentService> = match self {
            PaymentMethod::CreditCard => Box::new(CreditCardPayment::new(
                credentials.require("card_number")?,
                credentials.require("expiration_date")?,
                credentials.require("ccv")?,
            )),
            PaymentMethod::PayPal => Box::new(PayPalPayment::new(
                credentials.require("username")?,
                credentials.require("password")?,
            )),
            PaymentMethod::ApplePay => {
                Box::new(ApplePayPayment::new(credentials.require("device_id")?))
            }
        };
        Ok(handler)
    }
}

impl FromStr for PaymentMethod {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s.trim()).ok_or_else(|| CommerceError::UnknownPaymentMethod(s.to_string()))
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

fn receipt(
    provider: &'static str,
    kind: TransactionKind,
    amount: Money,
    summary: String,
) -> PaymentReceipt {
    info!(provider, %kind, amount = %amount, "{}", summary);
    PaymentReceipt {
        provider,
        kind,
        amount,
        summary,
    }
}

/// Card payment.
#[derive(Debug, Clone)]
pub struct CreditCardPayment {
    card_number: String,
    expiration_date: String,
    ccv: String,
    api_key: Option<String>,
}

impl CreditCardPayment {
    pub fn new(
        card_number: impl Into<String>,
        expiration_date: impl Into<String>,
        ccv: impl Into<String>,
    ) -> Self {
        Self {
            card_number: card_number.into(),
            expiration_date: expiration_date.into(),
            ccv: ccv.into(),
            api_key: None,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl PaymentService for CreditCardPayment {
    fn name(&self) -> &'static str {
        "credit-card"
    }

    fn set_api_key(&mut self, api_key: &str) {
        self.api_key = Some(api_key.to_string());
    }

    fn process_payment(&mut self, amount: Money) -> Result<PaymentReceipt, CommerceError> {
        check_payment_amount(&amount)?;
        let summary = format!(
            "Processing credit card payment of {} with card number {} and expiration date {} and CCV {}...",
            amount,
            mask_tail(&self.card_number),
            self.expiration_date,
            mask_all(&self.ccv),
        );
        Ok(receipt(self.name(), TransactionKind::Payment, amount, summary))
    }

    fn process_payout(&mut self, amount: Money) -> Result<PaymentReceipt, CommerceError> {
        check_payout_amount(&amount)?;
        let summary = format!(
            "Processing credit card refund of {} to card number {}...",
            amount,
            mask_tail(&self.card_number),
        );
        Ok(receipt(self.name(), TransactionKind::Payout, amount, summary))
    }
}

/// PayPal account payment.
#[derive(Debug, Clone)]
pub struct PayPalPayment {
    username: String,
    password: String,
    api_key: Option<String>,
}

impl PayPalPayment {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            api_key: None,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl PaymentService for PayPalPayment {
    fn name(&self) -> &'static str {
        "paypal"
    }

    fn set_api_key(&mut self, api_key: &str) {
        self.api_key = Some(api_key.to_string());
    }

    fn process_payment(&mut self, amount: Money) -> Result<PaymentReceipt, CommerceError> {
        check_payment_amount(&amount)?;
        let summary = format!(
            "Processing PayPal payment of {} with username {} and password {}...",
            amount,
            self.username,
            mask_all(&self.password),
        );
        Ok(receipt(self.name(), TransactionKind::Payment, amount, summary))
    }

    fn process_payout(&mut self, amount: Money) -> Result<PaymentReceipt, CommerceError> {
        check_payout_amount(&amount)?;
        let summary = format!(
            "Processing PayPal payout of {} to username {}...",
            amount, self.username,
        );
        Ok(receipt(self.name(), TransactionKind::Payout, amount, summary))
    }
}

/// Apple Pay device payment.
#[derive(Debug, Clone)]
pub struct ApplePayPayment {
    device_id: String,
    api_key: Option<String>,
}

impl ApplePayPayment {
    pub fn new(device_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            api_key: None,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl PaymentService for ApplePayPayment {
    fn name(&self) -> &'static str {
        "apple-pay"
    }

    fn set_api_key(&mut self, api_key: &str) {
        self.api_key = Some(api_key.to_string());
    }

    fn process_payment(&mut self, amount: Money) -> Result<PaymentReceipt, CommerceError> {
        check_payment_amount(&amount)?;
        let summary = format!(
            "Processing Apple Pay payment of {} with device ID {}...",
            amount,
            mask_tail(&self.device_id),
        );
        Ok(receipt(self.name(), TransactionKind::Payment, amount, summary))
    }

    fn process_payout(&mut self, amount: Money) -> Result<PaymentReceipt, CommerceError> {
        check_payout_amount(&amount)?;
        let summary = format!(
            "Processing Apple Pay refund of {} to device ID {}...",
            amount,
            mask_tail(&self.device_id),
        );
        Ok(receipt(self.name(), TransactionKind::Payout, amount, summary))
    }
}
