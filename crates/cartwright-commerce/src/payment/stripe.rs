//! Stripe gateway.

use super::{
    check_payment_amount, check_payout_amount, PaymentReceipt, PaymentService, TransactionKind,
};
use crate::error::CommerceError;
use crate::money::Money;
use tracing::{debug, info};

/// API-key based gateway used for account deposits and withdrawals.
#[derive(Debug, Clone, Default)]
pub struct StripePaymentService {
    api_key: Option<String>,
}

impl StripePaymentService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a service with its API key already set.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
        }
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}

impl PaymentService for StripePaymentService {
    fn name(&self) -> &'static str {
        "stripe"
    }

    fn set_api_key(&mut self, api_key: &str) {
        debug!("setting Stripe API key");
        self.api_key = Some(api_key.to_string());
    }

    fn process_payment(&mut self, amount: Money) -> Result<PaymentReceipt, CommerceError> {
        check_payment_amount(&amount)?;
        info!(amount = %amount, "processing payment via Stripe");
        Ok(PaymentReceipt {
            provider: self.name(),
            kind: TransactionKind::Payment,
            amount,
            summary: format!("Processing payment of {} via Stripe.", amount),
        })
    }

    fn process_payout(&mut self, amount: Money) -> Result<PaymentReceipt, CommerceError> {
        check_payout_amount(&amount)?;
        info!(amount = %amount, "processing payout via Stripe");
        Ok(PaymentReceipt {
            provider: self.name(),
            kind: TransactionKind::Payout,
            amount,
            summary: format!("Processing payout of {} via Stripe.", amount),
        })
    }
}
