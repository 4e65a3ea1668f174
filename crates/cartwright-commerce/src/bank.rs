//! Bank accounts and the service that moves money in and out of them.

use crate::error::CommerceError;
use crate::ids::AccountId;
use crate::money::Money;
use crate::payment::{PaymentReceipt, PaymentService};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// Kind of bank account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Savings,
    Checking,
}

impl AccountKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            AccountKind::Savings => "Savings Account",
            AccountKind::Checking => "Checking Account",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A bank account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    id: AccountId,
    kind: AccountKind,
    balance: Money,
}

impl Account {
    pub fn new(id: impl Into<AccountId>, kind: AccountKind, balance: Money) -> Self {
        Self {
            id: id.into(),
            kind,
            balance,
        }
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn balance(&self) -> Money {
        self.balance
    }
}

/// Routes deposits and withdrawals through a payment provider.
///
/// The provider is called first; the balance only changes if it succeeds.
/// Withdrawals may overdraw the account.
#[derive(Debug)]
pub struct BankService<P: PaymentService> {
    payment_service: P,
}

impl<P: PaymentService> BankService<P> {
    pub fn new(payment_service: P) -> Self {
        Self { payment_service }
    }

    pub fn payment_service(&self) -> &P {
        &self.payment_service
    }

    /// Charge `amount` through the provider and credit it to the account.
    pub fn deposit(
        &mut self,
        amount: Money,
        account: &mut Account,
    ) -> Result<PaymentReceipt, CommerceError> {
        let new_balance = checked_transfer(amount, account)?.try_add(&amount)?;
        info!(account = %account.id, kind = %account.kind, amount = %amount, "depositing");
        let receipt = self.payment_service.process_payment(amount)?;
        account.balance = new_balance;
        Ok(receipt)
    }

    /// Pay `amount` out through the provider and debit it from the account.
    pub fn withdraw(
        &mut self,
        amount: Money,
        account: &mut Account,
    ) -> Result<PaymentReceipt, CommerceError> {
        let new_balance = checked_transfer(amount, account)?.try_subtract(&amount)?;
        info!(account = %account.id, kind = %account.kind, amount = %amount, "withdrawing");
        let receipt = self.payment_service.process_payout(amount)?;
        account.balance = new_balance;
        Ok(receipt)
    }
}

/// Validate a transfer amount and return the current balance.
fn checked_transfer(amount: Money, account: &Account) -> Result<Money, CommerceError> {
    if !amount.is_positive() {
        return Err(CommerceError::InvalidAmount(amount));
    }
    if amount.currency != account.balance.currency {
        return Err(CommerceError::currency_mismatch(&account.balance, &amount));
    }
    Ok(account.balance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;
    use crate::payment::{StripePaymentService, TransactionKind};

    fn usd(cents: i64) -> Money {
        Money::new(cents, Currency::USD)
    }

    #[test]
    fn test_deposit_and_withdraw() {
        let mut bank = BankService::new(StripePaymentService::with_api_key("sk_test_1234567890"));
        let mut savings = Account::new("SA001", AccountKind::Savings, usd(100000));
        let mut checking = Account::new("CA001", AccountKind::Checking, usd(50000));

        let receipt = bank.deposit(usd(20000), &mut savings).unwrap();
        assert_eq!(receipt.kind, TransactionKind::Payment);
        bank.deposit(usd(30000), &mut checking).unwrap();

        let receipt = bank.withdraw(usd(10000), &mut savings).unwrap();
        assert_eq!(receipt.kind, TransactionKind::Payout);
        bank.withdraw(usd(20000), &mut checking).unwrap();

        assert_eq!(savings.balance(), usd(110000));
        assert_eq!(checking.balance(), usd(60000));
    }

    #[test]
    fn test_overdraft_allowed() {
        let mut bank = BankService::new(StripePaymentService::new());
        let mut account = Account::new("CA002", AccountKind::Checking, usd(1000));
        bank.withdraw(usd(2500), &mut account).unwrap();
        assert_eq!(account.balance(), usd(-1500));
    }

    #[test]
    fn test_invalid_amounts_leave_balance() {
        let mut bank = BankService::new(StripePaymentService::new());
        let mut account = Account::new("SA002", AccountKind::Savings, usd(1000));

        assert_eq!(
            bank.deposit(usd(0), &mut account),
            Err(CommerceError::InvalidAmount(usd(0)))
        );
        assert!(bank.withdraw(usd(-5), &mut account).is_err());
        assert!(matches!(
            bank.deposit(Money::new(100, Currency::EUR), &mut account),
            Err(CommerceError::CurrencyMismatch { .. })
        ));
        assert_eq!(account.balance(), usd(1000));
    }

    #[test]
    fn test_account_kind_display() {
        assert_eq!(AccountKind::Savings.to_string(), "Savings Account");
        assert_eq!(AccountKind::Checking.to_string(), "Checking Account");
    }
}
