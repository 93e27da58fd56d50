//! Account ledger
//!
//! The only writer of account balances. Each debit or credit is one critical
//! section under the accounts write lock: status check, funds check, and the
//! balance mutation commit together or not at all.

use rust_decimal::Decimal;

use crate::domain::Amount;
use crate::error::{CoreError, CoreResult};

use super::Store;

#[derive(Debug, Clone)]
pub struct AccountLedger {
    store: Store,
}

impl AccountLedger {
    pub(crate) fn new(store: Store) -> Self {
        Self { store }
    }

    /// Atomically reduce the balance. Returns the new balance.
    ///
    /// Fails with `AccountNotActive` unless the account is ACTIVE and with
    /// `InsufficientFunds` when `amount` exceeds the balance; the balance can
    /// never go negative.
    pub async fn debit(&self, account_number: &str, amount: &Amount) -> CoreResult<Decimal> {
        let mut accounts = self.store.inner.accounts.write().await;
        let account = accounts
            .get_mut(account_number)
            .ok_or_else(|| CoreError::AccountNotFound(account_number.to_string()))?;

        if !account.is_active() {
            return Err(CoreError::AccountNotActive);
        }
        if !account.balance.is_sufficient_for(amount) {
            return Err(CoreError::InsufficientFunds {
                required: amount.value(),
                available: account.balance.value(),
            });
        }

        account.balance = account.balance.debit(amount)?;
        Ok(account.balance.value())
    }

    /// Atomically increase the balance. Returns the new balance.
    pub async fn credit(&self, account_number: &str, amount: &Amount) -> CoreResult<Decimal> {
        let mut accounts = self.store.inner.accounts.write().await;
        let account = accounts
            .get_mut(account_number)
            .ok_or_else(|| CoreError::AccountNotFound(account_number.to_string()))?;

        if !account.is_active() {
            return Err(CoreError::AccountNotActive);
        }

        account.balance = account.balance.credit(amount)?;
        Ok(account.balance.value())
    }
}
