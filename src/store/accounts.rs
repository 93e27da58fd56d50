//! Account repository

use crate::domain::Account;
use crate::error::{CoreError, CoreResult};

use super::Store;

#[derive(Debug, Clone)]
pub struct AccountRepository {
    store: Store,
}

impl AccountRepository {
    pub(crate) fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn insert(&self, account: Account) -> CoreResult<Account> {
        let mut accounts = self.store.inner.accounts.write().await;
        if accounts.contains_key(&account.account_number) {
            return Err(CoreError::DuplicateResource(format!(
                "account {}",
                account.account_number
            )));
        }
        accounts.insert(account.account_number.clone(), account.clone());
        Ok(account)
    }

    pub async fn get(&self, account_number: &str) -> CoreResult<Account> {
        let accounts = self.store.inner.accounts.read().await;
        accounts
            .get(account_number)
            .cloned()
            .ok_or_else(|| CoreError::AccountNotFound(account_number.to_string()))
    }

    /// Atomic read-modify-write on one account.
    pub async fn update<F>(&self, account_number: &str, f: F) -> CoreResult<Account>
    where
        F: FnOnce(&mut Account) -> CoreResult<()>,
    {
        let mut accounts = self.store.inner.accounts.write().await;
        let account = accounts
            .get_mut(account_number)
            .ok_or_else(|| CoreError::AccountNotFound(account_number.to_string()))?;
        f(account)?;
        Ok(account.clone())
    }

    pub async fn list_by_customer(&self, customer_id: uuid::Uuid) -> Vec<Account> {
        let accounts = self.store.inner.accounts.read().await;
        accounts
            .values()
            .filter(|a| a.customer_id == customer_id)
            .cloned()
            .collect()
    }
}
