//! Loan repository

use uuid::Uuid;

use crate::domain::Loan;
use crate::error::{CoreError, CoreResult};

use super::Store;

#[derive(Debug, Clone)]
pub struct LoanRepository {
    store: Store,
}

impl LoanRepository {
    pub(crate) fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn insert(&self, loan: Loan) -> CoreResult<Loan> {
        let mut loans = self.store.inner.loans.write().await;
        if loans.values().any(|l| l.loan_number == loan.loan_number) {
            return Err(CoreError::DuplicateResource(format!(
                "loan {}",
                loan.loan_number
            )));
        }
        loans.insert(loan.id, loan.clone());
        Ok(loan)
    }

    pub async fn get(&self, loan_id: Uuid) -> CoreResult<Loan> {
        let loans = self.store.inner.loans.read().await;
        loans
            .get(&loan_id)
            .cloned()
            .ok_or_else(|| CoreError::LoanNotFound(loan_id.to_string()))
    }

    /// Atomic read-modify-write on one loan.
    pub async fn update<F>(&self, loan_id: Uuid, f: F) -> CoreResult<Loan>
    where
        F: FnOnce(&mut Loan) -> CoreResult<()>,
    {
        let mut loans = self.store.inner.loans.write().await;
        let loan = loans
            .get_mut(&loan_id)
            .ok_or_else(|| CoreError::LoanNotFound(loan_id.to_string()))?;
        f(loan)?;
        Ok(loan.clone())
    }

    pub async fn list_by_customer(&self, customer_id: Uuid) -> Vec<Loan> {
        let loans = self.store.inner.loans.read().await;
        loans
            .values()
            .filter(|l| l.customer_id == customer_id)
            .cloned()
            .collect()
    }
}
