//! Customer repository

use uuid::Uuid;

use crate::domain::Customer;
use crate::error::{CoreError, CoreResult};

use super::Store;

#[derive(Debug, Clone)]
pub struct CustomerRepository {
    store: Store,
}

impl CustomerRepository {
    pub(crate) fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn insert(&self, customer: Customer) -> CoreResult<Customer> {
        let mut customers = self.store.inner.customers.write().await;
        if customers.values().any(|c| c.email == customer.email) {
            return Err(CoreError::DuplicateResource(format!(
                "customer email {}",
                customer.email
            )));
        }
        customers.insert(customer.id, customer.clone());
        Ok(customer)
    }

    pub async fn get(&self, customer_id: Uuid) -> CoreResult<Customer> {
        let customers = self.store.inner.customers.read().await;
        customers
            .get(&customer_id)
            .cloned()
            .ok_or_else(|| CoreError::CustomerNotFound(customer_id.to_string()))
    }

    pub async fn find_by_email(&self, email: &str) -> Option<Customer> {
        let customers = self.store.inner.customers.read().await;
        customers.values().find(|c| c.email == email).cloned()
    }

    /// Atomic read-modify-write on one customer.
    pub async fn update<F>(&self, customer_id: Uuid, f: F) -> CoreResult<Customer>
    where
        F: FnOnce(&mut Customer),
    {
        let mut customers = self.store.inner.customers.write().await;
        let customer = customers
            .get_mut(&customer_id)
            .ok_or_else(|| CoreError::CustomerNotFound(customer_id.to_string()))?;
        f(customer);
        Ok(customer.clone())
    }
}
