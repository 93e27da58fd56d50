//! Account entity
//!
//! Balance mutation happens only through the `AccountLedger`; everything else
//! treats the account as read-only state. Accounts are never deleted, only
//! transitioned to `Closed`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};

use super::Balance;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    Savings,
    Current,
    FixedDeposit,
    RecurringDeposit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Active,
    Inactive,
    Frozen,
    Closed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub account_number: String,
    pub customer_id: Uuid,
    pub account_type: AccountType,
    pub balance: Balance,
    pub minimum_balance: Decimal,
    pub currency: String,
    pub status: AccountStatus,
    pub ifsc_code: String,
    pub branch_name: String,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(
        account_number: String,
        customer_id: Uuid,
        account_type: AccountType,
        minimum_balance: Decimal,
        currency: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            account_number,
            customer_id,
            account_type,
            balance: Balance::zero(),
            minimum_balance,
            currency,
            status: AccountStatus::Active,
            ifsc_code: "FINS0001234".to_string(),
            branch_name: "Main Branch".to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    /// Transition the account to `Closed`. A closed account stays on record.
    pub fn close(&mut self) -> CoreResult<()> {
        if self.status == AccountStatus::Closed {
            return Err(CoreError::InvalidRequest(
                "account is already closed".to_string(),
            ));
        }
        self.status = AccountStatus::Closed;
        Ok(())
    }
}
