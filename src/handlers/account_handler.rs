//! Account lifecycle

use std::sync::Arc;

use crate::audit::{AuditAction, AuditRecord, AuditSink};
use crate::config::Config;
use crate::domain::{Account, AccountType, OperationContext};
use crate::error::{CoreError, CoreResult};
use crate::notify::{Notification, NotificationSink};
use crate::refgen::RefGen;
use crate::store::{AccountRepository, CustomerRepository, Store};

pub struct AccountHandler {
    accounts: AccountRepository,
    customers: CustomerRepository,
    refgen: Arc<RefGen>,
    notifier: Arc<dyn NotificationSink>,
    audit: Arc<dyn AuditSink>,
    config: Config,
}

impl AccountHandler {
    pub fn new(
        store: Store,
        refgen: Arc<RefGen>,
        notifier: Arc<dyn NotificationSink>,
        audit: Arc<dyn AuditSink>,
        config: Config,
    ) -> Self {
        Self {
            accounts: store.accounts(),
            customers: store.customers(),
            refgen,
            notifier,
            audit,
            config,
        }
    }

    /// Open a new account for a KYC-approved customer.
    pub async fn open(
        &self,
        customer_id: uuid::Uuid,
        account_type: AccountType,
        ctx: &OperationContext,
    ) -> CoreResult<Account> {
        let customer = self.customers.get(customer_id).await?;
        if !customer.is_kyc_approved() {
            return Err(CoreError::KycNotApproved);
        }

        let account = Account::new(
            self.refgen.account_number(),
            customer_id,
            account_type,
            self.config.default_minimum_balance,
            self.config.currency.clone(),
        );
        let account = self.accounts.insert(account).await?;

        self.notifier.notify(Notification::account_opened(
            customer.user_id,
            &format!("{:?}", account.account_type),
            &account.account_number,
        ));
        self.audit.record(
            AuditRecord::new(AuditAction::AccountOpened, "account")
                .actor(ctx.actor_user_id)
                .resource_id(account.account_number.clone()),
        );

        tracing::info!(account_number = %account.account_number, "account opened");
        Ok(account)
    }

    /// Close an account. Only the owner may close it, and only with a zero
    /// balance; the record stays for history.
    pub async fn close(
        &self,
        account_number: &str,
        requester: uuid::Uuid,
        ctx: &OperationContext,
    ) -> CoreResult<Account> {
        let account = self
            .accounts
            .update(account_number, |account| {
                if account.customer_id != requester {
                    return Err(CoreError::Unauthorized(
                        "account does not belong to this customer".to_string(),
                    ));
                }
                if !account.balance.value().is_zero() {
                    return Err(CoreError::InvalidRequest(
                        "account balance must be zero before closure".to_string(),
                    ));
                }
                account.close()
            })
            .await?;

        self.audit.record(
            AuditRecord::new(AuditAction::AccountClosed, "account")
                .actor(ctx.actor_user_id)
                .resource_id(account.account_number.clone()),
        );
        Ok(account)
    }

    pub async fn get(&self, account_number: &str) -> CoreResult<Account> {
        self.accounts.get(account_number).await
    }

    pub async fn list_for_customer(&self, customer_id: uuid::Uuid) -> Vec<Account> {
        self.accounts.list_by_customer(customer_id).await
    }
}
