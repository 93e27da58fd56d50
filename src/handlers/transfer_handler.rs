//! Transfer orchestrator
//!
//! Coordinates a transfer as a sequence of ledger operations plus
//! transaction-record creation, with the passcode guard as a step-up check
//! for high-value amounts. The debit and the destination credit commit
//! independently; the debit is durable before the credit is attempted.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::audit::{AuditAction, AuditRecord, AuditSink};
use crate::config::Config;
use crate::domain::{
    Amount, Balance, OperationContext, OtpPurpose, TransactionRecord, TransactionStatus,
    TransactionType,
};
use crate::error::{CoreError, CoreResult};
use crate::notify::{Notification, NotificationSink};
use crate::refgen::RefGen;
use crate::store::{
    AccountLedger, AccountRepository, CustomerRepository, Store, TransactionRepository,
};

use super::{OtpHandler, TransferCommand};

pub struct TransferHandler {
    accounts: AccountRepository,
    ledger: AccountLedger,
    transactions: TransactionRepository,
    customers: CustomerRepository,
    guard: OtpHandler,
    refgen: Arc<RefGen>,
    notifier: Arc<dyn NotificationSink>,
    audit: Arc<dyn AuditSink>,
    config: Config,
}

impl TransferHandler {
    pub fn new(
        store: Store,
        refgen: Arc<RefGen>,
        notifier: Arc<dyn NotificationSink>,
        audit: Arc<dyn AuditSink>,
        config: Config,
    ) -> Self {
        Self {
            accounts: store.accounts(),
            ledger: store.ledger(),
            transactions: store.transactions(),
            customers: store.customers(),
            guard: OtpHandler::new(
                store.clone(),
                Arc::clone(&notifier),
                Arc::clone(&audit),
                config.clone(),
            ),
            refgen,
            notifier,
            audit,
            config,
        }
    }

    /// Execute a transfer. Returns the debit record as the canonical result.
    pub async fn transfer(
        &self,
        command: TransferCommand,
        ctx: &OperationContext,
    ) -> CoreResult<TransactionRecord> {
        let amount = Amount::new(command.amount)?;

        // Resolve and authorize the source account.
        let source = self.accounts.get(&command.from_account).await?;
        if source.customer_id != command.requester {
            return Err(CoreError::Unauthorized(
                "account does not belong to this customer".to_string(),
            ));
        }
        if !source.is_active() {
            return Err(CoreError::AccountNotActive);
        }
        if !source.balance.is_sufficient_for(&amount) {
            return Err(CoreError::InsufficientFunds {
                required: amount.value(),
                available: source.balance.value(),
            });
        }

        // A destination that cannot be credited rejects the whole transfer
        // before any money moves.
        if let Some(to_account) = &command.to_account {
            if *to_account == command.from_account {
                return Err(CoreError::InvalidRequest(
                    "cannot transfer to the same account".to_string(),
                ));
            }
            let destination = self.accounts.get(to_account).await?;
            if !destination.is_active() {
                return Err(CoreError::AccountNotActive);
            }
        }

        // Step-up check for high-value transfers.
        if amount.value() > self.config.high_value_threshold {
            let sender = self.customers.get(source.customer_id).await?;
            let code = command
                .passcode
                .as_deref()
                .ok_or(CoreError::PasscodeRequired)?;
            self.guard
                .verify(&sender.email, OtpPurpose::Transaction, code, ctx)
                .await?;
        }

        // Debit commits first; the credit is a separate step.
        let new_balance = self.ledger.debit(&command.from_account, &amount).await?;
        let debit_record = self
            .transactions
            .append(TransactionRecord::new(
                self.refgen.transaction_ref(),
                command.from_account.clone(),
                TransactionType::Debit,
                command.mode,
                amount.clone(),
                Balance::new(new_balance)?,
                command.to_account.clone(),
                command.description.clone(),
            ))
            .await;

        if let Some(to_account) = &command.to_account {
            self.credit_destination(&command, to_account, &amount).await;
        }

        self.notify_customer(source.customer_id, |user_id| {
            Notification::transaction_alert(
                user_id,
                &command.from_account,
                &amount.to_string(),
                "debit",
            )
        })
        .await;

        self.audit.record(
            AuditRecord::new(AuditAction::TransferExecuted, "transaction")
                .actor(ctx.actor_user_id)
                .resource_id(debit_record.reference_number.clone())
                .details(serde_json::json!({
                    "from": command.from_account,
                    "to": command.to_account,
                    "amount": amount.value(),
                    "mode": command.mode,
                })),
        );

        tracing::info!(
            reference = %debit_record.reference_number,
            from = %command.from_account,
            "transfer executed"
        );
        Ok(debit_record)
    }

    /// Cash deposit: a plain ledger credit plus its record.
    pub async fn deposit(
        &self,
        account_number: &str,
        amount: Decimal,
        description: Option<String>,
        ctx: &OperationContext,
    ) -> CoreResult<TransactionRecord> {
        let amount = Amount::new(amount)?;
        let new_balance = self.ledger.credit(account_number, &amount).await?;

        let record = self
            .transactions
            .append(TransactionRecord::new(
                self.refgen.transaction_ref(),
                account_number.to_string(),
                TransactionType::Credit,
                crate::domain::TransactionMode::Cash,
                amount,
                Balance::new(new_balance)?,
                None,
                description.or_else(|| Some("Cash deposit".to_string())),
            ))
            .await;

        self.audit.record(
            AuditRecord::new(AuditAction::DepositProcessed, "transaction")
                .actor(ctx.actor_user_id)
                .resource_id(record.reference_number.clone()),
        );
        Ok(record)
    }

    /// Credit the destination after the debit has committed.
    ///
    /// The destination was validated up front, so a failure here means its
    /// status raced. The debited amount is then returned to the source and a
    /// REVERSED record is appended; funds are never silently lost.
    async fn credit_destination(&self, command: &TransferCommand, to_account: &str, amount: &Amount) {
        match self.ledger.credit(to_account, amount).await {
            Ok(destination_balance) => {
                let credit_record = self
                    .transactions
                    .append(TransactionRecord::new(
                        self.refgen.transaction_ref(),
                        to_account.to_string(),
                        TransactionType::Credit,
                        command.mode,
                        amount.clone(),
                        match Balance::new(destination_balance) {
                            Ok(balance) => balance,
                            Err(_) => Balance::zero(),
                        },
                        Some(command.from_account.clone()),
                        Some(format!("Transfer from {}", command.from_account)),
                    ))
                    .await;

                if let Ok(destination) = self.accounts.get(to_account).await {
                    self.notify_customer(destination.customer_id, |user_id| {
                        Notification::transaction_alert(
                            user_id,
                            to_account,
                            &amount.to_string(),
                            "credit",
                        )
                    })
                    .await;
                }
                tracing::debug!(reference = %credit_record.reference_number, "destination credited");
            }
            Err(err) => {
                tracing::warn!(
                    to_account,
                    error = %err,
                    "destination credit failed after debit; reversing"
                );
                self.reverse_debit(command, amount).await;
            }
        }
    }

    async fn reverse_debit(&self, command: &TransferCommand, amount: &Amount) {
        match self.ledger.credit(&command.from_account, amount).await {
            Ok(source_balance) => {
                let record = TransactionRecord::new(
                    self.refgen.transaction_ref(),
                    command.from_account.clone(),
                    TransactionType::Credit,
                    command.mode,
                    amount.clone(),
                    match Balance::new(source_balance) {
                        Ok(balance) => balance,
                        Err(_) => Balance::zero(),
                    },
                    command.to_account.clone(),
                    Some("Transfer reversal: destination could not be credited".to_string()),
                )
                .with_status(TransactionStatus::Reversed);
                self.transactions.append(record).await;

                self.audit.record(
                    AuditRecord::new(AuditAction::TransferReversed, "transaction")
                        .resource_id(command.from_account.clone()),
                );
            }
            Err(err) => {
                // Source also became non-creditable; leave a PENDING record
                // for reconciliation instead of dropping the funds movement.
                tracing::error!(
                    from = %command.from_account,
                    error = %err,
                    "reversal credit failed; recording pending reconciliation"
                );
                let record = TransactionRecord::new(
                    self.refgen.transaction_ref(),
                    command.from_account.clone(),
                    TransactionType::Credit,
                    command.mode,
                    amount.clone(),
                    Balance::zero(),
                    command.to_account.clone(),
                    Some("Transfer reversal pending reconciliation".to_string()),
                )
                .with_status(TransactionStatus::Pending);
                self.transactions.append(record).await;
            }
        }
    }

    /// Notification emission is fire-and-forget: a missing customer is
    /// logged, never surfaced.
    async fn notify_customer<F>(&self, customer_id: uuid::Uuid, build: F)
    where
        F: FnOnce(uuid::Uuid) -> Notification,
    {
        match self.customers.get(customer_id).await {
            Ok(customer) => self.notifier.notify(build(customer.user_id)),
            Err(err) => {
                tracing::warn!(%customer_id, error = %err, "skipping notification");
            }
        }
    }
}
