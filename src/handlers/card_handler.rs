//! Card issuance
//!
//! The clear card number exists only inside `issue`; what the store keeps is
//! the masked form and a digest.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::audit::{AuditAction, AuditRecord, AuditSink};
use crate::domain::{Card, CardType, OperationContext};
use crate::error::{CoreError, CoreResult};
use crate::notify::{Notification, NotificationSink};
use crate::refgen::RefGen;
use crate::store::{AccountRepository, CardRepository, CustomerRepository, Store};

pub struct CardHandler {
    cards: CardRepository,
    accounts: AccountRepository,
    customers: CustomerRepository,
    refgen: Arc<RefGen>,
    notifier: Arc<dyn NotificationSink>,
    audit: Arc<dyn AuditSink>,
}

impl CardHandler {
    pub fn new(
        store: Store,
        refgen: Arc<RefGen>,
        notifier: Arc<dyn NotificationSink>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            cards: store.cards(),
            accounts: store.accounts(),
            customers: store.customers(),
            refgen,
            notifier,
            audit,
        }
    }

    /// Issue a card against an account the requester owns.
    ///
    /// At most one card of each type per account; credit cards additionally
    /// require approved KYC and carry a credit limit.
    pub async fn issue(
        &self,
        account_number: &str,
        card_type: CardType,
        requester: uuid::Uuid,
        credit_limit: Option<Decimal>,
        ctx: &OperationContext,
    ) -> CoreResult<Card> {
        let account = self.accounts.get(account_number).await?;
        if account.customer_id != requester {
            return Err(CoreError::Unauthorized(
                "account does not belong to this customer".to_string(),
            ));
        }
        if !account.is_active() {
            return Err(CoreError::AccountNotActive);
        }

        let customer = self.customers.get(account.customer_id).await?;
        if card_type == CardType::Credit && !customer.is_kyc_approved() {
            return Err(CoreError::KycNotApproved);
        }
        let credit_limit = match card_type {
            CardType::Credit => Some(credit_limit.unwrap_or_else(|| Decimal::from(50000))),
            CardType::Debit => None,
        };

        let card_number = self.refgen.card_number();
        let card = Card::new(
            &card_number,
            account_number.to_string(),
            card_type,
            customer.full_name(),
            credit_limit,
        );
        let card = self.cards.insert(card).await?;

        self.notifier.notify(Notification::card_issued(
            customer.user_id,
            card.id,
            &card.masked_number,
        ));
        self.audit.record(
            AuditRecord::new(AuditAction::CardIssued, "card")
                .actor(ctx.actor_user_id)
                .resource_id(card.id.to_string())
                .details(serde_json::json!({
                    "account": account_number,
                    "card_type": card.card_type,
                })),
        );

        tracing::info!(masked = %card.masked_number, "card issued");
        Ok(card)
    }

    pub async fn list_for_account(&self, account_number: &str) -> Vec<Card> {
        self.cards.list_by_account(account_number).await
    }
}
