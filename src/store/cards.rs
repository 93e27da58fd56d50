//! Card repository

use crate::domain::Card;
use crate::error::{CoreError, CoreResult};

use super::Store;

#[derive(Debug, Clone)]
pub struct CardRepository {
    store: Store,
}

impl CardRepository {
    pub(crate) fn new(store: Store) -> Self {
        Self { store }
    }

    /// Insert a card. At most one card per (account, type).
    pub async fn insert(&self, card: Card) -> CoreResult<Card> {
        let mut cards = self.store.inner.cards.write().await;
        let duplicate = cards
            .values()
            .any(|c| c.account_number == card.account_number && c.card_type == card.card_type);
        if duplicate {
            return Err(CoreError::DuplicateResource(format!(
                "{:?} card for account {}",
                card.card_type, card.account_number
            )));
        }
        cards.insert(card.id, card.clone());
        Ok(card)
    }

    pub async fn list_by_account(&self, account_number: &str) -> Vec<Card> {
        let cards = self.store.inner.cards.read().await;
        cards
            .values()
            .filter(|c| c.account_number == account_number)
            .cloned()
            .collect()
    }
}
