use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use cardbox_core::{Card, CardFilter, CardId, CardPatch, NewCard};

use super::r#trait::{CardStore, FindOptions, SortOrder, StoreError, StoreResult};

/// In-memory card store.
///
/// Intended for tests/dev. Uniqueness is enforced by scanning under the write
/// lock, which gives the same observable semantics as the Postgres unique
/// index: exactly one of two racing inserts on a (suit, rank) pair wins.
#[derive(Debug, Default)]
pub struct InMemoryCardStore {
    cards: RwLock<HashMap<CardId, Card>>,
}

impl InMemoryCardStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn sort(cards: &mut [Card], sort: SortOrder) {
        match sort {
            // CardId is a UUIDv7, so it breaks ties between same-millisecond
            // creations in insertion order.
            SortOrder::CreatedDesc => {
                cards.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
            }
            SortOrder::RankLabelAsc => {
                cards.sort_by(|a, b| {
                    (a.rank.label(), a.suit.label()).cmp(&(b.rank.label(), b.suit.label()))
                });
            }
            SortOrder::SuitLabelAsc => {
                cards.sort_by(|a, b| {
                    (a.suit.label(), a.rank.label()).cmp(&(b.suit.label(), b.rank.label()))
                });
            }
        }
    }
}

#[async_trait]
impl CardStore for InMemoryCardStore {
    async fn insert(&self, card: NewCard) -> StoreResult<Card> {
        let mut cards = self
            .cards
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        if cards
            .values()
            .any(|existing| existing.suit == card.suit && existing.rank == card.rank)
        {
            return Err(StoreError::DuplicateKey);
        }

        let now = Utc::now();
        let record = Card {
            id: CardId::new(),
            suit: card.suit,
            rank: card.rank,
            value: card.value,
            description: card.description,
            created_at: now,
            updated_at: now,
        };
        cards.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find(&self, filter: &CardFilter, options: FindOptions) -> StoreResult<Vec<Card>> {
        let cards = self
            .cards
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        let mut matched: Vec<Card> = cards
            .values()
            .filter(|card| filter.matches(card))
            .cloned()
            .collect();
        Self::sort(&mut matched, options.sort);

        let skip = usize::try_from(options.skip).unwrap_or(usize::MAX);
        let limit = options
            .limit
            .map(|l| usize::try_from(l).unwrap_or(usize::MAX))
            .unwrap_or(usize::MAX);
        Ok(matched.into_iter().skip(skip).take(limit).collect())
    }

    async fn find_by_id(&self, id: CardId) -> StoreResult<Option<Card>> {
        let cards = self
            .cards
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        Ok(cards.get(&id).cloned())
    }

    async fn update(&self, id: CardId, patch: CardPatch) -> StoreResult<Option<Card>> {
        let mut cards = self
            .cards
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        let Some(current) = cards.get(&id) else {
            return Ok(None);
        };

        let mut updated = current.clone();
        patch.apply(&mut updated, Utc::now());

        // Moving the card onto an occupied (suit, rank) pair violates the
        // uniqueness invariant, same as the unique index would on write.
        if cards.values().any(|other| {
            other.id != id && other.suit == updated.suit && other.rank == updated.rank
        }) {
            return Err(StoreError::DuplicateKey);
        }

        cards.insert(id, updated.clone());
        Ok(Some(updated))
    }

    async fn delete(&self, id: CardId) -> StoreResult<Option<Card>> {
        let mut cards = self
            .cards
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        Ok(cards.remove(&id))
    }

    async fn count(&self, filter: &CardFilter) -> StoreResult<u64> {
        let cards = self
            .cards
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        Ok(cards.values().filter(|card| filter.matches(card)).count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardbox_core::{Rank, Suit};
    use proptest::prelude::*;

    fn new_card(suit: Suit, rank: Rank, value: f64) -> NewCard {
        NewCard {
            suit,
            rank,
            value,
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_suit_rank() {
        let store = InMemoryCardStore::new();
        store
            .insert(new_card(Suit::Hearts, Rank::Ace, 11.0))
            .await
            .unwrap();

        // Differing value/description must not matter.
        let err = store
            .insert(NewCard {
                suit: Suit::Hearts,
                rank: Rank::Ace,
                value: 1.0,
                description: "low ace".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey));

        assert_eq!(store.count(&CardFilter::default()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn update_applies_partial_fields_and_refreshes_updated_at() {
        let store = InMemoryCardStore::new();
        let card = store
            .insert(new_card(Suit::Clubs, Rank::Seven, 7.0))
            .await
            .unwrap();

        let updated = store
            .update(
                card.id,
                CardPatch {
                    value: Some(17.0),
                    ..CardPatch::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.value, 17.0);
        assert_eq!(updated.suit, Suit::Clubs);
        assert_eq!(updated.rank, Rank::Seven);
        assert_eq!(updated.created_at, card.created_at);
        assert!(updated.updated_at >= card.updated_at);
    }

    #[tokio::test]
    async fn update_onto_occupied_pair_is_a_duplicate() {
        let store = InMemoryCardStore::new();
        store
            .insert(new_card(Suit::Hearts, Rank::Ace, 11.0))
            .await
            .unwrap();
        let other = store
            .insert(new_card(Suit::Spades, Rank::Ace, 11.0))
            .await
            .unwrap();

        let err = store
            .update(
                other.id,
                CardPatch {
                    suit: Some(Suit::Hearts),
                    ..CardPatch::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey));

        // No partial write.
        let unchanged = store.find_by_id(other.id).await.unwrap().unwrap();
        assert_eq!(unchanged.suit, Suit::Spades);
    }

    #[tokio::test]
    async fn update_keeping_own_pair_is_not_a_conflict() {
        let store = InMemoryCardStore::new();
        let card = store
            .insert(new_card(Suit::Diamonds, Rank::King, 13.0))
            .await
            .unwrap();

        let updated = store
            .update(
                card.id,
                CardPatch {
                    suit: Some(Suit::Diamonds),
                    rank: Some(Rank::King),
                    description: Some("royal".to_string()),
                    ..CardPatch::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.description, "royal");
    }

    #[tokio::test]
    async fn delete_returns_removed_record_once() {
        let store = InMemoryCardStore::new();
        let card = store
            .insert(new_card(Suit::Spades, Rank::Two, 2.0))
            .await
            .unwrap();

        let removed = store.delete(card.id).await.unwrap().unwrap();
        assert_eq!(removed.id, card.id);
        assert!(store.delete(card.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_sorts_by_rank_label_lexicographically() {
        let store = InMemoryCardStore::new();
        for rank in [Rank::Two, Rank::Ace, Rank::Ten, Rank::Queen] {
            store
                .insert(new_card(Suit::Hearts, rank, 0.0))
                .await
                .unwrap();
        }

        let filter = CardFilter {
            suit: Some(Suit::Hearts),
            rank: None,
        };
        let cards = store
            .find(&filter, FindOptions::all(SortOrder::RankLabelAsc))
            .await
            .unwrap();
        let labels: Vec<&str> = cards.iter().map(|c| c.rank.label()).collect();
        assert_eq!(labels, ["10", "2", "Ace", "Queen"]);
    }

    #[tokio::test]
    async fn find_sorts_by_suit_label_lexicographically() {
        let store = InMemoryCardStore::new();
        for suit in [Suit::Spades, Suit::Clubs, Suit::Hearts, Suit::Diamonds] {
            store.insert(new_card(suit, Rank::Nine, 9.0)).await.unwrap();
        }

        let filter = CardFilter {
            suit: None,
            rank: Some(Rank::Nine),
        };
        let cards = store
            .find(&filter, FindOptions::all(SortOrder::SuitLabelAsc))
            .await
            .unwrap();
        let labels: Vec<&str> = cards.iter().map(|c| c.suit.label()).collect();
        assert_eq!(labels, ["Clubs", "Diamonds", "Hearts", "Spades"]);
    }

    proptest! {
        // Windowing invariants: a page never exceeds its limit, and walking
        // consecutive pages covers every matching record exactly once.
        #[test]
        fn paging_covers_all_records_exactly_once(
            count in 0usize..40,
            limit in 1u64..12,
        ) {
            let rt = tokio::runtime::Builder::new_current_thread()
                .build()
                .unwrap();
            rt.block_on(async {
                let store = InMemoryCardStore::new();
                let mut inserted = 0u64;
                'outer: for suit in Suit::ALL {
                    for rank in Rank::ALL {
                        if inserted as usize >= count {
                            break 'outer;
                        }
                        store
                            .insert(new_card(suit, rank, inserted as f64))
                            .await
                            .unwrap();
                        inserted += 1;
                    }
                }

                let filter = CardFilter::default();
                let total = store.count(&filter).await.unwrap();
                prop_assert_eq!(total, inserted);

                let mut seen = Vec::new();
                let mut skip = 0u64;
                loop {
                    let page = store
                        .find(&filter, FindOptions::page(skip, limit, SortOrder::CreatedDesc))
                        .await
                        .unwrap();
                    prop_assert!(page.len() as u64 <= limit);
                    if page.is_empty() {
                        break;
                    }
                    skip += page.len() as u64;
                    seen.extend(page.into_iter().map(|c| c.id));
                }

                prop_assert_eq!(seen.len() as u64, total);
                seen.sort_unstable();
                seen.dedup();
                prop_assert_eq!(seen.len() as u64, total);
                Ok(())
            })?;
        }
    }
}
