//! The card service: one stateless function per operation.
//!
//! Validation happens here, before any store call — required-field presence
//! and suit/rank value sets are checked in the service layer rather than
//! delegated to store schema. The store handle is injected, never global.

use std::sync::Arc;

use cardbox_core::{Card, CardFilter, CardId, CardPatch, DomainError, DomainResult, NewCard, Rank, Suit};
use cardbox_store::{CardStore, FindOptions, SortOrder, StoreError};

use crate::app::dto::{CardPage, CreateCardRequest, ListCardsQuery, Pagination, UpdateCardRequest};

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 10;

pub struct CardService {
    store: Arc<dyn CardStore>,
}

impl CardService {
    pub fn new(store: Arc<dyn CardStore>) -> Self {
        Self { store }
    }

    /// Create a card. suit, rank and value are required; (suit, rank) must
    /// not collide with a live record.
    pub async fn create(&self, req: CreateCardRequest) -> DomainResult<Card> {
        let (Some(suit), Some(rank), Some(value)) = (req.suit, req.rank, req.value) else {
            return Err(DomainError::validation("suit, rank, and value are required"));
        };
        let suit: Suit = suit.parse()?;
        let rank: Rank = rank.parse()?;

        self.store
            .insert(NewCard {
                suit,
                rank,
                value,
                description: req.description.unwrap_or_default(),
            })
            .await
            .map_err(store_error)
    }

    /// List cards, newest first, with optional suit/rank equality filters.
    pub async fn list(&self, query: ListCardsQuery) -> DomainResult<CardPage> {
        let filter = CardFilter {
            suit: query.suit.map(|s| s.parse::<Suit>()).transpose()?,
            rank: query.rank.map(|r| r.parse::<Rank>()).transpose()?,
        };

        // No declared upper bound; values below 1 clamp to 1.
        let page = query.page.unwrap_or(DEFAULT_PAGE).max(1) as u64;
        let limit = query.limit.unwrap_or(DEFAULT_LIMIT).max(1) as u64;
        let skip = (page - 1).saturating_mul(limit);

        let cards = self
            .store
            .find(&filter, FindOptions::page(skip, limit, SortOrder::CreatedDesc))
            .await
            .map_err(store_error)?;
        let total = self.store.count(&filter).await.map_err(store_error)?;

        Ok(CardPage {
            cards,
            pagination: paginate(total, page, limit),
        })
    }

    pub async fn get(&self, id: CardId) -> DomainResult<Card> {
        self.store
            .find_by_id(id)
            .await
            .map_err(store_error)?
            .ok_or(DomainError::NotFound)
    }

    /// All cards of one suit, ordered by rank label ascending (lexicographic
    /// on the label, so "10" sorts before "2").
    pub async fn by_suit(&self, suit: Suit) -> DomainResult<Vec<Card>> {
        let filter = CardFilter {
            suit: Some(suit),
            rank: None,
        };
        self.store
            .find(&filter, FindOptions::all(SortOrder::RankLabelAsc))
            .await
            .map_err(store_error)
    }

    /// All cards of one rank, ordered by suit label ascending.
    pub async fn by_rank(&self, rank: Rank) -> DomainResult<Vec<Card>> {
        let filter = CardFilter {
            suit: None,
            rank: Some(rank),
        };
        self.store
            .find(&filter, FindOptions::all(SortOrder::SuitLabelAsc))
            .await
            .map_err(store_error)
    }

    /// Apply only the supplied fields; `updated_at` is always refreshed.
    /// Uniqueness stays store-enforced on the write.
    pub async fn update(&self, id: CardId, req: UpdateCardRequest) -> DomainResult<Card> {
        let patch = CardPatch {
            suit: req.suit.map(|s| s.parse::<Suit>()).transpose()?,
            rank: req.rank.map(|r| r.parse::<Rank>()).transpose()?,
            value: req.value,
            description: req.description,
        };

        self.store
            .update(id, patch)
            .await
            .map_err(store_error)?
            .ok_or(DomainError::NotFound)
    }

    /// Remove a card, returning the removed record's content.
    pub async fn delete(&self, id: CardId) -> DomainResult<Card> {
        self.store
            .delete(id)
            .await
            .map_err(store_error)?
            .ok_or(DomainError::NotFound)
    }
}

fn store_error(err: StoreError) -> DomainError {
    match err {
        StoreError::DuplicateKey => {
            DomainError::conflict("Card with this suit and rank already exists")
        }
        StoreError::Backend(msg) => DomainError::Store(msg),
    }
}

fn paginate(total: u64, page: u64, limit: u64) -> Pagination {
    Pagination {
        total,
        page,
        limit,
        pages: total.div_ceil(limit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_is_ceil_of_total_over_limit() {
        assert_eq!(paginate(25, 1, 10).pages, 3);
        assert_eq!(paginate(30, 1, 10).pages, 3);
        assert_eq!(paginate(31, 1, 10).pages, 4);
        assert_eq!(paginate(0, 1, 10).pages, 0);
        assert_eq!(paginate(1, 1, 1).pages, 1);
    }

    #[tokio::test]
    async fn create_with_missing_fields_never_reaches_the_store() {
        let store = Arc::new(cardbox_store::InMemoryCardStore::new());
        let service = CardService::new(store.clone());

        for req in [
            CreateCardRequest::default(),
            CreateCardRequest {
                suit: Some("Hearts".to_string()),
                rank: Some("Ace".to_string()),
                ..CreateCardRequest::default()
            },
            CreateCardRequest {
                suit: Some("Hearts".to_string()),
                value: Some(11.0),
                ..CreateCardRequest::default()
            },
        ] {
            let err = service.create(req).await.unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }

        assert_eq!(
            store.count(&CardFilter::default()).await.unwrap(),
            0,
            "validation failures must not write"
        );
    }

    #[tokio::test]
    async fn create_with_unknown_suit_is_a_validation_error() {
        let service = CardService::new(Arc::new(cardbox_store::InMemoryCardStore::new()));
        let err = service
            .create(CreateCardRequest {
                suit: Some("Stars".to_string()),
                rank: Some("Ace".to_string()),
                value: Some(1.0),
                description: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
