use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use cardbox_core::{Card, CardFilter, CardId, CardPatch, NewCard};

/// Storage-level failure.
///
/// `DuplicateKey` is the uniqueness invariant firing: two live records would
/// share one (suit, rank) pair. Everything else is an opaque backend failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("a card with this suit and rank already exists")]
    DuplicateKey,

    #[error("store backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Sort order for filtered finds.
///
/// `RankLabelAsc`/`SuitLabelAsc` sort on the serialized label, not on game
/// rank ("10" orders before "2"). That matches the service's wire contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Newest first (creation time descending).
    CreatedDesc,
    /// Rank label ascending, lexicographic.
    RankLabelAsc,
    /// Suit label ascending, lexicographic.
    SuitLabelAsc,
}

/// Skip/limit/sort options for [`CardStore::find`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FindOptions {
    pub skip: u64,
    /// `None` means unbounded.
    pub limit: Option<u64>,
    pub sort: SortOrder,
}

impl FindOptions {
    pub fn all(sort: SortOrder) -> Self {
        Self { skip: 0, limit: None, sort }
    }

    pub fn page(skip: u64, limit: u64, sort: SortOrder) -> Self {
        Self { skip, limit: Some(limit), sort }
    }
}

/// The record store holding card documents.
///
/// Implementations must enforce the (suit, rank) uniqueness invariant
/// atomically on every write path: a violating `insert` or `update` fails
/// with [`StoreError::DuplicateKey`] and leaves no partial write. When
/// concurrent writers race on the same pair, exactly one wins.
#[async_trait]
pub trait CardStore: Send + Sync {
    /// Persist a new card; the store assigns id and both timestamps.
    async fn insert(&self, card: NewCard) -> StoreResult<Card>;

    /// Return matching cards, sorted then windowed by skip/limit.
    async fn find(&self, filter: &CardFilter, options: FindOptions) -> StoreResult<Vec<Card>>;

    async fn find_by_id(&self, id: CardId) -> StoreResult<Option<Card>>;

    /// Apply the supplied fields to an existing card, refreshing `updated_at`.
    /// Returns `None` when no record exists for `id`.
    async fn update(&self, id: CardId, patch: CardPatch) -> StoreResult<Option<Card>>;

    /// Remove a card, returning the removed record's content.
    async fn delete(&self, id: CardId) -> StoreResult<Option<Card>>;

    /// Count cards matching the filter.
    async fn count(&self, filter: &CardFilter) -> StoreResult<u64>;
}

#[async_trait]
impl<S> CardStore for Arc<S>
where
    S: CardStore + ?Sized,
{
    async fn insert(&self, card: NewCard) -> StoreResult<Card> {
        (**self).insert(card).await
    }

    async fn find(&self, filter: &CardFilter, options: FindOptions) -> StoreResult<Vec<Card>> {
        (**self).find(filter, options).await
    }

    async fn find_by_id(&self, id: CardId) -> StoreResult<Option<Card>> {
        (**self).find_by_id(id).await
    }

    async fn update(&self, id: CardId, patch: CardPatch) -> StoreResult<Option<Card>> {
        (**self).update(id, patch).await
    }

    async fn delete(&self, id: CardId) -> StoreResult<Option<Card>> {
        (**self).delete(id).await
    }

    async fn count(&self, filter: &CardFilter) -> StoreResult<u64> {
        (**self).count(filter).await
    }
}
