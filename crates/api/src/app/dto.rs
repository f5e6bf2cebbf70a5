use serde::{Deserialize, Serialize};

use cardbox_core::Card;

// -------------------------
// Request DTOs
// -------------------------

/// Body for POST /cards. Required fields arrive as `Option` so that a missing
/// field becomes a validation error in the service, not a deserialize reject.
#[derive(Debug, Default, Deserialize)]
pub struct CreateCardRequest {
    pub suit: Option<String>,
    pub rank: Option<String>,
    pub value: Option<f64>,
    pub description: Option<String>,
}

/// Body for PUT /cards/:id; only supplied fields are applied.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCardRequest {
    pub suit: Option<String>,
    pub rank: Option<String>,
    pub value: Option<f64>,
    pub description: Option<String>,
}

/// Query string for GET /cards.
#[derive(Debug, Default, Deserialize)]
pub struct ListCardsQuery {
    pub suit: Option<String>,
    pub rank: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Clone, Serialize)]
pub struct Pagination {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub pages: u64,
}

/// One page of the card listing: `{cards, pagination}`.
#[derive(Debug, Serialize)]
pub struct CardPage {
    pub cards: Vec<Card>,
    pub pagination: Pagination,
}
