use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use cardbox_core::{CardId, Rank, Suit};

use crate::app::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_card).get(list_cards))
        .route("/suit/:suit", get(cards_by_suit))
        .route("/rank/:rank", get(cards_by_rank))
        .route("/:id", get(get_card).put(update_card).delete(delete_card))
}

pub async fn create_card(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateCardRequest>,
) -> axum::response::Response {
    match services.cards.create(body).await {
        Ok(card) => (
            StatusCode::CREATED,
            Json(serde_json::json!({
                "message": "Card created successfully",
                "card": card,
            })),
        )
            .into_response(),
        Err(e) => errors::error_to_response(e),
    }
}

pub async fn list_cards(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::ListCardsQuery>,
) -> axum::response::Response {
    match services.cards.list(query).await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => errors::error_to_response(e),
    }
}

pub async fn get_card(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CardId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::error_to_response(e),
    };

    match services.cards.get(id).await {
        Ok(card) => (StatusCode::OK, Json(card)).into_response(),
        Err(e) => errors::error_to_response(e),
    }
}

pub async fn cards_by_suit(
    Extension(services): Extension<Arc<AppServices>>,
    Path(suit): Path<String>,
) -> axum::response::Response {
    let suit: Suit = match suit.parse() {
        Ok(v) => v,
        Err(e) => return errors::error_to_response(e),
    };

    match services.cards.by_suit(suit).await {
        Ok(cards) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "suit": suit,
                "count": cards.len(),
                "cards": cards,
            })),
        )
            .into_response(),
        Err(e) => errors::error_to_response(e),
    }
}

pub async fn cards_by_rank(
    Extension(services): Extension<Arc<AppServices>>,
    Path(rank): Path<String>,
) -> axum::response::Response {
    let rank: Rank = match rank.parse() {
        Ok(v) => v,
        Err(e) => return errors::error_to_response(e),
    };

    match services.cards.by_rank(rank).await {
        Ok(cards) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "rank": rank,
                "count": cards.len(),
                "cards": cards,
            })),
        )
            .into_response(),
        Err(e) => errors::error_to_response(e),
    }
}

pub async fn update_card(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateCardRequest>,
) -> axum::response::Response {
    let id: CardId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::error_to_response(e),
    };

    match services.cards.update(id, body).await {
        Ok(card) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "Card updated successfully",
                "card": card,
            })),
        )
            .into_response(),
        Err(e) => errors::error_to_response(e),
    }
}

pub async fn delete_card(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CardId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::error_to_response(e),
    };

    match services.cards.delete(id).await {
        Ok(card) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "Card deleted successfully",
                "card": card,
            })),
        )
            .into_response(),
        Err(e) => errors::error_to_response(e),
    }
}
