//! HTTP API application wiring (Axum router + service wiring).
//!
//! This folder is structured like:
//! - `service.rs`: the card service (validation + store calls, one fn per operation)
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use cardbox_store::CardStore;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod service;

/// Shared per-request services (the store handle is the only state).
pub struct AppServices {
    pub cards: service::CardService,
}

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(store: Arc<dyn CardStore>) -> Router {
    let services = Arc::new(AppServices {
        cards: service::CardService::new(store),
    });

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/cards", routes::cards::router())
        .layer(Extension(services))
}
