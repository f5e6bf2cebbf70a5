use std::sync::Arc;

use cardbox_store::{CardStore, InMemoryCardStore, PostgresCardStore};

#[tokio::main]
async fn main() {
    cardbox_observability::init();

    let store: Arc<dyn CardStore> = match std::env::var("DATABASE_URL") {
        Ok(url) => {
            let pool = sqlx::PgPool::connect(&url)
                .await
                .expect("failed to connect to postgres");
            let store = PostgresCardStore::new(pool);
            store
                .ensure_schema()
                .await
                .expect("failed to prepare cards table");
            Arc::new(store)
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set; using in-memory store (records are not durable)");
            Arc::new(InMemoryCardStore::new())
        }
    };

    let app = cardbox_api::app::build_app(store);

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {addr}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
