//! `cardbox-store` — the record store boundary.
//!
//! Defines the storage abstraction the card service talks to, plus the two
//! implementations: an in-memory store for tests/dev and a Postgres-backed
//! store for durable deployments.

pub mod card_store;

pub use card_store::{
    CardStore, FindOptions, InMemoryCardStore, PostgresCardStore, SortOrder, StoreError,
    StoreResult,
};
