//! Card record store boundary.
//!
//! The service layer consumes persistence only through the [`CardStore`]
//! trait: insert with a uniqueness check, filtered find with skip/limit/sort,
//! find/update/delete by id, and a filtered count. All consistency (notably
//! the (suit, rank) uniqueness invariant) lives behind this boundary.

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryCardStore;
pub use postgres::PostgresCardStore;
pub use r#trait::{CardStore, FindOptions, SortOrder, StoreError, StoreResult};
