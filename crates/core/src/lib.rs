//! `cardbox-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod card;
pub mod error;
pub mod id;

pub use card::{Card, CardFilter, CardPatch, NewCard, Rank, Suit};
pub use error::{DomainError, DomainResult};
pub use id::CardId;
