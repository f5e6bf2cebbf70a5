//! The Card entity and its value sets.

use chrono::{DateTime, Utc};
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::id::CardId;

/// Card suit. Serialized by its capitalized label ("Hearts", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    /// The wire label, also the key the store sorts by in suit-ordered queries.
    pub fn label(&self) -> &'static str {
        match self {
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
            Suit::Spades => "Spades",
        }
    }
}

impl core::fmt::Display for Suit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Suit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Suit::ALL
            .into_iter()
            .find(|suit| suit.label() == s)
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "suit must be one of: Hearts, Diamonds, Clubs, Spades (got {s:?})"
                ))
            })
    }
}

/// Card rank. Serialized by its label ("Ace", "2", ..., "10", "Jack", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// The wire label. Suit-scoped listings sort on this label, not on game
    /// rank, so "10" orders before "2".
    pub fn label(&self) -> &'static str {
        match self {
            Rank::Ace => "Ace",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
        }
    }
}

impl core::fmt::Display for Rank {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Rank {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rank::ALL
            .into_iter()
            .find(|rank| rank.label() == s)
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "rank must be one of: Ace, 2..10, Jack, Queen, King (got {s:?})"
                ))
            })
    }
}

/// A persisted card record.
///
/// `id` and both timestamps are assigned by the store; `updated_at` is
/// refreshed on every mutation. The pair (suit, rank) is unique across all
/// live records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub suit: Suit,
    pub rank: Rank,
    pub value: f64,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a card; the store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCard {
    pub suit: Suit,
    pub rank: Rank,
    pub value: f64,
    pub description: String,
}

/// Partial update: only `Some` fields are applied. `updated_at` is refreshed
/// even when every field is `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardPatch {
    pub suit: Option<Suit>,
    pub rank: Option<Rank>,
    pub value: Option<f64>,
    pub description: Option<String>,
}

impl CardPatch {
    pub fn apply(&self, card: &mut Card, now: DateTime<Utc>) {
        if let Some(suit) = self.suit {
            card.suit = suit;
        }
        if let Some(rank) = self.rank {
            card.rank = rank;
        }
        if let Some(value) = self.value {
            card.value = value;
        }
        if let Some(description) = &self.description {
            card.description = description.clone();
        }
        card.updated_at = now;
    }
}

/// Equality filter over cards; `None` fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardFilter {
    pub suit: Option<Suit>,
    pub rank: Option<Rank>,
}

impl CardFilter {
    pub fn matches(&self, card: &Card) -> bool {
        self.suit.is_none_or(|suit| card.suit == suit)
            && self.rank.is_none_or(|rank| card.rank == rank)
    }
}
