//! Postgres-backed card store.
//!
//! The (suit, rank) uniqueness invariant is enforced by a unique index, so a
//! violating write fails atomically inside the database with no partial
//! write; when two inserts race, exactly one commits.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | StoreError | Scenario |
//! |------------|----------------------|------------|----------|
//! | Database (unique violation) | `23505` | `DuplicateKey` | Two cards sharing one (suit, rank) pair |
//! | Database (other) | Any other | `Backend` | Other database errors |
//! | Pool / network / decode | N/A | `Backend` | Connection failures, corrupt rows, etc. |

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use cardbox_core::{Card, CardFilter, CardId, CardPatch, NewCard, Rank, Suit};

use super::r#trait::{CardStore, FindOptions, SortOrder, StoreError, StoreResult};

const SELECT_COLUMNS: &str = "id, suit, rank, value, description, created_at, updated_at";

/// Durable card store on a SQLx Postgres pool.
///
/// The pool is thread-safe; the store holds no other state.
#[derive(Debug, Clone)]
pub struct PostgresCardStore {
    pool: PgPool,
}

impl PostgresCardStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `cards` table and its unique (suit, rank) index if absent.
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS cards (
                id UUID PRIMARY KEY,
                suit TEXT NOT NULL,
                rank TEXT NOT NULL,
                value DOUBLE PRECISION NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        sqlx::query(
            "CREATE UNIQUE INDEX IF NOT EXISTS cards_suit_rank_key ON cards (suit, rank)",
        )
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }
}

fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    if err
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation())
    {
        StoreError::DuplicateKey
    } else {
        StoreError::Backend(err.to_string())
    }
}

fn card_from_row(row: &PgRow) -> StoreResult<Card> {
    let decode = |e: sqlx::Error| StoreError::Backend(e.to_string());

    let id: Uuid = row.try_get("id").map_err(decode)?;
    let suit: String = row.try_get("suit").map_err(decode)?;
    let rank: String = row.try_get("rank").map_err(decode)?;
    let value: f64 = row.try_get("value").map_err(decode)?;
    let description: String = row.try_get("description").map_err(decode)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(decode)?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(decode)?;

    let suit: Suit = suit
        .parse()
        .map_err(|_| StoreError::Backend(format!("corrupt row: unknown suit {suit:?}")))?;
    let rank: Rank = rank
        .parse()
        .map_err(|_| StoreError::Backend(format!("corrupt row: unknown rank {rank:?}")))?;

    Ok(Card {
        id: CardId::from_uuid(id),
        suit,
        rank,
        value,
        description,
        created_at,
        updated_at,
    })
}

/// `ORDER BY` fragment for a sort order. `COLLATE "C"` pins the label sorts
/// to plain byte order so they match the in-memory store regardless of the
/// database locale.
fn order_clause(sort: SortOrder) -> &'static str {
    match sort {
        SortOrder::CreatedDesc => "ORDER BY created_at DESC, id DESC",
        SortOrder::RankLabelAsc => r#"ORDER BY rank COLLATE "C" ASC, suit COLLATE "C" ASC"#,
        SortOrder::SuitLabelAsc => r#"ORDER BY suit COLLATE "C" ASC, rank COLLATE "C" ASC"#,
    }
}

#[async_trait]
impl CardStore for PostgresCardStore {
    async fn insert(&self, card: NewCard) -> StoreResult<Card> {
        let id = CardId::new();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO cards (id, suit, rank, value, description, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $6)",
        )
        .bind(id.as_uuid())
        .bind(card.suit.label())
        .bind(card.rank.label())
        .bind(card.value)
        .bind(&card.description)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(Card {
            id,
            suit: card.suit,
            rank: card.rank,
            value: card.value,
            description: card.description,
            created_at: now,
            updated_at: now,
        })
    }

    async fn find(&self, filter: &CardFilter, options: FindOptions) -> StoreResult<Vec<Card>> {
        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM cards \
             WHERE ($1::text IS NULL OR suit = $1) AND ($2::text IS NULL OR rank = $2) \
             {} OFFSET $3 LIMIT $4",
            order_clause(options.sort),
        );

        let rows = sqlx::query(&sql)
            .bind(filter.suit.map(|s| s.label()))
            .bind(filter.rank.map(|r| r.label()))
            .bind(i64::try_from(options.skip).unwrap_or(i64::MAX))
            .bind(options.limit.map(|l| i64::try_from(l).unwrap_or(i64::MAX)))
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        rows.iter().map(card_from_row).collect()
    }

    async fn find_by_id(&self, id: CardId) -> StoreResult<Option<Card>> {
        let row = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM cards WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(card_from_row).transpose()
    }

    async fn update(&self, id: CardId, patch: CardPatch) -> StoreResult<Option<Card>> {
        let row = sqlx::query(&format!(
            "UPDATE cards SET \
                suit = COALESCE($2::text, suit), \
                rank = COALESCE($3::text, rank), \
                value = COALESCE($4::double precision, value), \
                description = COALESCE($5::text, description), \
                updated_at = $6 \
             WHERE id = $1 RETURNING {SELECT_COLUMNS}"
        ))
        .bind(id.as_uuid())
        .bind(patch.suit.map(|s| s.label()))
        .bind(patch.rank.map(|r| r.label()))
        .bind(patch.value)
        .bind(patch.description.as_deref())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(card_from_row).transpose()
    }

    async fn delete(&self, id: CardId) -> StoreResult<Option<Card>> {
        let row = sqlx::query(&format!(
            "DELETE FROM cards WHERE id = $1 RETURNING {SELECT_COLUMNS}"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(card_from_row).transpose()
    }

    async fn count(&self, filter: &CardFilter) -> StoreResult<u64> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS total FROM cards \
             WHERE ($1::text IS NULL OR suit = $1) AND ($2::text IS NULL OR rank = $2)",
        )
        .bind(filter.suit.map(|s| s.label()))
        .bind(filter.rank.map(|r| r.label()))
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let total: i64 = row
            .try_get("total")
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(total.max(0) as u64)
    }
}
