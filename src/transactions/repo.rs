use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Ledger entry. `from_user` is a bare reference; the store does not enforce
/// that it points at an existing user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Transaction {
    pub id: Uuid,
    pub description: String,
    pub from_user: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub amount: f64,
}

impl Transaction {
    pub async fn list_all(db: &PgPool) -> sqlx::Result<Vec<Transaction>> {
        sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, description, from_user, "timestamp", amount
            FROM transactions
            ORDER BY "timestamp"
            "#,
        )
        .fetch_all(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> sqlx::Result<Option<Transaction>> {
        sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, description, from_user, "timestamp", amount
            FROM transactions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Create a ledger entry; a missing `timestamp` defaults to now.
    pub async fn create(
        db: &PgPool,
        description: &str,
        from_user: Uuid,
        timestamp: Option<OffsetDateTime>,
        amount: f64,
    ) -> sqlx::Result<Transaction> {
        sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (description, from_user, "timestamp", amount)
            VALUES ($1, $2, COALESCE($3, now()), $4)
            RETURNING id, description, from_user, "timestamp", amount
            "#,
        )
        .bind(description)
        .bind(from_user)
        .bind(timestamp)
        .bind(amount)
        .fetch_one(db)
        .await
    }

    /// Only description and amount are mutable after creation.
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        description: &str,
        amount: f64,
    ) -> sqlx::Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE transactions SET description = $2, amount = $3
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(description)
        .bind(amount)
        .execute(db)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> sqlx::Result<u64> {
        let result = sqlx::query(r#"DELETE FROM transactions WHERE id = $1"#)
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }
}
