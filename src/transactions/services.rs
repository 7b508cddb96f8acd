use sqlx::PgPool;
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;

use super::repo::Transaction;

pub async fn list_transactions(db: &PgPool) -> Result<Vec<Transaction>, ApiError> {
    Ok(Transaction::list_all(db).await?)
}

/// Creates a ledger entry for `from_user`. The user id is stored as given;
/// nothing verifies that it references an existing user.
/// TODO: product call pending on rejecting entries for unknown users.
pub async fn create_transaction(
    db: &PgPool,
    from_user: Uuid,
    description: &str,
    amount: f64,
    timestamp: Option<OffsetDateTime>,
) -> Result<Transaction, ApiError> {
    let tx = Transaction::create(db, description, from_user, timestamp, amount).await?;
    info!(transaction_id = %tx.id, from_user = %from_user, "transaction created");
    Ok(tx)
}

pub async fn update_transaction(
    db: &PgPool,
    id: Uuid,
    description: &str,
    amount: f64,
) -> Result<(), ApiError> {
    if Transaction::find_by_id(db, id).await?.is_none() {
        return Err(ApiError::NotFound("Transaction"));
    }
    Transaction::update(db, id, description, amount).await?;
    info!(transaction_id = %id, "transaction updated");
    Ok(())
}

pub async fn delete_transaction(db: &PgPool, id: Uuid) -> Result<(), ApiError> {
    if Transaction::find_by_id(db, id).await?.is_none() {
        return Err(ApiError::NotFound("Transaction"));
    }
    Transaction::delete(db, id).await?;
    info!(transaction_id = %id, "transaction deleted");
    Ok(())
}
