use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{auth::jwt::AuthUser, error::ApiError, state::AppState};

use super::dto::{CreateTransactionRequest, UpdateTransactionRequest};
use super::repo::Transaction;
use super::services;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/transaksi", get(list_transactions))
        .route(
            "/users/transaksi/:id",
            axum::routing::post(create_transaction)
                .put(update_transaction)
                .delete(delete_transaction),
        )
}

#[instrument(skip(state))]
pub async fn list_transactions(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    Ok(Json(services::list_transactions(&state.db).await?))
}

/// `:id` is the originating user for the new entry.
#[instrument(skip(state, payload))]
pub async fn create_transaction(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(from_user): Path<Uuid>,
    Json(payload): Json<CreateTransactionRequest>,
) -> Result<Json<Transaction>, ApiError> {
    if payload.description.trim().is_empty() {
        return Err(ApiError::Validation("Description must not be empty".into()));
    }

    let tx = services::create_transaction(
        &state.db,
        from_user,
        &payload.description,
        payload.amount,
        payload.timestamp,
    )
    .await?;
    Ok(Json(tx))
}

#[instrument(skip(state, payload))]
pub async fn update_transaction(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTransactionRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if payload.description.trim().is_empty() {
        return Err(ApiError::Validation("Description must not be empty".into()));
    }

    services::update_transaction(&state.db, id, &payload.description, payload.amount).await?;
    Ok(Json(serde_json::json!({ "id": id })))
}

#[instrument(skip(state))]
pub async fn delete_transaction(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    services::delete_transaction(&state.db, id).await?;
    Ok(Json(serde_json::json!({ "id": id })))
}
