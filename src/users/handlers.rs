use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{auth::jwt::AuthUser, error::ApiError, state::AppState};

use super::dto::{
    ChangePasswordRequest, CreateUserRequest, ListQuery, PublicUser, UpdateUserRequest, UserPage,
};
use super::services;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/users/:id/change-password", post(change_password))
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<UserPage>, ApiError> {
    Ok(Json(services::list_users(&state.db, &query).await?))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<PublicUser>, ApiError> {
    Ok(Json(services::get_user(&state.db, id).await?))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Json(mut payload): Json<CreateUserRequest>,
) -> Result<Json<PublicUser>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if payload.name.trim().is_empty() {
        return Err(ApiError::Validation("Name must not be empty".into()));
    }
    if !services::is_valid_email(&payload.email) {
        return Err(ApiError::Validation("Invalid email".into()));
    }
    if !(6..=32).contains(&payload.password.len()) {
        return Err(ApiError::Validation(
            "Password must be 6 to 32 characters".into(),
        ));
    }
    if payload.password != payload.password_confirm {
        return Err(ApiError::Validation(
            "Password confirmation does not match".into(),
        ));
    }

    let user =
        services::create_user(&state.db, &payload.name, &payload.email, &payload.password).await?;
    Ok(Json(user))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(id): Path<Uuid>,
    Json(mut payload): Json<UpdateUserRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if payload.name.trim().is_empty() {
        return Err(ApiError::Validation("Name must not be empty".into()));
    }
    if !services::is_valid_email(&payload.email) {
        return Err(ApiError::Validation("Invalid email".into()));
    }

    services::update_user(&state.db, id, &payload.name, &payload.email).await?;
    Ok(Json(serde_json::json!({ "id": id })))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    services::delete_user(&state.db, id).await?;
    Ok(Json(serde_json::json!({ "id": id })))
}

#[instrument(skip(state, payload))]
pub async fn change_password(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !(6..=32).contains(&payload.new_password.len()) {
        return Err(ApiError::Validation(
            "Password must be 6 to 32 characters".into(),
        ));
    }

    services::change_password(&state.db, id, &payload.old_password, &payload.new_password).await?;
    Ok(Json(serde_json::json!({ "id": id })))
}
