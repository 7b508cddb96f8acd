use axum::{
    extract::{FromRef, State},
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest},
        jwt::JwtKeys,
        password::verify_password,
        throttle::MAX_FAILED_ATTEMPTS,
    },
    error::ApiError,
    state::AppState,
    users::repo::User,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Login flow, in order: throttle fast-reject, credential check, then either
/// a failure increment (fail-closed when it crosses the limit) or a counter
/// reset plus a signed token.
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if !state.throttle.check_allowed(&payload.email) {
        warn!(email = %payload.email, "login rejected, too many failed attempts");
        return Err(ApiError::TooManyAttempts);
    }

    let user = User::find_by_email(&state.db, &payload.email).await?;
    let verified = match &user {
        Some(u) => verify_password(&payload.password, &u.password_hash)?,
        None => false,
    };

    // Unknown email and wrong password count (and report) identically, so
    // the response never reveals whether the email is registered.
    let Some(user) = user.filter(|_| verified) else {
        let count = state.throttle.record_failure(&payload.email);
        if count >= MAX_FAILED_ATTEMPTS {
            warn!(email = %payload.email, count, "failed-login limit reached");
            return Err(ApiError::TooManyAttempts);
        }
        warn!(email = %payload.email, count, "login invalid credentials");
        return Err(ApiError::InvalidCredentials);
    };

    state.throttle.record_success(&payload.email);

    let keys = JwtKeys::from_ref(&state);
    let access_token = keys.sign(user.id)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(AuthResponse {
        access_token,
        user: user.into(),
    }))
}
