use lazy_static::lazy_static;
use regex::Regex;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password};
use crate::error::ApiError;

use super::dto::{ListQuery, PublicUser, UserPage};
use super::listing::paginate_users;
use super::repo::User;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// One filtered, sorted, paginated, projected page of users.
pub async fn list_users(db: &PgPool, query: &ListQuery) -> Result<UserPage, ApiError> {
    if query.page == 0 || query.limit == 0 {
        return Err(ApiError::Validation(
            "page and limit must be positive".into(),
        ));
    }
    let users = User::list_all(db).await?;
    Ok(paginate_users(
        users,
        query.page,
        query.limit,
        query.sort_by.as_deref(),
        query.search.as_deref(),
    ))
}

pub async fn get_user(db: &PgPool, id: Uuid) -> Result<PublicUser, ApiError> {
    User::find_by_id(db, id)
        .await?
        .map(PublicUser::from)
        .ok_or(ApiError::NotFound("User"))
}

pub async fn create_user(
    db: &PgPool,
    name: &str,
    email: &str,
    password: &str,
) -> Result<PublicUser, ApiError> {
    if User::find_by_email(db, email).await?.is_some() {
        return Err(ApiError::EmailTaken);
    }

    let hash = hash_password(password)?;
    let user = User::create(db, name, email, &hash).await?;

    info!(user_id = %user.id, email = %user.email, "user created");
    Ok(user.into())
}

pub async fn update_user(db: &PgPool, id: Uuid, name: &str, email: &str) -> Result<(), ApiError> {
    if User::find_by_id(db, id).await?.is_none() {
        return Err(ApiError::NotFound("User"));
    }
    User::update_profile(db, id, name, email).await?;
    info!(user_id = %id, "user updated");
    Ok(())
}

pub async fn delete_user(db: &PgPool, id: Uuid) -> Result<(), ApiError> {
    if User::find_by_id(db, id).await?.is_none() {
        return Err(ApiError::NotFound("User"));
    }
    User::delete(db, id).await?;
    info!(user_id = %id, "user deleted");
    Ok(())
}

/// Verifies the old password before re-hashing and storing the new one.
pub async fn change_password(
    db: &PgPool,
    id: Uuid,
    old_password: &str,
    new_password: &str,
) -> Result<(), ApiError> {
    let user = User::find_by_id(db, id)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    if !verify_password(old_password, &user.password_hash)? {
        return Err(ApiError::InvalidCredentials);
    }

    let hash = hash_password(new_password)?;
    User::update_password(db, id, &hash).await?;

    info!(user_id = %id, "password changed");
    Ok(())
}
