use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repo::User;

/// Public projection of a user; the password hash never leaves the service.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
        }
    }
}

/// Query parameters for `GET /users`. Camel-case `sortBy`/`searchTerm` are
/// accepted as aliases.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(alias = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(alias = "searchTerm")]
    pub search: Option<String>,
}

fn default_page() -> usize {
    1
}
fn default_limit() -> usize {
    10
}

/// Pagination envelope returned by `GET /users`.
#[derive(Debug, Serialize)]
pub struct UserPage {
    pub page_number: usize,
    pub page_size: usize,
    pub count: usize,
    pub total_pages: usize,
    pub has_previous_page: bool,
    pub has_next_page: bool,
    pub data: Vec<PublicUser>,
}

/// Request body for user creation.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// Request body for profile update: name and email only.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: String,
}

/// Request body for `POST /users/:id/change-password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}
