use serde::Deserialize;
use time::OffsetDateTime;

/// Request body for creating a ledger entry. The originating user comes from
/// the path, not the body.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    pub description: String,
    pub amount: f64,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub timestamp: Option<OffsetDateTime>,
}

/// Request body for updating a ledger entry.
#[derive(Debug, Deserialize)]
pub struct UpdateTransactionRequest {
    pub description: String,
    pub amount: f64,
}
