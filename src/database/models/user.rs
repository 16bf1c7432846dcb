use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Account owner. The password hash never leaves the queries layer, so it
/// is not part of this struct.
#[derive(FromRow, Debug, Clone, Serialize)]
pub struct User {
    pub user_id: i64,
    pub email: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Bearer-token session. Expiry is checked against the clock on every
/// authenticated request; stale rows are deleted when they are seen.
#[derive(FromRow, Debug, Clone)]
pub struct Session {
    pub session_id: i64,
    pub user_id: i64,
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
