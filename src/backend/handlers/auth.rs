use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth;
use crate::backend::error::{ApiError, ApiResult};
use crate::backend::extract::CurrentUser;
use crate::backend::AppState;
use crate::database::db::queries;
use crate::database::models::User;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let email = normalize_email(&payload.email);
    if email.is_empty() || !email.contains('@') {
        return Err(ApiError::Validation(
            "a valid email address is required".into(),
        ));
    }
    if payload.password.chars().count() < 8 {
        return Err(ApiError::Validation(
            "password must be at least 8 characters".into(),
        ));
    }
    let display_name = payload
        .display_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty());

    let password_hash = auth::hash_password(&payload.password)?;
    let user = match queries::create_user(&state.db, &email, &password_hash, display_name).await {
        Ok(user) => user,
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            return Err(ApiError::Conflict("email already registered".into()));
        }
        Err(other) => return Err(other.into()),
    };

    tracing::info!(user_id = user.user_id, "user registered");
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let email = normalize_email(&payload.email);
    let Some((user, password_hash)) = queries::get_user_credentials(&state.db, &email).await?
    else {
        return Err(ApiError::InvalidCredentials);
    };
    if !auth::verify_password(&payload.password, &password_hash)? {
        return Err(ApiError::InvalidCredentials);
    }

    let token = auth::generate_token();
    let now = Utc::now();
    let expires_at = auth::session_expiry(now, state.session_ttl_days);
    let session = queries::create_session(&state.db, user.user_id, &token, now, expires_at).await?;

    Ok(Json(LoginResponse {
        token,
        expires_at: session.expires_at,
        user,
    }))
}

pub async fn logout(
    State(state): State<AppState>,
    current: CurrentUser,
) -> ApiResult<StatusCode> {
    queries::delete_session(&state.db, &current.token).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn me(current: CurrentUser) -> Json<User> {
    Json(current.user)
}
