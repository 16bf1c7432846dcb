use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use chrono::Utc;

use crate::backend::error::ApiError;
use crate::backend::AppState;
use crate::database::db::queries;
use crate::database::models::User;

/// The authenticated caller, resolved from the `Authorization: Bearer`
/// header. Carries the token so logout can revoke the session it came in
/// on.
pub struct CurrentUser {
    pub user: User,
    pub token: String,
}

fn bearer_token(header: &str) -> Option<&str> {
    header.strip_prefix("Bearer ").filter(|token| !token.is_empty())
}

#[axum::async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;
        let token = bearer_token(header).ok_or(ApiError::Unauthorized)?;

        let now = Utc::now();
        let session = match queries::find_session(&state.db, token).await? {
            Some(session) => session,
            None => {
                // Unknown token; a good moment to sweep out dead sessions.
                queries::delete_expired_sessions(&state.db, now).await?;
                return Err(ApiError::Unauthorized);
            }
        };

        if session.expires_at <= now {
            queries::delete_session(&state.db, token).await?;
            return Err(ApiError::Unauthorized);
        }

        let user = queries::get_user(&state.db, session.user_id)
            .await?
            .ok_or(ApiError::Unauthorized)?;

        Ok(CurrentUser {
            user,
            token: token.to_string(),
        })
    }
}
