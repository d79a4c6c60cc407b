use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use super::session::{self, Session};
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller, resolved from the session cookie. Handlers take this
/// as an argument, so identity is always an explicit value rather than
/// ambient state. Rejection redirects to the login page without touching
/// anything.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: i64,
    pub name: String,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let cookies = parts
            .headers
            .get(axum::http::header::COOKIE)
            .and_then(|h| h.to_str().ok())
            .ok_or(ApiError::RequiresLogin)?;

        let token = session::token_from_cookies(cookies, &state.config.session.cookie_name)
            .ok_or(ApiError::RequiresLogin)?;

        let session = Session::find_valid(&state.db, token)
            .await?
            .ok_or(ApiError::RequiresLogin)?;

        Ok(CurrentUser {
            user_id: session.user_id,
            name: session.user_name,
        })
    }
}
