use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{IntoResponse, Redirect},
    routing::get,
    Form, Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginForm, RegisterForm},
        password::{hash_password, verify_password, DUMMY_HASH},
        repo::User,
        session::{self, Session},
    },
    error::{require_field, ApiError},
    pages::PageView,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", get(register_page).post(register))
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout))
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub async fn register_page() -> Json<PageView> {
    Json(PageView {
        page: "register",
        title: "Create your TravelGo account",
    })
}

pub async fn login_page() -> Json<PageView> {
    Json(PageView {
        page: "login",
        title: "Login to TravelGo",
    })
}

#[instrument(skip(state, form))]
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Redirect, ApiError> {
    let name = require_field(form.name, "name")?;
    let email = require_field(form.email, "email")?.to_lowercase();
    let password = form.password.unwrap_or_default();
    let confirm = form.confirm_password.unwrap_or_default();

    if !is_valid_email(&email) {
        warn!(%email, "invalid email");
        return Err(ApiError::Validation("Invalid email".into()));
    }
    if password.is_empty() {
        return Err(ApiError::Validation("password is required".into()));
    }
    if password != confirm {
        warn!(%email, "passwords do not match");
        return Err(ApiError::Validation("Passwords do not match!".into()));
    }

    if User::find_by_email(&state.db, &email).await?.is_some() {
        warn!(%email, "email already registered");
        return Err(ApiError::DuplicateEmail);
    }

    let hash = hash_password(&password)?;

    let user = User::create(&state.db, &name, &email, &hash)
        .await
        .map_err(|e| {
            // the unique index is the authority when two registrations race
            if matches!(&e, sqlx::Error::Database(db) if db.is_unique_violation()) {
                ApiError::DuplicateEmail
            } else {
                ApiError::from(e)
            }
        })?;

    info!(user_id = user.id, email = %user.email, "user registered");
    Ok(Redirect::to("/login"))
}

#[instrument(skip(state, form))]
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<impl IntoResponse, ApiError> {
    let email = require_field(form.email, "email")?.to_lowercase();
    let password = form.password.unwrap_or_default();

    let user = match User::find_by_email(&state.db, &email).await? {
        Some(u) => u,
        None => {
            // burn a verification so unknown emails cost the same as bad passwords
            let _ = verify_password(&password, DUMMY_HASH);
            warn!(%email, "login unknown email");
            return Err(ApiError::AuthFailure);
        }
    };

    if !verify_password(&password, &user.password_hash)? {
        warn!(%email, user_id = user.id, "login invalid password");
        return Err(ApiError::AuthFailure);
    }

    let session = Session::create(
        &state.db,
        user.id,
        &user.name,
        state.config.session.ttl_minutes,
    )
    .await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        session::session_cookie(
            &state.config.session.cookie_name,
            &session.token,
            state.config.session.ttl_minutes,
        )
        .parse()
        .unwrap(),
    );

    info!(user_id = user.id, email = %user.email, "user logged in");
    Ok((headers, Redirect::to("/")))
}

#[instrument(skip(state, headers))]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(token) = headers
        .get(header::COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(|c| session::token_from_cookies(c, &state.config.session.cookie_name))
    {
        Session::delete(&state.db, token).await?;
        info!("session cleared");
    }

    let mut out = HeaderMap::new();
    out.insert(
        header::SET_COOKIE,
        session::clear_session_cookie(&state.config.session.cookie_name)
            .parse()
            .unwrap(),
    );
    Ok((out, Redirect::to("/")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plausible_emails() {
        assert!(is_valid_email("alice@x.com"));
        assert!(is_valid_email("a.b+c@sub.example.org"));
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(!is_valid_email("alice"));
        assert!(!is_valid_email("alice@"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("a b@x.com"));
        assert!(!is_valid_email("alice@x"));
    }
}
