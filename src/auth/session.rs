use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

/// Server-side session row backing the opaque cookie token. The token is the
/// only thing the client ever holds; identity stays on our side.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    pub user_name: String,
    pub created_at: OffsetDateTime,
    pub expires_at: OffsetDateTime,
}

impl Session {
    /// Start a session for a user: mint an opaque token and persist it.
    pub async fn create(
        db: &PgPool,
        user_id: i64,
        user_name: &str,
        ttl_minutes: i64,
    ) -> sqlx::Result<Session> {
        let token = Uuid::new_v4().to_string();
        let expires_at = OffsetDateTime::now_utc() + Duration::minutes(ttl_minutes);
        sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (token, user_id, user_name, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING token, user_id, user_name, created_at, expires_at
            "#,
        )
        .bind(&token)
        .bind(user_id)
        .bind(user_name)
        .bind(expires_at)
        .fetch_one(db)
        .await
    }

    /// Resolve a token to its session, ignoring expired rows.
    pub async fn find_valid(db: &PgPool, token: &str) -> sqlx::Result<Option<Session>> {
        sqlx::query_as::<_, Session>(
            r#"
            SELECT token, user_id, user_name, created_at, expires_at
            FROM sessions
            WHERE token = $1 AND expires_at > now()
            "#,
        )
        .bind(token)
        .fetch_optional(db)
        .await
    }

    /// Drop a session. Deleting an unknown token is a no-op, which makes
    /// logout idempotent.
    pub async fn delete(db: &PgPool, token: &str) -> sqlx::Result<()> {
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(db)
            .await?;
        Ok(())
    }
}

/// Set-Cookie value handing the session token to the browser.
pub fn session_cookie(name: &str, token: &str, ttl_minutes: i64) -> String {
    format!(
        "{name}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        ttl_minutes * 60
    )
}

/// Set-Cookie value that expires the session cookie immediately.
pub fn clear_session_cookie(name: &str) -> String {
    format!("{name}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Pull the session token out of a Cookie header value.
pub fn token_from_cookies<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_found_among_other_cookies() {
        let header = "theme=dark; travelgo_session=abc-123; lang=en";
        assert_eq!(
            token_from_cookies(header, "travelgo_session"),
            Some("abc-123")
        );
    }

    #[test]
    fn prefix_cookie_names_do_not_match() {
        let header = "travelgo_session_old=zzz";
        assert_eq!(token_from_cookies(header, "travelgo_session"), None);
    }

    #[test]
    fn missing_cookie_yields_none() {
        assert_eq!(token_from_cookies("theme=dark", "travelgo_session"), None);
    }

    #[test]
    fn session_cookie_sets_scope_and_ttl() {
        let cookie = session_cookie("travelgo_session", "tok", 60);
        assert!(cookie.starts_with("travelgo_session=tok"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Max-Age=3600"));
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let cookie = clear_session_cookie("travelgo_session");
        assert!(cookie.starts_with("travelgo_session=;"));
        assert!(cookie.contains("Max-Age=0"));
    }
}
