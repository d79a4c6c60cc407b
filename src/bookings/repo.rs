use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};

/// Booking ledger row. Immutable once written; never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: i64,
    pub user_id: i64,
    pub destination: String,
    pub travel_date: Date,
    pub passengers: i32,
    pub total_price: i64,
    pub status: String,
    pub created_at: OffsetDateTime,
}

/// Validated booking ready to persist. Both entry points produce this shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    pub destination: String,
    pub travel_date: Date,
    pub passengers: i32,
    pub total_price: i64,
}

impl Booking {
    /// Insert a draft for the user; status defaults to `confirmed`.
    pub async fn insert(db: &PgPool, user_id: i64, draft: &BookingDraft) -> sqlx::Result<Booking> {
        sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (user_id, destination, travel_date, passengers, total_price)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, destination, travel_date, passengers, total_price, status, created_at
            "#,
        )
        .bind(user_id)
        .bind(&draft.destination)
        .bind(draft.travel_date)
        .bind(draft.passengers)
        .bind(draft.total_price)
        .fetch_one(db)
        .await
    }

    /// Owner-filtered lookup: a booking belonging to someone else is
    /// indistinguishable from a missing one.
    pub async fn find_for_user(
        db: &PgPool,
        booking_id: i64,
        user_id: i64,
    ) -> sqlx::Result<Option<Booking>> {
        sqlx::query_as::<_, Booking>(
            r#"
            SELECT id, user_id, destination, travel_date, passengers, total_price, status, created_at
            FROM bookings
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(booking_id)
        .bind(user_id)
        .fetch_optional(db)
        .await
    }

    /// The caller's bookings, newest first.
    pub async fn list_for_user(db: &PgPool, user_id: i64) -> sqlx::Result<Vec<Booking>> {
        sqlx::query_as::<_, Booking>(
            r#"
            SELECT id, user_id, destination, travel_date, passengers, total_price, status, created_at
            FROM bookings
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await
    }
}
