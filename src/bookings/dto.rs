use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use super::repo::Booking;

/// Raw form fields shared by both booking entry points. Everything arrives as
/// optional text; intake validation decides what is actually required.
#[derive(Debug, Default, Deserialize)]
pub struct BookingSubmission {
    pub booking_id: Option<String>,
    pub category: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub travel_date: Option<String>,
    pub passengers: Option<String>,
    pub hotel_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentQuery {
    pub booking_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ConfirmForm {
    pub booking_id: Option<i64>,
}

/// Booking as shown to its owner.
#[derive(Debug, Serialize)]
pub struct BookingView {
    pub id: i64,
    pub destination: String,
    pub travel_date: Date,
    pub passengers: i32,
    pub total_price: i64,
    pub status: String,
    pub created_at: OffsetDateTime,
}

impl From<Booking> for BookingView {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            destination: b.destination,
            travel_date: b.travel_date,
            passengers: b.passengers,
            total_price: b.total_price,
            status: b.status,
            created_at: b.created_at,
        }
    }
}

/// Rate card backing the booking form.
#[derive(Debug, Serialize)]
pub struct BookingFormView {
    pub categories: Vec<CategoryRate>,
}

#[derive(Debug, Serialize)]
pub struct CategoryRate {
    pub category: &'static str,
    pub base_rate: i64,
}

#[derive(Debug, Serialize)]
pub struct PaymentView {
    pub booking: BookingView,
    pub amount_due: i64,
}

impl From<Booking> for PaymentView {
    fn from(b: Booking) -> Self {
        let amount_due = b.total_price;
        Self {
            booking: b.into(),
            amount_due,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ConfirmationView {
    pub message: &'static str,
    pub booking: BookingView,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn booking_view_serializes_owner_facing_fields() {
        let view = BookingView {
            id: 7,
            destination: "NYC → LA".into(),
            travel_date: date!(2024 - 06 - 01),
            passengers: 2,
            total_price: 1000,
            status: "confirmed".into(),
            created_at: datetime!(2024-05-20 12:00 UTC),
        };

        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("NYC → LA"));
        assert!(json.contains("1000"));
        assert!(json.contains("confirmed"));
    }
}
