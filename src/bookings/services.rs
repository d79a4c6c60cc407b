use sqlx::PgPool;
use time::{macros::format_description, Date};

use super::dto::BookingSubmission;
use super::pricing::{self, Category};
use super::repo::{Booking, BookingDraft};
use crate::error::{require_field, ApiError};

/// Validate, price and persist a submission for the user. Both the booking
/// form and the payment fallback go through here, so the two entry points
/// cannot drift apart in the record they write.
pub async fn place_booking(
    db: &PgPool,
    user_id: i64,
    form: &BookingSubmission,
) -> Result<Booking, ApiError> {
    let draft = validate_submission(form)?;
    let booking = Booking::insert(db, user_id, &draft).await?;
    Ok(booking)
}

/// Intake validation. Pure: no state is touched until a draft exists.
pub fn validate_submission(form: &BookingSubmission) -> Result<BookingDraft, ApiError> {
    let category = Category::parse(form.category.as_deref().unwrap_or("train").trim());

    let origin = require_field(form.origin.clone(), "origin")?;
    let destination = require_field(form.destination.clone(), "destination")?;
    let travel_date = parse_travel_date(form.travel_date.as_deref())?;

    let passengers = if category == Category::Hotel {
        1 // hotels book per room; the form's passenger count is ignored
    } else {
        parse_passengers(form.passengers.as_deref())?
    };

    let hotel_name = if category == Category::Hotel {
        form.hotel_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    } else {
        None
    };

    Ok(BookingDraft {
        destination: compose_destination(&origin, &destination, hotel_name),
        travel_date,
        passengers,
        total_price: pricing::quote(category, passengers),
    })
}

/// `"<origin> → <destination>"`, with the hotel name appended for lodging.
/// The composite is the only place origin and hotel name survive.
fn compose_destination(origin: &str, destination: &str, hotel_name: Option<&str>) -> String {
    match hotel_name {
        Some(hotel) => format!("{origin} → {destination} - {hotel}"),
        None => format!("{origin} → {destination}"),
    }
}

fn parse_travel_date(raw: Option<&str>) -> Result<Date, ApiError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::Validation("travel_date is required".into()))?;
    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .map_err(|_| ApiError::Validation(format!("invalid travel date: {raw}")))
}

fn parse_passengers(raw: Option<&str>) -> Result<i32, ApiError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::Validation("passengers is required".into()))?;
    let count: i32 = raw
        .parse()
        .map_err(|_| ApiError::Validation(format!("invalid passenger count: {raw}")))?;
    if count < 1 {
        return Err(ApiError::Validation(
            "passengers must be at least 1".into(),
        ));
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn train_submission() -> BookingSubmission {
        BookingSubmission {
            category: Some("train".into()),
            origin: Some("Delhi".into()),
            destination: Some("Mumbai".into()),
            travel_date: Some("2024-06-01".into()),
            passengers: Some("2".into()),
            ..Default::default()
        }
    }

    #[test]
    fn train_booking_composes_and_prices() {
        let draft = validate_submission(&train_submission()).unwrap();
        assert_eq!(draft.destination, "Delhi → Mumbai");
        assert_eq!(draft.travel_date, date!(2024 - 06 - 01));
        assert_eq!(draft.passengers, 2);
        assert_eq!(draft.total_price, 1000);
    }

    #[test]
    fn category_defaults_to_train() {
        let mut form = train_submission();
        form.category = None;
        let draft = validate_submission(&form).unwrap();
        assert_eq!(draft.total_price, 1000);
    }

    #[test]
    fn destination_composite_without_hotel() {
        let mut form = train_submission();
        form.origin = Some("NYC".into());
        form.destination = Some("LA".into());
        let draft = validate_submission(&form).unwrap();
        assert_eq!(draft.destination, "NYC → LA");
    }

    #[test]
    fn hotel_booking_appends_hotel_name() {
        let form = BookingSubmission {
            category: Some("hotel".into()),
            origin: Some("NYC".into()),
            destination: Some("LA".into()),
            travel_date: Some("2024-06-01".into()),
            hotel_name: Some("Grand Hotel".into()),
            ..Default::default()
        };
        let draft = validate_submission(&form).unwrap();
        assert_eq!(draft.destination, "NYC → LA - Grand Hotel");
    }

    #[test]
    fn hotel_ignores_submitted_passenger_count() {
        let form = BookingSubmission {
            category: Some("hotel".into()),
            origin: Some("NYC".into()),
            destination: Some("LA".into()),
            travel_date: Some("2024-06-01".into()),
            passengers: Some("4".into()),
            hotel_name: Some("Grand Hotel".into()),
            ..Default::default()
        };
        let draft = validate_submission(&form).unwrap();
        assert_eq!(draft.passengers, 1);
        assert_eq!(draft.total_price, 1500);
    }

    #[test]
    fn hotel_name_is_dropped_for_transport_categories() {
        let mut form = train_submission();
        form.hotel_name = Some("Grand Hotel".into());
        let draft = validate_submission(&form).unwrap();
        assert_eq!(draft.destination, "Delhi → Mumbai");
    }

    #[test]
    fn unknown_category_prices_as_train() {
        let mut form = train_submission();
        form.category = Some("boat".into());
        let draft = validate_submission(&form).unwrap();
        assert_eq!(draft.total_price, 1000);
    }

    #[test]
    fn missing_destination_is_rejected() {
        let mut form = train_submission();
        form.destination = None;
        assert!(matches!(
            validate_submission(&form),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn missing_origin_is_rejected() {
        let mut form = train_submission();
        form.origin = Some("   ".into());
        assert!(matches!(
            validate_submission(&form),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn unparsable_travel_date_is_rejected() {
        for bad in ["01-06-2024", "2024/06/01", "not-a-date", "2024-13-01"] {
            let mut form = train_submission();
            form.travel_date = Some(bad.into());
            assert!(
                matches!(validate_submission(&form), Err(ApiError::Validation(_))),
                "{bad} should not parse"
            );
        }
    }

    #[test]
    fn passengers_required_for_transport() {
        let mut form = train_submission();
        form.passengers = None;
        assert!(matches!(
            validate_submission(&form),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn non_positive_passenger_counts_are_rejected() {
        for bad in ["0", "-1", "two"] {
            let mut form = train_submission();
            form.passengers = Some(bad.into());
            assert!(
                matches!(validate_submission(&form), Err(ApiError::Validation(_))),
                "{bad} should be rejected"
            );
        }
    }
}
