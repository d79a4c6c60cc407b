use axum::{
    extract::{Query, State},
    response::Redirect,
    routing::{get, post},
    Form, Json, Router,
};
use tracing::{info, instrument};

use super::dto::{
    BookingFormView, BookingSubmission, BookingView, CategoryRate, ConfirmForm, ConfirmationView,
    PaymentQuery, PaymentView,
};
use super::pricing::Category;
use super::repo::Booking;
use super::services;
use crate::auth::extractors::CurrentUser;
use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/booking", get(booking_form).post(create_booking))
        .route("/payment", get(show_payment).post(submit_payment))
        .route("/payment/confirm", post(confirm_payment))
        .route("/my-bookings", get(my_bookings))
}

pub async fn booking_form(_user: CurrentUser) -> Json<BookingFormView> {
    let categories = Category::ALL
        .iter()
        .map(|c| CategoryRate {
            category: c.as_str(),
            base_rate: c.base_rate(),
        })
        .collect();
    Json(BookingFormView { categories })
}

#[instrument(skip(state, form))]
pub async fn create_booking(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(form): Form<BookingSubmission>,
) -> Result<Redirect, ApiError> {
    let booking = services::place_booking(&state.db, user.user_id, &form).await?;
    info!(
        booking_id = booking.id,
        user_id = user.user_id,
        total_price = booking.total_price,
        "booking created"
    );
    Ok(Redirect::to(&format!("/payment?booking_id={}", booking.id)))
}

#[instrument(skip(state))]
pub async fn show_payment(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<PaymentQuery>,
) -> Result<Json<PaymentView>, ApiError> {
    let booking_id = query.booking_id.ok_or_else(no_booking)?;
    let booking = Booking::find_for_user(&state.db, booking_id, user.user_id)
        .await?
        .ok_or_else(no_booking)?;
    Ok(Json(PaymentView::from(booking)))
}

/// POST fallback: the booking form can submit straight to the payment page.
/// When no existing booking resolves, intake runs inline and the row is
/// written here instead.
#[instrument(skip(state, form))]
pub async fn submit_payment(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(form): Form<BookingSubmission>,
) -> Result<Json<PaymentView>, ApiError> {
    if let Some(id) = form.booking_id.as_deref().and_then(|s| s.parse::<i64>().ok()) {
        if let Some(booking) = Booking::find_for_user(&state.db, id, user.user_id).await? {
            return Ok(Json(PaymentView::from(booking)));
        }
    }

    let booking = services::place_booking(&state.db, user.user_id, &form).await?;
    info!(
        booking_id = booking.id,
        user_id = user.user_id,
        "booking created at payment step"
    );
    Ok(Json(PaymentView::from(booking)))
}

#[instrument(skip(state))]
pub async fn confirm_payment(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(form): Form<ConfirmForm>,
) -> Result<Json<ConfirmationView>, ApiError> {
    let booking_id = form
        .booking_id
        .ok_or_else(|| ApiError::NotFound("Invalid booking.".into()))?;
    let booking = Booking::find_for_user(&state.db, booking_id, user.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Invalid booking.".into()))?;

    // Simulated payment: once the booking is found it cannot fail, and the
    // status field stays untouched.
    info!(
        booking_id = booking.id,
        user_id = user.user_id,
        "payment confirmed"
    );
    Ok(Json(ConfirmationView {
        message: "Payment successful! Your booking is confirmed.",
        booking: booking.into(),
    }))
}

#[instrument(skip(state))]
pub async fn my_bookings(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<BookingView>>, ApiError> {
    let bookings = Booking::list_for_user(&state.db, user.user_id).await?;
    Ok(Json(bookings.into_iter().map(BookingView::from).collect()))
}

fn no_booking() -> ApiError {
    ApiError::NotFound("No booking found to pay for.".into())
}
