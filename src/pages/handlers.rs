use axum::{routing::get, Form, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::auth::handlers::is_valid_email;
use crate::error::{require_field, ApiError};
use crate::state::AppState;

/// Minimal descriptor for pages the frontend renders on its own.
#[derive(Debug, Serialize)]
pub struct PageView {
    pub page: &'static str,
    pub title: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HomeView {
    pub title: &'static str,
    pub tagline: &'static str,
    pub featured_destinations: &'static [&'static str],
}

#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ContactAck {
    pub message: &'static str,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/contact", get(contact_page).post(contact))
}

pub async fn home() -> Json<HomeView> {
    Json(HomeView {
        title: "TravelGo",
        tagline: "Book trains, buses, flights and hotels in one place",
        featured_destinations: &["Delhi", "Mumbai", "Goa", "Jaipur"],
    })
}

pub async fn about() -> Json<PageView> {
    Json(PageView {
        page: "about",
        title: "About TravelGo",
    })
}

pub async fn contact_page() -> Json<PageView> {
    Json(PageView {
        page: "contact",
        title: "Contact TravelGo",
    })
}

/// Messages are acknowledged only; there is no delivery channel.
#[instrument(skip(form))]
pub async fn contact(Form(form): Form<ContactForm>) -> Result<Json<ContactAck>, ApiError> {
    let name = require_field(form.name, "name")?;
    let email = require_field(form.email, "email")?;
    let message = require_field(form.message, "message")?;

    if !is_valid_email(&email) {
        return Err(ApiError::Validation("Invalid email".into()));
    }

    info!(%name, %email, message_len = message.len(), "contact message received");
    Ok(Json(ContactAck {
        message: "Thank you for your message! We will get back to you soon.",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact_form() -> ContactForm {
        ContactForm {
            name: Some("Alice".into()),
            email: Some("alice@x.com".into()),
            message: Some("Hi there".into()),
        }
    }

    #[tokio::test]
    async fn contact_acknowledges_a_complete_message() {
        let Json(ack) = contact(Form(contact_form())).await.unwrap();
        assert!(ack.message.contains("Thank you"));
    }

    #[tokio::test]
    async fn contact_rejects_missing_message() {
        let mut form = contact_form();
        form.message = None;
        assert!(matches!(
            contact(Form(form)).await,
            Err(ApiError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn contact_rejects_malformed_email() {
        let mut form = contact_form();
        form.email = Some("not-an-email".into());
        assert!(matches!(
            contact(Form(form)).await,
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn home_view_serializes_featured_destinations() {
        let view = HomeView {
            title: "TravelGo",
            tagline: "tag",
            featured_destinations: &["Delhi"],
        };
        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("Delhi"));
    }
}
