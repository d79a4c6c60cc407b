use axum::Router;

use crate::state::AppState;

mod dto;
pub mod handlers;
pub mod pricing;
pub mod repo;
pub mod services;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
