use axum::Router;

use crate::state::AppState;

pub mod handlers;

pub use handlers::PageView;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
