//! Route definitions for the warranty section.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::warranty;
use crate::state::AppState;

/// Warranty routes, nested under `/warranties`.
///
/// ```text
/// GET    /                 list_warranties
/// GET    /{id}             get_warranty
/// POST   /{id}/rework      start_rework
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(warranty::list_warranties))
        .route("/{id}", get(warranty::get_warranty))
        .route("/{id}/rework", post(warranty::start_rework))
}
