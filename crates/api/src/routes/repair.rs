//! Route definitions for repair tickets.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::repair;
use crate::state::AppState;

/// Repair routes, nested under `/repairs`.
///
/// ```text
/// GET    /                 list_repairs
/// POST   /                 create_repair
/// GET    /{id}             get_repair
/// PUT    /{id}             update_repair
/// DELETE /{id}             delete_repair
/// POST   /{id}/status      transition_status
/// GET    /{id}/warranty    get_repair_warranty
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(repair::list_repairs).post(repair::create_repair))
        .route(
            "/{id}",
            get(repair::get_repair)
                .put(repair::update_repair)
                .delete(repair::delete_repair),
        )
        .route("/{id}/status", post(repair::transition_status))
        .route("/{id}/warranty", get(repair::get_repair_warranty))
}
