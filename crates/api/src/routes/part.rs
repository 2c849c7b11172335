//! Route definitions for spare-part inventory.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::part;
use crate::state::AppState;

/// Part routes, nested under `/parts`.
///
/// The literal `/low-stock` segment is registered before `/{id}` so it is
/// never captured as an id.
///
/// ```text
/// GET    /              list_parts
/// POST   /              create_part
/// GET    /low-stock     list_low_stock
/// GET    /{id}          get_part
/// PUT    /{id}          update_part
/// DELETE /{id}          delete_part
/// POST   /{id}/stock    adjust_stock
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(part::list_parts).post(part::create_part))
        .route("/low-stock", get(part::list_low_stock))
        .route(
            "/{id}",
            get(part::get_part)
                .put(part::update_part)
                .delete(part::delete_part),
        )
        .route("/{id}/stock", post(part::adjust_stock))
}
