//! Route definitions for part suppliers.

use axum::routing::get;
use axum::Router;

use crate::handlers::supplier;
use crate::state::AppState;

/// Supplier routes, nested under `/suppliers`.
///
/// ```text
/// GET    /        list_suppliers
/// POST   /        create_supplier
/// GET    /{id}    get_supplier
/// PUT    /{id}    update_supplier
/// DELETE /{id}    delete_supplier
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(supplier::list_suppliers).post(supplier::create_supplier),
        )
        .route(
            "/{id}",
            get(supplier::get_supplier)
                .put(supplier::update_supplier)
                .delete(supplier::delete_supplier),
        )
}
