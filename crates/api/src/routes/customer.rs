//! Route definitions for customers.

use axum::routing::get;
use axum::Router;

use crate::handlers::customer;
use crate::state::AppState;

/// Customer routes, nested under `/customers`.
///
/// ```text
/// GET    /        list_customers (supports ?q=)
/// POST   /        create_customer
/// GET    /{id}    get_customer
/// PUT    /{id}    update_customer
/// DELETE /{id}    delete_customer
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(customer::list_customers).post(customer::create_customer),
        )
        .route(
            "/{id}",
            get(customer::get_customer)
                .put(customer::update_customer)
                .delete(customer::delete_customer),
        )
}
