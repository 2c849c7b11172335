pub mod customer;
pub mod dashboard;
pub mod health;
pub mod part;
pub mod phone;
pub mod repair;
pub mod supplier;
pub mod warranty;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /customers                      list, create
/// /customers/{id}                 get, update, delete
///
/// /brands                         list, create
/// /brands/{id}                    delete
/// /phone-models                   list, create
/// /phone-models/{id}              get, update, delete
///
/// /suppliers                      list, create
/// /suppliers/{id}                 get, update, delete
///
/// /parts                          list, create
/// /parts/low-stock                low-stock listing
/// /parts/{id}                     get, update, delete
/// /parts/{id}/stock               adjust stock (POST)
///
/// /repairs                        list, create
/// /repairs/{id}                   get, update, delete
/// /repairs/{id}/status            status transition (POST)
/// /repairs/{id}/warranty          covering warranty
///
/// /warranties                     list
/// /warranties/{id}                get
/// /warranties/{id}/rework         start rework (POST)
///
/// /dashboard/stats                aggregate figures
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/customers", customer::router())
        .merge(phone::router())
        .nest("/suppliers", supplier::router())
        .nest("/parts", part::router())
        .nest("/repairs", repair::router())
        .nest("/warranties", warranty::router())
        .nest("/dashboard", dashboard::router())
}
