//! Route definitions for brands and phone models.
//!
//! Brands and models are flat sibling resources rather than a nested tree;
//! models filter by brand through a query parameter.

use axum::routing::get;
use axum::Router;

use crate::handlers::phone;
use crate::state::AppState;

/// Brand and phone model routes, merged at the API root.
///
/// ```text
/// GET    /brands              list_brands
/// POST   /brands              create_brand
/// DELETE /brands/{id}         delete_brand
/// GET    /phone-models        list_phone_models (supports ?brand_id=)
/// POST   /phone-models        create_phone_model
/// GET    /phone-models/{id}   get_phone_model
/// PUT    /phone-models/{id}   update_phone_model
/// DELETE /phone-models/{id}   delete_phone_model
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/brands", get(phone::list_brands).post(phone::create_brand))
        .route("/brands/{id}", axum::routing::delete(phone::delete_brand))
        .route(
            "/phone-models",
            get(phone::list_phone_models).post(phone::create_phone_model),
        )
        .route(
            "/phone-models/{id}",
            get(phone::get_phone_model)
                .put(phone::update_phone_model)
                .delete(phone::delete_phone_model),
        )
}
