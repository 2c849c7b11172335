//! Handlers for supplier records.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use fixdesk_core::error::CoreError;
use fixdesk_core::types::DbId;
use fixdesk_db::models::supplier::{CreateSupplier, UpdateSupplier};
use fixdesk_db::repositories::SupplierRepo;

use crate::error::{AppError, AppResult};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/suppliers
pub async fn create_supplier(
    State(state): State<AppState>,
    Json(input): Json<CreateSupplier>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let supplier = SupplierRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: supplier })))
}

/// GET /api/v1/suppliers
pub async fn list_suppliers(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let suppliers = SupplierRepo::list(&state.pool, params.limit, params.offset).await?;
    Ok(Json(DataResponse { data: suppliers }))
}

/// GET /api/v1/suppliers/{id}
pub async fn get_supplier(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let supplier = SupplierRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Supplier",
            id,
        }))?;
    Ok(Json(DataResponse { data: supplier }))
}

/// PUT /api/v1/suppliers/{id}
pub async fn update_supplier(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSupplier>,
) -> AppResult<impl IntoResponse> {
    let supplier = SupplierRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Supplier",
            id,
        }))?;
    Ok(Json(DataResponse { data: supplier }))
}

/// DELETE /api/v1/suppliers/{id}
pub async fn delete_supplier(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = SupplierRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Supplier",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
