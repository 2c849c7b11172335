//! Handlers for the spare-part inventory.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use fixdesk_core::error::CoreError;
use fixdesk_core::types::DbId;
use fixdesk_db::models::part::{CreatePart, UpdatePart};
use fixdesk_db::repositories::PartRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for listing parts.
#[derive(Debug, Deserialize)]
pub struct PartListParams {
    pub phone_model_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for the low-stock listing.
#[derive(Debug, Deserialize)]
pub struct LowStockParams {
    /// Stock threshold; parts at or below it are reported. Default 5.
    pub threshold: Option<i32>,
}

/// Request body for stock adjustments.
#[derive(Debug, Deserialize)]
pub struct AdjustStockRequest {
    /// Positive for restock, negative for consumption.
    pub delta: i32,
}

/// POST /api/v1/parts
pub async fn create_part(
    State(state): State<AppState>,
    Json(input): Json<CreatePart>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let part = PartRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: part })))
}

/// GET /api/v1/parts
pub async fn list_parts(
    State(state): State<AppState>,
    Query(params): Query<PartListParams>,
) -> AppResult<impl IntoResponse> {
    let parts = PartRepo::list(
        &state.pool,
        params.phone_model_id,
        params.limit,
        params.offset,
    )
    .await?;
    Ok(Json(DataResponse { data: parts }))
}

/// GET /api/v1/parts/low-stock
pub async fn list_low_stock(
    State(state): State<AppState>,
    Query(params): Query<LowStockParams>,
) -> AppResult<impl IntoResponse> {
    let parts = PartRepo::list_low_stock(&state.pool, params.threshold.unwrap_or(5)).await?;
    Ok(Json(DataResponse { data: parts }))
}

/// GET /api/v1/parts/{id}
pub async fn get_part(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let part = PartRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Part", id }))?;
    Ok(Json(DataResponse { data: part }))
}

/// PUT /api/v1/parts/{id}
pub async fn update_part(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePart>,
) -> AppResult<impl IntoResponse> {
    let part = PartRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Part", id }))?;
    Ok(Json(DataResponse { data: part }))
}

/// POST /api/v1/parts/{id}/stock
pub async fn adjust_stock(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AdjustStockRequest>,
) -> AppResult<impl IntoResponse> {
    let part = PartRepo::adjust_stock(&state.pool, id, input.delta)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Part", id }))?;
    Ok(Json(DataResponse { data: part }))
}

/// DELETE /api/v1/parts/{id}
pub async fn delete_part(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = PartRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Part", id }));
    }
    Ok(StatusCode::NO_CONTENT)
}
