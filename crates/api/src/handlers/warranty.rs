//! Handlers for the warranty section.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;

use fixdesk_core::error::CoreError;
use fixdesk_db::repositories::{StartReworkError, WarrantyRepo};

use crate::error::{AppError, AppResult};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/warranties
///
/// List warranties with their repair and customer, newest first.
pub async fn list_warranties(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let warranties = WarrantyRepo::list(&state.pool, params.limit, params.offset).await?;
    Ok(Json(DataResponse { data: warranties }))
}

/// GET /api/v1/warranties/{id}
pub async fn get_warranty(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let warranty = WarrantyRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("warranty '{id}' not found")))?;
    Ok(Json(DataResponse { data: warranty }))
}

/// POST /api/v1/warranties/{id}/rework
///
/// Bring the covered phone back into the shop under warranty: flags the
/// warranty and its repair as reworking.
pub async fn start_rework(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let warranty = WarrantyRepo::start_rework(&state.pool, &id)
        .await
        .map_err(|err| match err {
            StartReworkError::NotFound(_) => AppError::NotFound(err.to_string()),
            StartReworkError::Expired(_) | StartReworkError::AlreadyInRework(_) => {
                AppError::Core(CoreError::Conflict(err.to_string()))
            }
            StartReworkError::Database(source) => AppError::Database(source),
        })?;
    Ok(Json(DataResponse { data: warranty }))
}
