//! Handlers for repair tickets, including the status transition endpoint.
//!
//! The transition endpoint is deliberately different from the rest of the
//! API: per the shop-floor UI contract it always answers 200 with a
//! `{ "status": "success" | "error", "message": ... }` envelope, recovering
//! every failure into a short user-displayable message. The technical error
//! is logged, never surfaced.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use fixdesk_core::error::CoreError;
use fixdesk_core::repair::RepairStatus;
use fixdesk_core::types::DbId;
use fixdesk_db::models::repair::{CreateRepair, RepairFilter, UpdateRepair};
use fixdesk_db::repositories::{CustomerRepo, RepairRepo, TransitionStatusError, WarrantyRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for listing repairs.
#[derive(Debug, Deserialize)]
pub struct RepairListParams {
    pub status: Option<String>,
    pub customer_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// POST /api/v1/repairs
///
/// Create a repair ticket for an existing customer.
pub async fn create_repair(
    State(state): State<AppState>,
    Json(input): Json<CreateRepair>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    CustomerRepo::find_by_id(&state.pool, input.customer_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Customer",
            id: input.customer_id,
        }))?;

    let repair = RepairRepo::create(&state.pool, &input).await?;

    tracing::info!(repair_id = repair.id, ticket_no = %repair.ticket_no, "Repair created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: repair })))
}

/// GET /api/v1/repairs
///
/// The `status` filter must be a known wire token; unknown tokens are a
/// client error rather than a silently empty listing.
pub async fn list_repairs(
    State(state): State<AppState>,
    Query(params): Query<RepairListParams>,
) -> AppResult<impl IntoResponse> {
    let status = match params.status {
        Some(token) => match RepairStatus::parse(&token) {
            Some(status) => Some(status.as_str().to_string()),
            None => {
                return Err(AppError::BadRequest(format!(
                    "unknown repair status '{token}'"
                )));
            }
        },
        None => None,
    };
    let filter = RepairFilter {
        status,
        customer_id: params.customer_id,
    };
    let repairs = RepairRepo::list(&state.pool, &filter, params.limit, params.offset).await?;
    Ok(Json(DataResponse { data: repairs }))
}

/// GET /api/v1/repairs/{id}
pub async fn get_repair(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let repair = RepairRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Repair",
            id,
        }))?;
    Ok(Json(DataResponse { data: repair }))
}

/// PUT /api/v1/repairs/{id}
///
/// Edit repair fields. Status changes are rejected here; they go through
/// the transition endpoint.
pub async fn update_repair(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRepair>,
) -> AppResult<impl IntoResponse> {
    let repair = RepairRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Repair",
            id,
        }))?;
    Ok(Json(DataResponse { data: repair }))
}

/// DELETE /api/v1/repairs/{id}
pub async fn delete_repair(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = RepairRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Repair",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/repairs/{id}/warranty
///
/// The warranty covering this repair, if one has been issued.
pub async fn get_repair_warranty(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let warranty = WarrantyRepo::find_by_repair(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no warranty on file for repair {id}")))?;
    Ok(Json(DataResponse { data: warranty }))
}

// ── Status transition ────────────────────────────────────────────────

/// Request body for the status transition endpoint.
#[derive(Debug, Deserialize)]
pub struct TransitionRequest {
    pub new_status: RepairStatus,
}

/// Response envelope for the status transition endpoint.
#[derive(Debug, Serialize)]
pub struct TransitionResponse {
    pub status: &'static str,
    pub message: String,
}

/// POST /api/v1/repairs/{id}/status
///
/// Apply a status transition. Always answers 200 with a success/error
/// envelope; the caller shows `message` as-is (e.g. in a toast) and may
/// simply retry on error.
pub async fn transition_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<TransitionRequest>,
) -> Json<TransitionResponse> {
    match RepairRepo::transition_status(&state.pool, id, input.new_status).await {
        Ok(outcome) => {
            tracing::info!(
                repair_id = id,
                new_status = input.new_status.as_str(),
                "Repair status transitioned"
            );
            Json(TransitionResponse {
                status: "success",
                message: outcome.message(),
            })
        }
        Err(err) => {
            let message = match &err {
                // Rejected requests: the error text itself is the
                // user-displayable explanation.
                TransitionStatusError::RepairNotFound(_)
                | TransitionStatusError::NotAllowed(_)
                | TransitionStatusError::WarrantyAlreadyIssued(_)
                | TransitionStatusError::WarrantyMissing(_) => {
                    tracing::warn!(repair_id = id, error = %err, "Transition rejected");
                    err.to_string()
                }
                // Datastore failures: fixed retry messages, details logged.
                TransitionStatusError::StatusWrite(source) => {
                    tracing::error!(repair_id = id, error = %source, "Status write failed");
                    "status update failed, please retry".to_string()
                }
                TransitionStatusError::WarrantyWrite(source) => {
                    tracing::error!(repair_id = id, error = %source, "Warranty write failed");
                    "pickup failed, please retry".to_string()
                }
            };
            Json(TransitionResponse {
                status: "error",
                message,
            })
        }
    }
}
