//! Handlers for brand and phone-model reference data.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use fixdesk_core::error::CoreError;
use fixdesk_core::types::DbId;
use fixdesk_db::models::phone::{CreateBrand, CreatePhoneModel, UpdatePhoneModel};
use fixdesk_db::repositories::{BrandRepo, PhoneModelRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for listing phone models.
#[derive(Debug, Deserialize)]
pub struct ModelListParams {
    pub brand_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ── Brands ───────────────────────────────────────────────────────────

/// POST /api/v1/brands
pub async fn create_brand(
    State(state): State<AppState>,
    Json(input): Json<CreateBrand>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let brand = BrandRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: brand })))
}

/// GET /api/v1/brands
pub async fn list_brands(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let brands = BrandRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: brands }))
}

/// DELETE /api/v1/brands/{id}
pub async fn delete_brand(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = BrandRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Brand",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ── Phone models ─────────────────────────────────────────────────────

/// POST /api/v1/phone-models
pub async fn create_phone_model(
    State(state): State<AppState>,
    Json(input): Json<CreatePhoneModel>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    BrandRepo::find_by_id(&state.pool, input.brand_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Brand",
            id: input.brand_id,
        }))?;

    let model = PhoneModelRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: model })))
}

/// GET /api/v1/phone-models
pub async fn list_phone_models(
    State(state): State<AppState>,
    Query(params): Query<ModelListParams>,
) -> AppResult<impl IntoResponse> {
    let models = PhoneModelRepo::list(&state.pool, params.brand_id, params.limit, params.offset)
        .await?;
    Ok(Json(DataResponse { data: models }))
}

/// GET /api/v1/phone-models/{id}
pub async fn get_phone_model(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let model = PhoneModelRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PhoneModel",
            id,
        }))?;
    Ok(Json(DataResponse { data: model }))
}

/// PUT /api/v1/phone-models/{id}
pub async fn update_phone_model(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePhoneModel>,
) -> AppResult<impl IntoResponse> {
    let model = PhoneModelRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PhoneModel",
            id,
        }))?;
    Ok(Json(DataResponse { data: model }))
}

/// DELETE /api/v1/phone-models/{id}
pub async fn delete_phone_model(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = PhoneModelRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "PhoneModel",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
