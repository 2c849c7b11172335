//! Handler for the dashboard statistics.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use fixdesk_db::repositories::DashboardRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/dashboard/stats
///
/// Aggregate revenue and repair figures. Computed on demand; no caching.
pub async fn get_stats(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let stats = DashboardRepo::get_stats(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}
