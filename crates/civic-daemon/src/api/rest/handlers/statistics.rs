//! Statistics handler

use crate::api::rest::auth::Admin;
use crate::api::rest::state::AppState;
use crate::error::ApiResult;
use axum::{extract::State, Json};
use civic_types::Statistics;

/// Report counts per status (administrators only)
pub async fn get_statistics(
    _admin: Admin,
    State(state): State<AppState>,
) -> ApiResult<Json<Statistics>> {
    let stats = state.storage.statistics().await?;
    Ok(Json(stats))
}
