use std::sync::Arc;

use axum::{extract::State, Json};
use menubridge_core::Location;

use crate::error::ApiError;

use super::AppState;

pub(super) async fn list_locations(
    State(state): State<AppState>,
) -> Result<Json<Arc<Vec<Location>>>, ApiError> {
    let locations = state.catalog.get_active_locations().await?;
    Ok(Json(locations))
}
