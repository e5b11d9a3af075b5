use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use menubridge_core::{CatalogResponse, CategorySummary};
use serde::Deserialize;

use crate::error::ApiError;

use super::AppState;

#[derive(Debug, Deserialize)]
pub(super) struct CatalogQuery {
    location_id: Option<String>,
}

pub(super) async fn get_catalog(
    State(state): State<AppState>,
    query: Result<Query<CatalogQuery>, QueryRejection>,
) -> Result<Json<Arc<CatalogResponse>>, ApiError> {
    let location_id = required_location_id(query)?;
    let catalog = state.catalog.get_catalog_by_location(&location_id).await?;
    Ok(Json(catalog))
}

pub(super) async fn list_categories(
    State(state): State<AppState>,
    query: Result<Query<CatalogQuery>, QueryRejection>,
) -> Result<Json<Arc<Vec<CategorySummary>>>, ApiError> {
    let location_id = required_location_id(query)?;
    let categories = state
        .catalog
        .get_categories_by_location(&location_id)
        .await?;
    Ok(Json(categories))
}

/// Missing, blank and unparseable `location_id` values are all the same
/// client error.
fn required_location_id(
    query: Result<Query<CatalogQuery>, QueryRejection>,
) -> Result<String, ApiError> {
    query
        .ok()
        .and_then(|Query(q)| q.location_id)
        .map(|id| id.trim().to_owned())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("Query param location_id is required"))
}
