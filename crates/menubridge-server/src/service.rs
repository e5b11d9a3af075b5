//! Read-only catalog queries composed from the Square client, the
//! normalizer and the response cache.

use std::sync::Arc;

use menubridge_core::{
    build_catalog_response, build_category_summaries, CacheSettings, CatalogResponse,
    CategorySummary, Location,
};
use menubridge_square::{normalize_items, normalize_locations, SquareClient, SquareError};
use thiserror::Error;

use crate::cache::CacheStore;

const LOCATIONS_KEY: &str = "locations:active";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Square(#[from] SquareError),
}

/// Immutable snapshot stored in the cache. Hits hand out the shared `Arc`
/// without renormalizing.
#[derive(Debug, Clone)]
pub enum CachedValue {
    Locations(Arc<Vec<Location>>),
    Catalog(Arc<CatalogResponse>),
    Categories(Arc<Vec<CategorySummary>>),
}

pub struct CatalogService {
    client: SquareClient,
    cache: CacheStore<CachedValue>,
}

impl CatalogService {
    #[must_use]
    pub fn new(client: SquareClient, cache_settings: CacheSettings) -> Self {
        Self {
            client,
            cache: CacheStore::new(cache_settings),
        }
    }

    /// Active locations, cached under a single key.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Square`] if the upstream call fails.
    pub async fn get_active_locations(&self) -> Result<Arc<Vec<Location>>, ServiceError> {
        if let Some(CachedValue::Locations(locations)) = self.cache.get(LOCATIONS_KEY) {
            tracing::debug!(key = LOCATIONS_KEY, "cache hit");
            return Ok(locations);
        }

        let raw = self.client.fetch_locations().await?;
        let locations = Arc::new(normalize_locations(&raw));
        self.cache
            .set(LOCATIONS_KEY, CachedValue::Locations(Arc::clone(&locations)));
        Ok(locations)
    }

    /// Full catalog for one location, grouped by category.
    ///
    /// A miss walks the whole Square catalog (the search is not
    /// location-scoped) and filters by presence afterwards.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::InvalidArgument`] if `location_id` is blank.
    /// - [`ServiceError::Square`] if the upstream search fails.
    pub async fn get_catalog_by_location(
        &self,
        location_id: &str,
    ) -> Result<Arc<CatalogResponse>, ServiceError> {
        let location_id = validate_location_id(location_id)?;
        self.catalog_for(location_id).await
    }

    /// Per-category item counts for one location.
    ///
    /// A miss goes through the catalog cache, so a catalog fetched moments
    /// earlier is reused instead of searching Square again.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::InvalidArgument`] if `location_id` is blank.
    /// - [`ServiceError::Square`] if the upstream search fails.
    pub async fn get_categories_by_location(
        &self,
        location_id: &str,
    ) -> Result<Arc<Vec<CategorySummary>>, ServiceError> {
        let location_id = validate_location_id(location_id)?;
        let key = categories_key(location_id);
        if let Some(CachedValue::Categories(categories)) = self.cache.get(&key) {
            tracing::debug!(key = %key, "cache hit");
            return Ok(categories);
        }

        let catalog = self.catalog_for(location_id).await?;
        let categories = Arc::new(build_category_summaries(&catalog));
        self.cache
            .set(key, CachedValue::Categories(Arc::clone(&categories)));
        Ok(categories)
    }

    async fn catalog_for(&self, location_id: &str) -> Result<Arc<CatalogResponse>, ServiceError> {
        let key = catalog_key(location_id);
        if let Some(CachedValue::Catalog(catalog)) = self.cache.get(&key) {
            tracing::debug!(key = %key, "cache hit");
            return Ok(catalog);
        }

        let search = self.client.fetch_catalog_items_with_related().await?;
        let items = normalize_items(&search.items, &search.related_objects, location_id);
        let catalog = Arc::new(build_catalog_response(location_id, items));
        self.cache
            .set(key, CachedValue::Catalog(Arc::clone(&catalog)));
        tracing::debug!(
            location_id,
            categories = catalog.categories.len(),
            cache_entries = self.cache.entry_count(),
            "catalog normalized and cached"
        );
        Ok(catalog)
    }
}

fn validate_location_id(location_id: &str) -> Result<&str, ServiceError> {
    let trimmed = location_id.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::InvalidArgument(
            "location_id is required".to_string(),
        ));
    }
    Ok(trimmed)
}

fn catalog_key(location_id: &str) -> String {
    format!("catalog:{location_id}")
}

fn categories_key(location_id: &str) -> String {
    format!("categories:{location_id}")
}

#[cfg(test)]
#[path = "service_test.rs"]
mod tests;
