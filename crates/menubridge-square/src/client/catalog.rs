//! Multi-page catalog search loop for `SquareClient`.

use reqwest::Method;

use crate::error::SquareError;
use crate::types::{CatalogSearchResult, SearchCatalogObjectsRequest, SearchCatalogObjectsResponse};

use super::SquareClient;

impl SquareClient {
    /// Fetches every `ITEM` catalog object together with its related objects
    /// (categories, images) by following search cursors until Square stops
    /// returning one.
    ///
    /// The search is not scoped to a location: callers filter by presence.
    ///
    /// **All-or-nothing semantics**: if any page fails, objects collected
    /// from earlier pages are discarded and the error is returned.
    ///
    /// # Errors
    ///
    /// Propagates any error from a single page request.
    /// Returns [`SquareError::PaginationLimit`] if the number of pages exceeds
    /// the client's page ceiling ([`super::MAX_PAGES`] unless overridden).
    pub async fn fetch_catalog_items_with_related(
        &self,
    ) -> Result<CatalogSearchResult, SquareError> {
        let mut result = CatalogSearchResult::default();
        let mut cursor: Option<String> = None;
        let mut page_count = 0usize;

        loop {
            page_count += 1;
            if page_count > self.max_pages {
                return Err(SquareError::PaginationLimit {
                    max_pages: self.max_pages,
                });
            }

            let body = SearchCatalogObjectsRequest {
                object_types: &["ITEM"],
                include_related_objects: true,
                cursor: cursor.as_deref(),
            };
            let page: SearchCatalogObjectsResponse = self
                .request_json(Method::POST, "/v2/catalog/search", Some(&body))
                .await?;

            result.items.extend(page.objects);
            result.related_objects.extend(page.related_objects);

            cursor = page.cursor.filter(|c| !c.is_empty());
            if cursor.is_none() {
                break;
            }
        }

        tracing::debug!(
            pages = page_count,
            items = result.items.len(),
            related_objects = result.related_objects.len(),
            "catalog search finished"
        );

        Ok(result)
    }
}
