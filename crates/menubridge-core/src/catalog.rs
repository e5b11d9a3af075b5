//! Normalized catalog shapes served to clients, plus the pure grouping
//! steps that turn a flat list of [`MenuItem`]s into a [`CatalogResponse`].
//!
//! Everything here is upstream-agnostic: the Square-specific conversion from
//! raw records lives in `menubridge-square`.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Only active locations are ever served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationStatus {
    Active,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    /// Comma-joined street, city, region, postal code and country.
    pub address: String,
    pub timezone: String,
    pub status: LocationStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemVariation {
    pub id: String,
    pub name: String,
    /// Price in minor currency units (cents). `None` for variable pricing.
    pub price_cents: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub image_url: Option<String>,
    pub variations: Vec<MenuItemVariation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub id: String,
    pub name: String,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub location_id: String,
    pub categories: Vec<CategoryGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub id: String,
    pub name: String,
    pub item_count: usize,
}

/// Orders display names the way a storefront lists them.
///
/// Names are compared on three levels, each consulted only on a tie:
/// 1. base letters, ignoring accents and case (`"Éclairs"` sorts with `e`);
/// 2. accents, unaccented first (`"Cafe"` before `"Café"`);
/// 3. case, lowercase first (`"large"` before `"Large"`).
#[must_use]
pub fn compare_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| lowercase_nfd(a).cmp(&lowercase_nfd(b)))
        .then_with(|| b.nfd().cmp(a.nfd()))
}

fn base_letters(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn lowercase_nfd(name: &str) -> String {
    name.nfd().flat_map(char::to_lowercase).collect()
}

/// Derives a category id from its display name: lowercased, with every run
/// of whitespace replaced by a single `-`.
///
/// Leading and trailing whitespace runs are replaced too, so `" Hot Drinks"`
/// becomes `"-hot-drinks"`.
#[must_use]
pub fn category_slug(name: &str) -> String {
    WHITESPACE_RUN
        .replace_all(&name.to_lowercase(), "-")
        .into_owned()
}

/// Groups normalized items by category name.
///
/// Items keep their relative order inside each group. Groups are sorted by
/// name; two categories with the same display name share one group.
#[must_use]
pub fn build_catalog_response(location_id: &str, items: Vec<MenuItem>) -> CatalogResponse {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    let mut index_by_name: HashMap<String, usize> = HashMap::new();

    for item in items {
        let idx = *index_by_name
            .entry(item.category.clone())
            .or_insert_with(|| {
                groups.push(CategoryGroup {
                    id: category_slug(&item.category),
                    name: item.category.clone(),
                    items: Vec::new(),
                });
                groups.len() - 1
            });
        groups[idx].items.push(item);
    }

    groups.sort_by(|a, b| compare_names(&a.name, &b.name));

    CatalogResponse {
        location_id: location_id.to_owned(),
        categories: groups,
    }
}

/// Projects a catalog into per-category item counts.
#[must_use]
pub fn build_category_summaries(catalog: &CatalogResponse) -> Vec<CategorySummary> {
    catalog
        .categories
        .iter()
        .map(|group| CategorySummary {
            id: group.id.clone(),
            name: group.name.clone(),
            item_count: group.items.len(),
        })
        .collect()
}
