//! Square Connect API wire types for the locations and catalog endpoints.
//!
//! ## Shapes observed from the v2 API
//!
//! ### Optional fields
//! Square omits fields that have no value rather than sending `null`, and
//! most fields may be missing on sandbox data. Everything except catalog
//! object `id` and `type` is modelled as optional or defaulted.
//!
//! ### Catalog objects
//! Every catalog object is a tagged record: a `type` string plus one
//! `<kind>_data` payload (`item_data`, `category_data`, `image_data`,
//! `item_variation_data`). [`CatalogObject`] is parsed through
//! [`RawCatalogObject`] so callers only ever see the payload that matches
//! the tag, as [`CatalogObjectData`].
//!
//! ### Presence
//! `present_at_all_locations: true` makes an object visible everywhere;
//! otherwise `present_at_location_ids` enumerates the locations. Both may be
//! absent, meaning the object is visible nowhere.
//!
//! ### Money
//! `price_money.amount` is an integer in the smallest currency unit. It is
//! absent for variable-priced variations.

use serde::{Deserialize, Serialize};

/// Response from `GET /v2/locations`.
#[derive(Debug, Deserialize)]
pub struct ListLocationsResponse {
    #[serde(default)]
    pub locations: Vec<SquareLocation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SquareLocation {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// `"ACTIVE"` or `"INACTIVE"`.
    #[serde(default)]
    pub status: Option<String>,
    /// IANA timezone, e.g. `"America/New_York"`.
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub address: Option<SquareAddress>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SquareAddress {
    #[serde(default)]
    pub address_line_1: Option<String>,
    #[serde(default)]
    pub locality: Option<String>,
    #[serde(default)]
    pub administrative_district_level_1: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Body for `POST /v2/catalog/search`.
#[derive(Debug, Serialize)]
pub struct SearchCatalogObjectsRequest<'a> {
    pub object_types: &'a [&'a str],
    pub include_related_objects: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<&'a str>,
}

/// Response from `POST /v2/catalog/search`.
#[derive(Debug, Deserialize)]
pub struct SearchCatalogObjectsResponse {
    #[serde(default)]
    pub objects: Vec<CatalogObject>,
    #[serde(default)]
    pub related_objects: Vec<CatalogObject>,
    /// Continuation token; absent (or empty) on the last page.
    #[serde(default)]
    pub cursor: Option<String>,
}

/// Every `ITEM` object plus the related objects collected across all pages
/// of a catalog search.
#[derive(Debug, Default)]
pub struct CatalogSearchResult {
    pub items: Vec<CatalogObject>,
    pub related_objects: Vec<CatalogObject>,
}

/// Error envelope Square returns on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct SquareErrorResponse {
    #[serde(default)]
    pub errors: Option<Vec<SquareApiError>>,
}

#[derive(Debug, Deserialize)]
pub struct SquareApiError {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

/// Where a catalog object is sold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presence {
    AllLocations,
    Locations(Vec<String>),
}

impl Presence {
    #[must_use]
    pub fn includes(&self, location_id: &str) -> bool {
        match self {
            Presence::AllLocations => true,
            Presence::Locations(ids) => ids.iter().any(|id| id == location_id),
        }
    }
}

/// A catalog object validated into its kind-specific payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawCatalogObject")]
pub struct CatalogObject {
    pub id: String,
    pub presence: Presence,
    pub data: CatalogObjectData,
}

#[derive(Debug, Clone)]
pub enum CatalogObjectData {
    Item(ItemData),
    Category(CategoryData),
    Image(ImageData),
    ItemVariation(ItemVariationData),
    /// Any type this service does not read (taxes, modifiers, ...).
    Other { object_type: String },
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub image_ids: Vec<String>,
    #[serde(default)]
    pub variations: Vec<CatalogObject>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryData {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageData {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemVariationData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price_money: Option<Money>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Money {
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
}

/// Catalog object exactly as Square sends it: a type tag next to every
/// possible payload field.
#[derive(Debug, Deserialize)]
pub struct RawCatalogObject {
    pub id: String,
    #[serde(rename = "type")]
    pub object_type: String,
    #[serde(default)]
    pub present_at_all_locations: Option<bool>,
    #[serde(default)]
    pub present_at_location_ids: Option<Vec<String>>,
    #[serde(default)]
    pub item_data: Option<ItemData>,
    #[serde(default)]
    pub category_data: Option<CategoryData>,
    #[serde(default)]
    pub image_data: Option<ImageData>,
    #[serde(default)]
    pub item_variation_data: Option<ItemVariationData>,
}

impl From<RawCatalogObject> for CatalogObject {
    fn from(raw: RawCatalogObject) -> Self {
        let presence = if raw.present_at_all_locations == Some(true) {
            Presence::AllLocations
        } else {
            Presence::Locations(raw.present_at_location_ids.unwrap_or_default())
        };

        let data = match raw.object_type.as_str() {
            "ITEM" => CatalogObjectData::Item(raw.item_data.unwrap_or_default()),
            "CATEGORY" => CatalogObjectData::Category(raw.category_data.unwrap_or_default()),
            "IMAGE" => CatalogObjectData::Image(raw.image_data.unwrap_or_default()),
            "ITEM_VARIATION" => {
                CatalogObjectData::ItemVariation(raw.item_variation_data.unwrap_or_default())
            }
            _ => CatalogObjectData::Other {
                object_type: raw.object_type,
            },
        };

        Self {
            id: raw.id,
            presence,
            data,
        }
    }
}
