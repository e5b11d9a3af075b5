//! Normalization from raw Square records to the [`menubridge_core`] shapes.
//!
//! Pure functions only: no network or cache access. Grouping items into a
//! catalog response happens afterwards in
//! [`menubridge_core::build_catalog_response`].

use std::collections::HashMap;

use menubridge_core::{compare_names, Location, LocationStatus, MenuItem, MenuItemVariation};

use crate::types::{
    CatalogObject, CatalogObjectData, CategoryData, ImageData, ItemData, SquareAddress,
    SquareLocation,
};

const ACTIVE_STATUS: &str = "ACTIVE";
const DEFAULT_LOCATION_NAME: &str = "Unnamed location";
const DEFAULT_ITEM_NAME: &str = "Untitled item";
const DEFAULT_CATEGORY: &str = "Uncategorized";
const DEFAULT_VARIATION_NAME: &str = "Default";

/// Keeps active locations with a non-empty id, in input order.
#[must_use]
pub fn normalize_locations(locations: &[SquareLocation]) -> Vec<Location> {
    locations
        .iter()
        .filter(|location| location.status.as_deref() == Some(ACTIVE_STATUS))
        .map(|location| Location {
            id: location.id.clone().unwrap_or_default(),
            name: location
                .name
                .clone()
                .unwrap_or_else(|| DEFAULT_LOCATION_NAME.to_string()),
            address: format_address(location.address.as_ref()),
            timezone: location.timezone.clone().unwrap_or_default(),
            status: LocationStatus::Active,
        })
        .filter(|location| !location.id.is_empty())
        .collect()
}

/// Joins the present, non-empty address parts with `", "`.
fn format_address(address: Option<&SquareAddress>) -> String {
    let Some(address) = address else {
        return String::new();
    };

    [
        &address.address_line_1,
        &address.locality,
        &address.administrative_district_level_1,
        &address.postal_code,
        &address.country,
    ]
    .into_iter()
    .filter_map(|part| part.as_deref().filter(|s| !s.is_empty()))
    .collect::<Vec<_>>()
    .join(", ")
}

/// Converts the `ITEM` objects sold at `location_id` into menu items.
///
/// Categories and images are resolved by id against `related_objects`;
/// only the first image of an item is used. Variations are sorted by name.
#[must_use]
pub fn normalize_items(
    items: &[CatalogObject],
    related_objects: &[CatalogObject],
    location_id: &str,
) -> Vec<MenuItem> {
    let mut categories: HashMap<&str, &CategoryData> = HashMap::new();
    let mut images: HashMap<&str, &ImageData> = HashMap::new();
    for object in related_objects {
        match &object.data {
            CatalogObjectData::Category(category) => {
                categories.insert(object.id.as_str(), category);
            }
            CatalogObjectData::Image(image) => {
                images.insert(object.id.as_str(), image);
            }
            _ => {}
        }
    }

    items
        .iter()
        .filter(|object| object.presence.includes(location_id))
        .filter_map(|object| match &object.data {
            CatalogObjectData::Item(item) => {
                Some(normalize_item(&object.id, item, &categories, &images))
            }
            _ => None,
        })
        .collect()
}

fn normalize_item(
    id: &str,
    item: &ItemData,
    categories: &HashMap<&str, &CategoryData>,
    images: &HashMap<&str, &ImageData>,
) -> MenuItem {
    let category = item
        .category_id
        .as_deref()
        .and_then(|category_id| categories.get(category_id))
        .and_then(|category| category.name.clone())
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

    let image_url = item
        .image_ids
        .first()
        .and_then(|image_id| images.get(image_id.as_str()))
        .and_then(|image| image.url.clone());

    let mut variations: Vec<MenuItemVariation> =
        item.variations.iter().map(normalize_variation).collect();
    // Stable sort: equal names keep Square's order.
    variations.sort_by(|a, b| compare_names(&a.name, &b.name));

    MenuItem {
        id: id.to_owned(),
        name: item
            .name
            .clone()
            .unwrap_or_else(|| DEFAULT_ITEM_NAME.to_string()),
        description: item.description.clone().unwrap_or_default(),
        category,
        image_url,
        variations,
    }
}

fn normalize_variation(object: &CatalogObject) -> MenuItemVariation {
    let (name, price_cents) = match &object.data {
        CatalogObjectData::ItemVariation(variation) => (
            variation.name.clone(),
            variation.price_money.as_ref().and_then(|money| money.amount),
        ),
        _ => (None, None),
    };

    MenuItemVariation {
        id: object.id.clone(),
        name: name.unwrap_or_else(|| DEFAULT_VARIATION_NAME.to_string()),
        price_cents,
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
