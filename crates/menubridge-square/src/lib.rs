pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::{SquareClient, MAX_PAGES, SQUARE_VERSION};
pub use error::SquareError;
pub use normalize::{normalize_items, normalize_locations};
pub use types::{CatalogObject, CatalogObjectData, CatalogSearchResult, Presence, SquareLocation};
