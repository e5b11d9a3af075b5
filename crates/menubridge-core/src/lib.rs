pub mod app_config;
pub mod catalog;
pub mod config;

pub use app_config::{AppConfig, CacheSettings, Environment, SquareEnvironment};
pub use catalog::{
    build_catalog_response, build_category_summaries, category_slug, compare_names,
    CatalogResponse, CategoryGroup, CategorySummary, Location, LocationStatus, MenuItem,
    MenuItemVariation,
};
pub use config::{load_app_config, load_app_config_from_env};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
