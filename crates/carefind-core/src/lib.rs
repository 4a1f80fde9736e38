//! Shared domain types, distance math and configuration for carefind.

pub mod app_config;
pub mod categories;
pub mod config;
pub mod geo;
pub mod hours;
pub mod resources;

pub use app_config::AppConfig;
pub use categories::{default_categories, load_categories, CategorySpec};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{distance_km, Coordinate, EARTH_RADIUS_KM};
pub use hours::BusinessHours;
pub use resources::{
    CategoryFilter, CategoryLabel, EnrichedResource, RankedResource, RawCandidate,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read categories file {path}: {source}")]
    CategoriesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse categories file: {0}")]
    CategoriesFileParse(#[from] serde_yaml::Error),

    #[error("categories validation failed: {0}")]
    Validation(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("latitude {0} is outside [-90, 90]")]
    InvalidLatitude(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    InvalidLongitude(f64),

    #[error("unknown resource category: {0}")]
    UnknownCategory(String),
}
