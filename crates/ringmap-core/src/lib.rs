//! Core types for ringmap: geographic points, dealer sites, and the ring
//! classifier that buckets nearby sites into concentric distance bands.

pub mod app_config;
pub mod config;
pub mod geo;
pub mod overlay;
pub mod query;
pub mod rings;
pub mod sites;

use thiserror::Error;

pub use app_config::{AppConfig, CliConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, load_cli_config, parse_radii};
pub use geo::{distance, GeoPoint, EARTH_RADIUS_M};
pub use overlay::{ring_circles, MarkerStyle, RingCircle, DEFAULT_MAP_CENTER};
pub use query::ring_query;
pub use rings::{
    bands_from_radii, classify, BandSummary, ClassificationResult, RingBand, RingEntry,
};
pub use sites::{
    load_sites, parse_sites, AreaCount, RejectedRow, Site, SiteDataset, SiteFilter, SiteLoad,
};

/// Caller errors raised by the geographic and classification primitives.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("invalid band configuration: {0}")]
    InvalidBandConfiguration(String),

    #[error("unknown site: '{0}'")]
    UnknownSite(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read sites file {path}: {source}")]
    SitesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse sites file: {0}")]
    SitesFileParse(#[from] serde_yaml::Error),

    #[error("sites validation failed: {0}")]
    Validation(String),
}
