//! # wxtile
//!
//! Slippy-map tile geometry for weather dashboards.
//!
//! The heart of the crate is a small, pure tile-coordinate engine: Web
//! Mercator point-to-tile conversion, viewport-covering tile grids, and
//! the inverse transform from a screen click back to a geographic
//! coordinate. Around it sit the stable collaborator surfaces a map UI
//! needs: tile URL sources for base map and weather overlay layers,
//! environment-driven configuration, and an expiring key-value cache.
//!
//! All coordinate math is side-effect free and total: out-of-range input
//! is wrapped or clamped, never rejected, so a map UI can feed raw event
//! data straight in.

pub mod core;
pub mod tiles;

pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{EnvConfig, FeatureFlags, MapConfig, WeatherConfig},
    geo::{CenterPixelPosition, GeoPoint, TileIndex},
    grid::{generate_tile_grid, pixel_to_point, PixelPoint, TileDescriptor, ViewportSize},
};

pub use crate::tiles::{
    cache::{cache_key, TtlCache},
    source::{OpenStreetMapSource, OpenWeatherSource, TileSource, WeatherLayer},
};

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum WxError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("unknown weather layer: {0}")]
    UnknownLayer(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, WxError>;
