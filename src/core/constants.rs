//! Engine-wide constants from the slippy-map/Web-Mercator conventions.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Square tile edge length in pixels.
pub const TILE_SIZE: u32 = 256;

/// Maximum latitude representable in Web Mercator (EPSG:3857).
/// Latitudes beyond this are clamped before any projection math runs.
pub const MAX_LATITUDE: f64 = 85.0511;

/// Lowest zoom level the dashboard UI offers.
pub const MIN_ZOOM: u8 = 3;

/// Highest zoom level the dashboard UI offers.
pub const MAX_ZOOM: u8 = 18;

/// Zoom level used when the environment does not specify one.
pub const DEFAULT_ZOOM: u8 = 12;
