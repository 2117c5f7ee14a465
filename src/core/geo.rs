use crate::core::constants::{MAX_LATITUDE, TILE_SIZE};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// A geographic coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Creates a new geographic point
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Validates that the coordinates are within the usual ranges
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lon >= -180.0 && self.lon <= 180.0
    }

    /// Clamps latitude to the Web Mercator range.
    /// Must run before any `tan`/`cos` so polar input cannot produce NaN.
    pub fn clamp_lat(lat: f64) -> f64 {
        lat.clamp(-MAX_LATITUDE, MAX_LATITUDE)
    }

    /// Wraps longitude to [-180, 180]
    pub fn wrap_lon(lon: f64) -> f64 {
        let wrapped = lon % 360.0;
        if wrapped > 180.0 {
            wrapped - 360.0
        } else if wrapped < -180.0 {
            wrapped + 360.0
        } else {
            wrapped
        }
    }

    /// Fractional slippy-tile coordinate of this point at `zoom`.
    ///
    /// The x component is not wrapped and the y component is not clamped;
    /// callers decide between wrap/clamp (tile lookup) and raw values
    /// (sub-tile alignment). Latitude is clamped first, so the result is
    /// always finite.
    pub fn tile_space(&self, zoom: u8) -> (f64, f64) {
        let n = 2_f64.powi(zoom as i32);
        let x = (self.lon + 180.0) / 360.0 * n;
        let lat_rad = Self::clamp_lat(self.lat).to_radians();
        let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0 * n;
        (x, y)
    }

    /// Inverts the Web Mercator projection: fractional tile coordinates
    /// back to a geographic point, clamped to the valid ranges.
    pub fn from_tile_space(tile_x: f64, tile_y: f64, zoom: u8) -> Self {
        let n = 2_f64.powi(zoom as i32);
        let lon = tile_x / n * 360.0 - 180.0;
        let lat = (PI * (1.0 - 2.0 * tile_y / n)).sinh().atan().to_degrees();

        Self::new(Self::clamp_lat(lat), lon.clamp(-180.0, 180.0))
    }
}

impl Default for GeoPoint {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// A tile address in the slippy map tile system.
///
/// Values built through [`TileIndex::from_point`] are always in range for
/// their zoom level: x wraps across the antimeridian, y clamps at the
/// poles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileIndex {
    pub x: u32,
    pub y: u32,
    pub zoom: u8,
}

impl TileIndex {
    pub fn new(x: u32, y: u32, zoom: u8) -> Self {
        Self { x, y, zoom }
    }

    /// Tile containing the given geographic point.
    ///
    /// Longitude outside [-180, 180] wraps onto the antimeridian-adjacent
    /// tiles; latitude outside the Mercator range clamps to the edge rows.
    pub fn from_point(point: &GeoPoint, zoom: u8) -> Self {
        let n = 2_f64.powi(zoom as i32);
        let (tile_x, tile_y) = point.tile_space(zoom);

        let x = tile_x.floor().rem_euclid(n) as u32;
        let y = tile_y.floor().clamp(0.0, n - 1.0) as u32;

        Self::new(x, y, zoom)
    }

    /// Northwest corner of the tile
    pub fn to_point(&self) -> GeoPoint {
        GeoPoint::from_tile_space(self.x as f64, self.y as f64, self.zoom)
    }

    /// Checks that x and y are in range for the zoom level
    pub fn is_valid(&self) -> bool {
        let max_coord = 2_u64.pow(self.zoom as u32);
        (self.x as u64) < max_coord && (self.y as u64) < max_coord
    }
}

/// Sub-tile pixel position of a geographic point.
///
/// `pixel_x`/`pixel_y` give where inside its 256-px tile the point falls,
/// so a renderer can shift the whole grid and place the point at the exact
/// visual center instead of snapping to a tile corner. `tile_x`/`tile_y`
/// are the floor of the fractional tile coordinate, kept unwrapped and
/// unclamped: they are an alignment datum for pixel math, not a tile
/// lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CenterPixelPosition {
    pub pixel_x: f64,
    pub pixel_y: f64,
    pub tile_x: i64,
    pub tile_y: i64,
}

impl CenterPixelPosition {
    /// Computes the sub-tile pixel offset of `point` at `zoom`.
    pub fn from_point(point: &GeoPoint, zoom: u8) -> Self {
        let (tile_x, tile_y) = point.tile_space(zoom);

        Self {
            pixel_x: (tile_x - tile_x.floor()) * TILE_SIZE as f64,
            pixel_y: (tile_y - tile_y.floor()) * TILE_SIZE as f64,
            tile_x: tile_x.floor() as i64,
            tile_y: tile_y.floor() as i64,
        }
    }

    /// Absolute pixel position in tile space (tile index times tile size
    /// plus the sub-tile offset), the quantity click inversion works in.
    pub fn absolute_pixel(&self) -> (f64, f64) {
        (
            self.tile_x as f64 * TILE_SIZE as f64 + self.pixel_x,
            self.tile_y as f64 * TILE_SIZE as f64 + self.pixel_y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_creation() {
        let point = GeoPoint::new(51.5074, -0.1278);
        assert_eq!(point.lat, 51.5074);
        assert_eq!(point.lon, -0.1278);
        assert!(point.is_valid());
    }

    #[test]
    fn test_london_tile_index() {
        // Well-known slippy tile for central London at zoom 10
        let london = GeoPoint::new(51.5074, -0.1278);
        let tile = TileIndex::from_point(&london, 10);
        assert_eq!(tile.x, 511);
        assert_eq!(tile.y, 340);
        assert_eq!(tile.zoom, 10);
    }

    #[test]
    fn test_longitude_wraps() {
        for zoom in 3..=18u8 {
            let n = 2_u32.pow(zoom as u32);
            for lon in [-540.0, -190.0, 200.0, 540.0] {
                let tile = TileIndex::from_point(&GeoPoint::new(0.0, lon), zoom);
                assert!(tile.x < n);
                let shifted = TileIndex::from_point(&GeoPoint::new(0.0, lon + 360.0), zoom);
                assert_eq!(tile.x, shifted.x);
            }
        }
    }

    #[test]
    fn test_polar_latitude_clamps() {
        for lat in [90.0, 89.9, -90.0, 123.0, f64::INFINITY] {
            let raw = TileIndex::from_point(&GeoPoint::new(lat, 10.0), 8);
            let clamped = TileIndex::from_point(&GeoPoint::new(GeoPoint::clamp_lat(lat), 10.0), 8);
            assert_eq!(raw.y, clamped.y);
            assert!(raw.is_valid());
        }
    }

    #[test]
    fn test_tile_space_is_finite_at_poles() {
        let (x, y) = GeoPoint::new(90.0, 0.0).tile_space(10);
        assert!(x.is_finite());
        assert!(y.is_finite());
    }

    #[test]
    fn test_sub_tile_pixel_range() {
        let pos = CenterPixelPosition::from_point(&GeoPoint::new(51.5074, -0.1278), 10);
        assert!(pos.pixel_x >= 0.0 && pos.pixel_x < 256.0);
        assert!(pos.pixel_y >= 0.0 && pos.pixel_y < 256.0);
        assert_eq!(pos.tile_x, 511);
        assert_eq!(pos.tile_y, 340);
    }

    #[test]
    fn test_sub_tile_pixel_unwrapped_west_of_antimeridian() {
        // lon < -180 gives a negative fractional tile coordinate; the
        // alignment datum keeps it instead of wrapping
        let pos = CenterPixelPosition::from_point(&GeoPoint::new(0.0, -200.0), 3);
        assert!(pos.tile_x < 0);
        assert!(pos.pixel_x >= 0.0 && pos.pixel_x < 256.0);
    }

    #[test]
    fn test_tile_space_round_trip() {
        let point = GeoPoint::new(37.7749, -122.4194);
        let (tx, ty) = point.tile_space(12);
        let back = GeoPoint::from_tile_space(tx, ty, 12);
        assert!((back.lat - point.lat).abs() < 1e-6);
        assert!((back.lon - point.lon).abs() < 1e-6);
    }

    #[test]
    fn test_wrap_lon() {
        assert_eq!(GeoPoint::wrap_lon(190.0), -170.0);
        assert_eq!(GeoPoint::wrap_lon(-190.0), 170.0);
        assert_eq!(GeoPoint::wrap_lon(45.0), 45.0);
    }
}
