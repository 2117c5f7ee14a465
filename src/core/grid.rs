use crate::core::constants::TILE_SIZE;
use crate::core::geo::{CenterPixelPosition, GeoPoint, TileIndex};
use serde::{Deserialize, Serialize};

/// Pixel dimensions of the rectangle the map renders into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Center pixel of the viewport
    pub fn center(&self) -> PixelPoint {
        PixelPoint::new(self.width as f64 / 2.0, self.height as f64 / 2.0)
    }
}

/// A position in viewport pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A tile's place in a generated grid: which tile to show and where to put
/// it, in pixels relative to the grid's logical center. The renderer adds
/// the sub-tile shift from [`CenterPixelPosition`] on top so the center
/// point lands on the exact center pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileDescriptor {
    pub index: TileIndex,
    pub pixel_offset_x: i32,
    pub pixel_offset_y: i32,
}

/// Generates the tile grid covering a viewport centered on `center`.
///
/// The grid spans the viewport plus a one-tile overscan margin on every
/// edge, so pans and zoom transitions never expose a blank strip. Tile x
/// indices wrap across the antimeridian; y indices clamp at the poles,
/// which can repeat the edge row. At least a 3×3 grid is produced even
/// for a zero-sized viewport.
///
/// Emission is row-major over dy then dx. Callers position each tile
/// independently, so order carries no meaning, but it is deterministic.
pub fn generate_tile_grid(
    center: &GeoPoint,
    zoom: u8,
    viewport: ViewportSize,
) -> Vec<TileDescriptor> {
    let n = 2_f64.powi(zoom as i32);
    let center_tile = TileIndex::from_point(center, zoom);

    let tiles_x = ((viewport.width as f64 / TILE_SIZE as f64).ceil() as i64 + 2).max(3);
    let tiles_y = ((viewport.height as f64 / TILE_SIZE as f64).ceil() as i64 + 2).max(3);
    let half_x = tiles_x / 2;
    let half_y = tiles_y / 2;

    let mut tiles = Vec::with_capacity(((2 * half_x + 1) * (2 * half_y + 1)) as usize);

    for dy in -half_y..=half_y {
        for dx in -half_x..=half_x {
            let x = (center_tile.x as f64 + dx as f64).rem_euclid(n) as u32;
            let y = (center_tile.y as i64 + dy).clamp(0, n as i64 - 1) as u32;

            tiles.push(TileDescriptor {
                index: TileIndex::new(x, y, zoom),
                pixel_offset_x: (dx * TILE_SIZE as i64) as i32,
                pixel_offset_y: (dy * TILE_SIZE as i64) as i32,
            });
        }
    }

    log::debug!(
        "tile grid: {} tiles around {:?} for {}x{} viewport",
        tiles.len(),
        center_tile,
        viewport.width,
        viewport.height
    );

    tiles
}

/// Recovers the geographic coordinate under a viewport click.
///
/// `click` and `viewport_center` are both in viewport pixels; tiles render
/// at their native 256-px size, so viewport pixels map 1:1 onto tile
/// pixels. The result is clamped to the valid Mercator ranges, so a click
/// past the edge of the world resolves to the edge instead of failing.
pub fn pixel_to_point(
    click: PixelPoint,
    viewport_center: PixelPoint,
    center: &GeoPoint,
    zoom: u8,
) -> GeoPoint {
    let center_pixel = CenterPixelPosition::from_point(center, zoom);
    let (abs_x, abs_y) = center_pixel.absolute_pixel();

    let offset_x = click.x - viewport_center.x;
    let offset_y = click.y - viewport_center.y;

    let tile_x = (abs_x + offset_x) / TILE_SIZE as f64;
    let tile_y = (abs_y + offset_y) / TILE_SIZE as f64;

    GeoPoint::from_tile_space(tile_x, tile_y, zoom)
}
