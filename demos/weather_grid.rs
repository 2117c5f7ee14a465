//! Prints the tile grid a weather dashboard would render for one
//! viewport, with base map and overlay URLs, then resolves a sample
//! click back to coordinates.
//!
//! Run with real keys in the environment, or let it fall back to a
//! placeholder overlay key for a dry run:
//!
//! ```sh
//! WEATHER_API_KEY=... WEATHER_MAP_API_KEY=... cargo run --example weather_grid
//! ```

use anyhow::Result;
use wxtile::{
    generate_tile_grid, pixel_to_point, CenterPixelPosition, EnvConfig, GeoPoint,
    OpenStreetMapSource, OpenWeatherSource, PixelPoint, TileSource, ViewportSize,
};

fn main() -> Result<()> {
    env_logger::init();

    let (zoom, layer, overlay_key) = match EnvConfig::from_env() {
        Ok(config) => (
            config.weather.map.default_zoom,
            config.weather.map.default_layer,
            config.weather.map.api_key,
        ),
        Err(e) => {
            log::warn!("{}; using demo defaults", e);
            (
                wxtile::constants::DEFAULT_ZOOM,
                Default::default(),
                "demo".to_string(),
            )
        }
    };

    let center = GeoPoint::new(51.5074, -0.1278);
    let viewport = ViewportSize::new(800, 600);

    let base = OpenStreetMapSource::new();
    let overlay = OpenWeatherSource::new(layer, overlay_key);

    let grid = generate_tile_grid(&center, zoom, viewport);
    let alignment = CenterPixelPosition::from_point(&center, zoom);

    println!(
        "{} tiles cover a {}x{} viewport at zoom {} ({} overlay)",
        grid.len(),
        viewport.width,
        viewport.height,
        zoom,
        layer
    );
    println!(
        "grid shift to center the point: ({:.1}px, {:.1}px)\n",
        alignment.pixel_x, alignment.pixel_y
    );

    for tile in &grid {
        println!(
            "  offset ({:>5}, {:>5})  {}  |  {}",
            tile.pixel_offset_x,
            tile.pixel_offset_y,
            base.url(tile.index),
            overlay.url(tile.index)
        );
    }

    // a click 120px right and 80px above the viewport center
    let click = PixelPoint::new(400.0 + 120.0, 300.0 - 80.0);
    let picked = pixel_to_point(click, viewport.center(), &center, zoom);
    println!(
        "\nclick at ({}, {}) selects ({:.4}, {:.4})",
        click.x, click.y, picked.lat, picked.lon
    );

    Ok(())
}
