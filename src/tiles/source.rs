use crate::core::geo::TileIndex;
use crate::WxError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of weather overlay layers the dashboard can show.
///
/// The variant names are the dashboard-facing identifiers; the tile
/// server uses the Weather Maps 1.0 names, see
/// [`WeatherLayer::api_layer_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherLayer {
    Precipitation,
    Temp,
    Wind,
    Pressure,
    Clouds,
}

impl WeatherLayer {
    /// Every selectable layer, in UI order
    pub const ALL: [WeatherLayer; 5] = [
        WeatherLayer::Precipitation,
        WeatherLayer::Temp,
        WeatherLayer::Wind,
        WeatherLayer::Pressure,
        WeatherLayer::Clouds,
    ];

    /// Dashboard-facing identifier
    pub fn slug(&self) -> &'static str {
        match self {
            WeatherLayer::Precipitation => "precipitation",
            WeatherLayer::Temp => "temp",
            WeatherLayer::Wind => "wind",
            WeatherLayer::Pressure => "pressure",
            WeatherLayer::Clouds => "clouds",
        }
    }

    /// Layer name in the OpenWeather Weather Maps 1.0 URL scheme
    pub fn api_layer_name(&self) -> &'static str {
        match self {
            WeatherLayer::Precipitation => "precipitation_new",
            WeatherLayer::Temp => "temp_new",
            WeatherLayer::Wind => "wind_new",
            WeatherLayer::Pressure => "pressure_new",
            WeatherLayer::Clouds => "clouds_new",
        }
    }
}

impl Default for WeatherLayer {
    fn default() -> Self {
        WeatherLayer::Precipitation
    }
}

impl fmt::Display for WeatherLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for WeatherLayer {
    type Err = WxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "precipitation" => Ok(WeatherLayer::Precipitation),
            "temp" => Ok(WeatherLayer::Temp),
            "wind" => Ok(WeatherLayer::Wind),
            "pressure" => Ok(WeatherLayer::Pressure),
            "clouds" => Ok(WeatherLayer::Clouds),
            other => Err(WxError::UnknownLayer(other.to_string())),
        }
    }
}

/// Trait representing anything that can produce tile URLs for a given index.
///
/// Implementations build strings only; fetching the image is the rendering
/// collaborator's job.
pub trait TileSource: Send + Sync {
    /// Build a URL for the requested `index`.
    fn url(&self, index: TileIndex) -> String;
}

/// Base map tiles from the public OpenStreetMap servers.
pub struct OpenStreetMapSource {
    subdomains: Vec<&'static str>,
}

impl OpenStreetMapSource {
    pub fn new() -> Self {
        Self {
            subdomains: vec!["a", "b", "c"],
        }
    }
}

impl Default for OpenStreetMapSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TileSource for OpenStreetMapSource {
    fn url(&self, index: TileIndex) -> String {
        // Guard against empty subdomain list (should not happen, but be safe)
        if self.subdomains.is_empty() {
            return format!(
                "https://tile.openstreetmap.org/{}/{}/{}.png",
                index.zoom, index.x, index.y
            );
        }

        let idx = ((index.x + index.y) % self.subdomains.len() as u32) as usize;
        let sub = self.subdomains[idx];
        format!(
            "https://{}.tile.openstreetmap.org/{}/{}/{}.png",
            sub, index.zoom, index.x, index.y
        )
    }
}

/// Weather overlay tiles from the OpenWeather Weather Maps 1.0 endpoint.
pub struct OpenWeatherSource {
    layer: WeatherLayer,
    api_key: String,
}

impl OpenWeatherSource {
    pub fn new(layer: WeatherLayer, api_key: impl Into<String>) -> Self {
        Self {
            layer,
            api_key: api_key.into(),
        }
    }

    pub fn layer(&self) -> WeatherLayer {
        self.layer
    }

    /// Same source pointed at a different overlay layer
    pub fn with_layer(&self, layer: WeatherLayer) -> Self {
        Self {
            layer,
            api_key: self.api_key.clone(),
        }
    }
}

impl TileSource for OpenWeatherSource {
    fn url(&self, index: TileIndex) -> String {
        format!(
            "https://tile.openweathermap.org/map/{}/{}/{}/{}.png?appid={}",
            self.layer.api_layer_name(),
            index.zoom,
            index.x,
            index.y,
            self.api_key
        )
    }
}
