//! Environment-driven configuration for the weather dashboard.
//!
//! The geometry engine takes every parameter explicitly; this module is
//! the one place that reads the process environment. Required keys are
//! validated up front so a misconfigured deployment fails with one error
//! naming every missing variable instead of failing tile by tile.

use crate::core::constants::DEFAULT_ZOOM;
use crate::tiles::source::WeatherLayer;
use crate::{Result, WxError};
use serde::{Deserialize, Serialize};

/// Weather data API key (required).
pub const ENV_WEATHER_API_KEY: &str = "WEATHER_API_KEY";
/// Tile overlay API key (required).
pub const ENV_WEATHER_MAP_API_KEY: &str = "WEATHER_MAP_API_KEY";
const ENV_BASE_URL: &str = "WEATHER_API_BASE_URL";
const ENV_CACHE_DURATION: &str = "WEATHER_CACHE_DURATION";
const ENV_MAP_ZOOM: &str = "WEATHER_MAP_ZOOM";
const ENV_MAP_TYPE: &str = "WEATHER_MAP_TYPE";
const ENV_ENABLE_ALERTS: &str = "ENABLE_WEATHER_ALERTS";
const ENV_ENABLE_MAP: &str = "ENABLE_WEATHER_MAP";
const ENV_ENABLE_SEARCH: &str = "ENABLE_LOCATION_SEARCH";

const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";
const DEFAULT_CACHE_MINUTES: u64 = 30;

/// Values that ship in `.env.example` files and must not be accepted as
/// real keys.
const PLACEHOLDER_KEYS: &[&str] = &[
    "YOUR_API_KEY",
    "your_api_key_here",
    "your_weather_api_key_here",
    "your_weather_map_api_key_here",
];

/// Settings for the weather map component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    pub api_key: String,
    /// Starting zoom; the UI clamps interactive zooming to [3, 18]
    pub default_zoom: u8,
    pub default_layer: WeatherLayer,
}

/// Settings for the weather data API and its cache
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherConfig {
    pub api_key: String,
    pub base_url: String,
    pub cache_duration_minutes: u64,
    pub map: MapConfig,
}

/// Feature toggles; a flag is on only when its variable is exactly "true"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeatureFlags {
    pub weather_alerts: bool,
    pub weather_map: bool,
    pub location_search: bool,
}

/// Full application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvConfig {
    pub weather: WeatherConfig,
    pub features: FeatureFlags,
}

impl EnvConfig {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Lets tests
    /// supply variables without touching process-global state.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = required_key(&lookup, ENV_WEATHER_API_KEY);
        let map_api_key = required_key(&lookup, ENV_WEATHER_MAP_API_KEY);

        let missing: Vec<&str> = [
            (ENV_WEATHER_API_KEY, &api_key),
            (ENV_WEATHER_MAP_API_KEY, &map_api_key),
        ]
        .iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| *name)
        .collect();

        if !missing.is_empty() {
            return Err(WxError::Config(format!(
                "missing or placeholder environment variables: {}",
                missing.join(", ")
            )));
        }

        let base_url = lookup(ENV_BASE_URL)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let cache_duration_minutes =
            parse_or_default(&lookup, ENV_CACHE_DURATION, DEFAULT_CACHE_MINUTES);
        let default_zoom = parse_or_default(&lookup, ENV_MAP_ZOOM, DEFAULT_ZOOM);

        let default_layer = match lookup(ENV_MAP_TYPE) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!(
                    "{} is not a known layer ({:?}), using {}",
                    ENV_MAP_TYPE,
                    raw,
                    WeatherLayer::default()
                );
                WeatherLayer::default()
            }),
            None => WeatherLayer::default(),
        };

        Ok(Self {
            weather: WeatherConfig {
                api_key: api_key.unwrap_or_default(),
                base_url,
                cache_duration_minutes,
                map: MapConfig {
                    api_key: map_api_key.unwrap_or_default(),
                    default_zoom,
                    default_layer,
                },
            },
            features: FeatureFlags {
                weather_alerts: flag(&lookup, ENV_ENABLE_ALERTS),
                weather_map: flag(&lookup, ENV_ENABLE_MAP),
                location_search: flag(&lookup, ENV_ENABLE_SEARCH),
            },
        })
    }
}

/// A required key is present, non-empty, and not a known placeholder.
fn required_key<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .filter(|v| !v.trim().is_empty())
        .filter(|v| !PLACEHOLDER_KEYS.contains(&v.as_str()))
}

fn parse_or_default<F, T>(lookup: &F, name: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + std::fmt::Display + Copy,
{
    match lookup(name) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("{} is not a valid number ({:?}), using {}", name, raw, default);
            default
        }),
        None => default,
    }
}

fn flag<F>(lookup: &F, name: &str) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).as_deref() == Some("true")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn lookup_in(map: &HashMap<String, String>) -> impl Fn(&str) -> Option<String> + '_ {
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let vars = env(&[
            (ENV_WEATHER_API_KEY, "abc123"),
            (ENV_WEATHER_MAP_API_KEY, "def456"),
        ]);
        let config = EnvConfig::from_lookup(lookup_in(&vars)).unwrap();

        assert_eq!(config.weather.api_key, "abc123");
        assert_eq!(config.weather.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.weather.cache_duration_minutes, 30);
        assert_eq!(config.weather.map.default_zoom, 12);
        assert_eq!(config.weather.map.default_layer, WeatherLayer::Precipitation);
        assert!(!config.features.weather_map);
    }

    #[test]
    fn test_missing_keys_are_all_reported() {
        let err = EnvConfig::from_lookup(|_| None).unwrap_err();
        let message = err.to_string();
        assert!(message.contains(ENV_WEATHER_API_KEY));
        assert!(message.contains(ENV_WEATHER_MAP_API_KEY));
    }

    #[test]
    fn test_placeholder_keys_rejected() {
        let vars = env(&[
            (ENV_WEATHER_API_KEY, "your_api_key_here"),
            (ENV_WEATHER_MAP_API_KEY, "real-key"),
        ]);
        let err = EnvConfig::from_lookup(lookup_in(&vars)).unwrap_err();
        assert!(err.to_string().contains(ENV_WEATHER_API_KEY));
    }

    #[test]
    fn test_overrides_applied() {
        let vars = env(&[
            (ENV_WEATHER_API_KEY, "k1"),
            (ENV_WEATHER_MAP_API_KEY, "k2"),
            ("WEATHER_API_BASE_URL", "https://example.test/v1"),
            ("WEATHER_CACHE_DURATION", "5"),
            ("WEATHER_MAP_ZOOM", "7"),
            ("WEATHER_MAP_TYPE", "wind"),
            ("ENABLE_WEATHER_MAP", "true"),
            ("ENABLE_WEATHER_ALERTS", "yes"),
        ]);
        let config = EnvConfig::from_lookup(lookup_in(&vars)).unwrap();

        assert_eq!(config.weather.base_url, "https://example.test/v1");
        assert_eq!(config.weather.cache_duration_minutes, 5);
        assert_eq!(config.weather.map.default_zoom, 7);
        assert_eq!(config.weather.map.default_layer, WeatherLayer::Wind);
        assert!(config.features.weather_map);
        // anything but "true" stays off
        assert!(!config.features.weather_alerts);
    }

    #[test]
    fn test_malformed_values_fall_back() {
        let vars = env(&[
            (ENV_WEATHER_API_KEY, "k1"),
            (ENV_WEATHER_MAP_API_KEY, "k2"),
            ("WEATHER_MAP_ZOOM", "eleven"),
            ("WEATHER_MAP_TYPE", "lava"),
        ]);
        let config = EnvConfig::from_lookup(lookup_in(&vars)).unwrap();
        assert_eq!(config.weather.map.default_zoom, DEFAULT_ZOOM);
        assert_eq!(config.weather.map.default_layer, WeatherLayer::Precipitation);
    }
}
