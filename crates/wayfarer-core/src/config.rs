//! Configuration model (`config.toml`).
//!
//! ```toml
//! [provider]
//! api_key = "..."
//!
//! [map]
//! readiness_timeout_secs = 20
//!
//! [logging]
//! level = "info"
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Result, WayfarerError};
use crate::geo::Coordinates;

pub const DEFAULT_SEARCH_BASE_URL: &str = "https://api.tomtom.com/search/2";
pub const DEFAULT_SDK_VERSION: &str = "6.23.0";

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct RootConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub map: MapSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Upper bound accepted for `map.readiness_timeout_secs` (one hour).
pub const MAX_READINESS_TIMEOUT_SECS: u64 = 3600;

impl RootConfig {
    /// Checks the settings that have no usable default.
    ///
    /// # Errors
    ///
    /// `WayfarerError::Config` when the provider API key is missing or blank,
    /// or when the readiness timeout is zero or above
    /// [`MAX_READINESS_TIMEOUT_SECS`].
    pub fn validate(&self) -> Result<()> {
        if self.provider.api_key.trim().is_empty() {
            return Err(WayfarerError::config(
                "provider.api_key is not set (set WAYFARER_TOMTOM_API_KEY or add it to config.toml)",
            ));
        }
        if self.map.readiness_timeout_secs == 0 {
            return Err(WayfarerError::config(
                "map.readiness_timeout_secs must be greater than zero",
            ));
        }
        if self.map.readiness_timeout_secs > MAX_READINESS_TIMEOUT_SECS {
            return Err(WayfarerError::config(format!(
                "map.readiness_timeout_secs must be at most {MAX_READINESS_TIMEOUT_SECS}, got {}",
                self.map.readiness_timeout_secs
            )));
        }
        Ok(())
    }
}

/// Mapping provider (TomTom) settings.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    /// API key for both the web SDK and the search endpoint. Required.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_search_base_url")]
    pub search_base_url: String,
    #[serde(default = "default_sdk_version")]
    pub sdk_version: String,
    #[serde(default = "default_search_limit")]
    pub search_limit: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            search_base_url: default_search_base_url(),
            sdk_version: default_sdk_version(),
            search_limit: default_search_limit(),
        }
    }
}

/// Map screen settings.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct MapSettings {
    #[serde(default = "default_latitude")]
    pub default_latitude: f64,
    #[serde(default = "default_longitude")]
    pub default_longitude: f64,
    #[serde(default = "default_zoom")]
    pub zoom: u8,
    /// Padding in pixels when fitting the viewport to a route.
    #[serde(default = "default_route_padding")]
    pub route_padding: u32,
    /// How long a mounted instance may take to report ready.
    #[serde(default = "default_readiness_timeout_secs")]
    pub readiness_timeout_secs: u64,
}

impl MapSettings {
    pub fn default_location(&self) -> Coordinates {
        Coordinates::new(self.default_latitude, self.default_longitude)
    }

    pub fn readiness_timeout(&self) -> Duration {
        Duration::from_secs(self.readiness_timeout_secs)
    }
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            default_latitude: default_latitude(),
            default_longitude: default_longitude(),
            zoom: default_zoom(),
            route_padding: default_route_padding(),
            readiness_timeout_secs: default_readiness_timeout_secs(),
        }
    }
}

/// Logging settings used when `RUST_LOG` is not set.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_search_base_url() -> String {
    DEFAULT_SEARCH_BASE_URL.to_string()
}

fn default_sdk_version() -> String {
    DEFAULT_SDK_VERSION.to_string()
}

fn default_search_limit() -> u32 {
    5
}

// Paris
fn default_latitude() -> f64 {
    48.8566
}

fn default_longitude() -> f64 {
    2.3522
}

fn default_zoom() -> u8 {
    13
}

fn default_route_padding() -> u32 {
    50
}

fn default_readiness_timeout_secs() -> u64 {
    20
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: RootConfig = toml::from_str("").unwrap();
        assert_eq!(config.provider.search_base_url, DEFAULT_SEARCH_BASE_URL);
        assert_eq!(config.provider.search_limit, 5);
        assert_eq!(config.map.zoom, 13);
        assert_eq!(config.map.default_location(), Coordinates::new(48.8566, 2.3522));
        assert_eq!(config.map.readiness_timeout(), Duration::from_secs(20));
    }

    #[test]
    fn test_validate_requires_api_key() {
        let mut config = RootConfig::default();
        assert!(config.validate().unwrap_err().is_config());

        config.provider.api_key = "   ".to_string();
        assert!(config.validate().is_err());

        config.provider.api_key = "secret".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = RootConfig::default();
        config.provider.api_key = "secret".to_string();
        config.map.readiness_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bounds_timeout_from_above() {
        let mut config = RootConfig::default();
        config.provider.api_key = "secret".to_string();

        config.map.readiness_timeout_secs = MAX_READINESS_TIMEOUT_SECS;
        assert!(config.validate().is_ok());

        config.map.readiness_timeout_secs = u64::MAX;
        assert!(config.validate().unwrap_err().is_config());
    }
}
