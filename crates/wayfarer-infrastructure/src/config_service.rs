//! Configuration loading.
//!
//! Settings come from `config.toml` and are then overridden by environment
//! variables. The result is validated before it is returned, so a missing
//! provider key stops the program at startup instead of falling back to a
//! built-in credential.

use std::path::{Path, PathBuf};

use wayfarer_core::config::RootConfig;
use wayfarer_core::{Result, WayfarerError};

use crate::paths::WayfarerPaths;

pub const ENV_API_KEY: &str = "WAYFARER_TOMTOM_API_KEY";
pub const ENV_SEARCH_BASE_URL: &str = "WAYFARER_SEARCH_BASE_URL";
pub const ENV_LOG_LEVEL: &str = "WAYFARER_LOG_LEVEL";

/// Loads and validates [`RootConfig`].
#[derive(Debug, Clone)]
pub struct ConfigService {
    config_path: PathBuf,
}

impl ConfigService {
    /// Uses `config.toml` from the resolved config directory.
    pub fn new(paths: &WayfarerPaths) -> Result<Self> {
        let config_path = paths
            .config_file()
            .map_err(|e| WayfarerError::config(format!("Failed to get config path: {}", e)))?;
        Ok(Self { config_path })
    }

    /// Uses an explicit config file.
    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Reads the config file (if present), applies process environment
    /// overrides and validates the result.
    pub fn load(&self) -> Result<RootConfig> {
        let content = if self.config_path.exists() {
            Some(std::fs::read_to_string(&self.config_path)?)
        } else {
            tracing::debug!(
                "[Config] No config file at {}, using defaults",
                self.config_path.display()
            );
            None
        };

        let config = resolve(content.as_deref(), |key| std::env::var(key).ok())?;
        tracing::info!(
            "[Config] Loaded configuration (search: {}, sdk: {})",
            config.provider.search_base_url,
            config.provider.sdk_version
        );
        Ok(config)
    }
}

/// Builds the effective configuration from file content and an environment
/// lookup.
pub fn resolve<F>(content: Option<&str>, env: F) -> Result<RootConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config: RootConfig = match content {
        Some(text) if !text.trim().is_empty() => toml::from_str(text)?,
        _ => RootConfig::default(),
    };

    if let Some(api_key) = env(ENV_API_KEY).filter(|v| !v.trim().is_empty()) {
        config.provider.api_key = api_key;
    }
    if let Some(base_url) = env(ENV_SEARCH_BASE_URL).filter(|v| !v.trim().is_empty()) {
        config.provider.search_base_url = base_url;
    }
    if let Some(level) = env(ENV_LOG_LEVEL).filter(|v| !v.trim().is_empty()) {
        config.logging.level = level;
    }

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_key_fails_fast() {
        let err = resolve(None, env_from(&[])).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_env_overrides_file() {
        let toml = r#"
            [provider]
            api_key = "from-file"
            search_base_url = "https://file.example"

            [logging]
            level = "warn"
        "#;
        let config = resolve(
            Some(toml),
            env_from(&[(ENV_API_KEY, "from-env"), (ENV_LOG_LEVEL, "debug")]),
        )
        .unwrap();

        assert_eq!(config.provider.api_key, "from-env");
        assert_eq!(config.provider.search_base_url, "https://file.example");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_blank_env_value_is_ignored() {
        let toml = "[provider]\napi_key = \"from-file\"\n";
        let config = resolve(Some(toml), env_from(&[(ENV_API_KEY, "  ")])).unwrap();
        assert_eq!(config.provider.api_key, "from-file");
    }

    #[test]
    fn test_invalid_toml_is_serialization_error() {
        let err = resolve(Some("[provider"), env_from(&[(ENV_API_KEY, "k")])).unwrap_err();
        assert!(err.is_serialization());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[provider]\napi_key = \"file-key\"\n[map]\nzoom = 15\n",
        )
        .unwrap();

        let config = ConfigService::with_path(&path).load().unwrap();
        assert_eq!(config.map.zoom, 15);
        assert!(!config.provider.api_key.is_empty());
    }
}
