//! Unified path management for wayfarer files.
//!
//! ```text
//! ~/.config/wayfarer/          # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/wayfarer/     # Data directory
//! ├── storage.json             # Key-value store (signed-in user)
//! └── logs/                    # Application logs
//!     └── wayfarer.log.YYYY-MM-DD
//! ```
//!
//! A base directory can be supplied (tests, portable installs); both the
//! config and data files then live directly under it.

use std::path::{Path, PathBuf};

const APP_DIR: &str = "wayfarer";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolves wayfarer's config, data and log locations.
#[derive(Debug, Clone)]
pub struct WayfarerPaths {
    base: Option<PathBuf>,
}

impl WayfarerPaths {
    /// Creates a resolver. `None` uses the platform directories.
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the configuration directory (e.g. `~/.config/wayfarer/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    /// Returns the data directory (e.g. `~/.local/share/wayfarer/`).
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    /// Path to `config.toml`.
    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Path to the key-value store file.
    pub fn storage_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("storage.json"))
    }

    /// Directory for rolling log files.
    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("logs"))
    }
}

impl Default for WayfarerPaths {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_override() {
        let temp_dir = tempfile::tempdir().unwrap();
        let paths = WayfarerPaths::new(Some(temp_dir.path()));

        assert_eq!(paths.config_file().unwrap(), temp_dir.path().join("config.toml"));
        assert_eq!(paths.storage_file().unwrap(), temp_dir.path().join("storage.json"));
        assert_eq!(paths.logs_dir().unwrap(), temp_dir.path().join("logs"));
    }

    #[test]
    fn test_platform_paths_end_with_app_dir() {
        if let Ok(dir) = WayfarerPaths::default().config_dir() {
            assert!(dir.ends_with(APP_DIR));
        }
    }
}
