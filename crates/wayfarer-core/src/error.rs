//! The error type shared by every Wayfarer crate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures surfaced by the map session bridge and its collaborators.
///
/// Variants stay serializable so a host UI can show them unchanged.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum WayfarerError {
    /// A lookup by id found nothing (trip, stored user, ...).
    #[error("{entity_type} '{id}' does not exist")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Reading or writing local files failed.
    #[error("I/O failure: {message}")]
    Io { message: String },

    /// Stored or received data could not be (de)serialized.
    #[error("Malformed {format} data: {message}")]
    Serialization { format: String, message: String },

    /// Missing or invalid settings, such as an absent API key.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Input rejected before any work was done
    #[error("Validation error: {0}")]
    Validation(String),

    /// Place search failed (network, provider status or payload)
    #[error("Search error: {message}")]
    Search {
        message: String,
        /// HTTP status returned by the provider, if a response was received
        status: Option<u16>,
        /// Provider-specific error code (`errorCode` in the response body)
        code: Option<String>,
    },

    /// Document template rendering error
    #[error("Template error: {0}")]
    Template(String),

    /// Embedded runtime failed to load or unload an instance
    #[error("Bridge error: {0}")]
    Bridge(String),

    /// Device permission was refused (location)
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Unexpected failure: {0}")]
    Internal(String),
}

impl WayfarerError {
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Search failure that never reached the provider.
    pub fn search(message: impl Into<String>) -> Self {
        Self::Search {
            message: message.into(),
            status: None,
            code: None,
        }
    }

    /// Search failure built from a provider response.
    pub fn search_status(message: impl Into<String>, status: u16, code: Option<String>) -> Self {
        Self::Search {
            message: message.into(),
            status: Some(status),
            code,
        }
    }

    pub fn template(message: impl Into<String>) -> Self {
        Self::Template(message.into())
    }

    pub fn bridge(message: impl Into<String>) -> Self {
        Self::Bridge(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_search(&self) -> bool {
        matches!(self, Self::Search { .. })
    }

    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Returns the provider error code carried by a search error.
    pub fn provider_code(&self) -> Option<&str> {
        match self {
            Self::Search { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    fn malformed(format: &str, err: impl std::fmt::Display) -> Self {
        Self::Serialization {
            format: format.to_owned(),
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for WayfarerError {
    fn from(err: std::io::Error) -> Self {
        Self::io(format!("{:?}: {}", err.kind(), err))
    }
}

impl From<serde_json::Error> for WayfarerError {
    fn from(err: serde_json::Error) -> Self {
        Self::malformed("JSON", err)
    }
}

impl From<toml::de::Error> for WayfarerError {
    fn from(err: toml::de::Error) -> Self {
        Self::malformed("TOML", err)
    }
}

impl From<toml::ser::Error> for WayfarerError {
    fn from(err: toml::ser::Error) -> Self {
        Self::malformed("TOML", err)
    }
}

// anyhow only appears at the binary edge
impl From<anyhow::Error> for WayfarerError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal(format!("{err:#}"))
    }
}

pub type Result<T> = std::result::Result<T, WayfarerError>;
