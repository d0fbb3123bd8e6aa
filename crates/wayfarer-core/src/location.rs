//! Device location seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geo::Coordinates;

/// Source of the device's current position.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Returns the current position.
    ///
    /// # Errors
    ///
    /// `WayfarerError::PermissionDenied` when the user refused location
    /// access, any other variant for positioning failures.
    async fn current_position(&self) -> Result<Coordinates>;
}

/// Where a resolved location came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationSource {
    /// A real fix reported by the device.
    Device,
    /// The configured default coordinate, used when no fix was available.
    Fallback,
}

/// A resolved location together with its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub coordinates: Coordinates,
    pub source: LocationSource,
}

impl LocationFix {
    pub fn is_fallback(&self) -> bool {
        self.source == LocationSource::Fallback
    }
}
