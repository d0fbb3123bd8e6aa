//! Map screen state types.

use serde::{Deserialize, Serialize};

/// Represents the current lifecycle state of a map screen.
///
/// Every remount sends the screen back to `Idle` (no destination) or
/// `PreparingRoute` until the mounted instance reports that it is ready.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum MapScreenState {
    /// No destination selected and the current instance is still loading.
    Idle,
    /// A new instance has been mounted and has not reported ready yet.
    PreparingRoute,
    /// The current instance reported ready.
    Ready,
    /// The current instance reported ready while navigation is active.
    Navigating,
    /// No ready signal arrived before the readiness deadline.
    LoadFailed {
        /// Human-readable reason shown in the overlay.
        reason: String,
    },
}

impl MapScreenState {
    /// True while an instance is mounted but not yet ready.
    pub fn is_loading(&self) -> bool {
        matches!(self, MapScreenState::Idle | MapScreenState::PreparingRoute)
    }
}

/// What the loading overlay should display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum OverlayView {
    Hidden,
    Spinner,
    Error { message: String },
}
