//! Application layer for Wayfarer.
//!
//! Map document generation, the runtime bridge, the map screen controller
//! and the smaller use cases around the map screen (location, search,
//! authentication, trip history).

pub mod auth_service;
pub mod bridge;
pub mod content;
pub mod controller;
pub mod location;
pub mod search_usecase;
pub mod tracing_layer;
pub mod trip_history;

pub use auth_service::AuthService;
pub use bridge::{BridgeDelivery, MountHandle, RuntimeBridge};
pub use content::{ContentGenerator, MapDocumentSettings};
pub use controller::{MapReadyCallback, MapScreenController};
pub use location::resolve_location;
pub use search_usecase::{SuggestionSearch, UserAlert};
pub use tracing_layer::{LogBuffer, LogCaptureLayer, LogEntry};
pub use trip_history::TripHistory;
