//! Domain layer for Wayfarer.
//!
//! Types and traits shared by the infrastructure and application crates:
//! map session parameters, bridge signals, the embedded runtime seam, place
//! search, users, trips and configuration.

pub mod config;
pub mod error;
pub mod geo;
pub mod incident;
pub mod location;
pub mod preferences;
pub mod search;
pub mod session;
pub mod trip;
pub mod user;

// Re-export common types
pub use error::{Result, WayfarerError};
pub use geo::Coordinates;
pub use incident::Incident;
pub use preferences::{RouteType, TransportMode};
