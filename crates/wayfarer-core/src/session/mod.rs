//! Map session domain module.
//!
//! # Module Structure
//!
//! - `params`: immutable session parameters rendered into a map document
//! - `signal`: inbound bridge signals
//! - `state`: map screen lifecycle state and overlay view
//! - `runtime`: the embedded runtime seam and instance identity

mod params;
mod runtime;
mod signal;
mod state;

pub use params::SessionParameters;
pub use runtime::{Document, EmbeddedRuntime, InboundMessage, InstanceId};
pub use signal::{BridgeSignal, READY_TAG, ROUTE_FAILED_TAG};
pub use state::{MapScreenState, OverlayView};
