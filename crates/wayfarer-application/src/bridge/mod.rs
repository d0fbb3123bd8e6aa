//! Host side of the embedded runtime bridge.

pub mod runtime_bridge;

pub use runtime_bridge::{BridgeDelivery, MountHandle, RuntimeBridge};
