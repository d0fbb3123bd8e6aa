//! Signals posted by the embedded document back to the host.

use serde::{Deserialize, Serialize};

/// Payload posted once the map widget has finished loading.
pub const READY_TAG: &str = "ready";
/// Payload posted when the provider rejected the route computation.
pub const ROUTE_FAILED_TAG: &str = "route_failed";

/// Decoded inbound bridge message.
///
/// Payloads are exact-matched against the known tags; anything else is kept
/// as `Unknown` so the caller can log it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum BridgeSignal {
    Ready,
    RouteFailed,
    Unknown(String),
}

impl BridgeSignal {
    pub fn decode(payload: &str) -> Self {
        match payload {
            READY_TAG => BridgeSignal::Ready,
            ROUTE_FAILED_TAG => BridgeSignal::RouteFailed,
            other => BridgeSignal::Unknown(other.to_string()),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, BridgeSignal::Ready)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_exact_match_only() {
        assert_eq!(BridgeSignal::decode("ready"), BridgeSignal::Ready);
        assert_eq!(BridgeSignal::decode("route_failed"), BridgeSignal::RouteFailed);
        assert_eq!(
            BridgeSignal::decode("Ready "),
            BridgeSignal::Unknown("Ready ".to_string())
        );
        assert_eq!(
            BridgeSignal::decode("mapReady"),
            BridgeSignal::Unknown("mapReady".to_string())
        );
    }
}
