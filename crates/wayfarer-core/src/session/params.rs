//! Immutable snapshot of what the map should display.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;
use crate::incident::Incident;
use crate::preferences::{RouteType, TransportMode};

/// Session parameters handed to the content generator.
///
/// A value is never patched in place: every `with_*` method consumes the
/// snapshot and returns a new one, and each new value is rendered into a new
/// document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionParameters {
    current_location: Coordinates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    destination: Option<Coordinates>,
    #[serde(default)]
    incidents: Vec<Incident>,
    #[serde(default)]
    route_type: RouteType,
    #[serde(default)]
    transport_mode: TransportMode,
    #[serde(default)]
    is_navigating: bool,
}

impl SessionParameters {
    /// Creates parameters centered on `current_location` with default
    /// preferences, no destination and no incidents.
    pub fn new(current_location: Coordinates) -> Self {
        Self {
            current_location,
            destination: None,
            incidents: Vec::new(),
            route_type: RouteType::default(),
            transport_mode: TransportMode::default(),
            is_navigating: false,
        }
    }

    pub fn with_current_location(mut self, location: Coordinates) -> Self {
        self.current_location = location;
        self
    }

    pub fn with_destination(mut self, destination: Option<Coordinates>) -> Self {
        self.destination = destination;
        self
    }

    pub fn with_incidents(mut self, incidents: Vec<Incident>) -> Self {
        self.incidents = incidents;
        self
    }

    pub fn with_route_type(mut self, route_type: RouteType) -> Self {
        self.route_type = route_type;
        self
    }

    pub fn with_transport_mode(mut self, transport_mode: TransportMode) -> Self {
        self.transport_mode = transport_mode;
        self
    }

    pub fn with_navigating(mut self, is_navigating: bool) -> Self {
        self.is_navigating = is_navigating;
        self
    }

    pub fn current_location(&self) -> Coordinates {
        self.current_location
    }

    pub fn destination(&self) -> Option<Coordinates> {
        self.destination
    }

    pub fn incidents(&self) -> &[Incident] {
        &self.incidents
    }

    pub fn route_type(&self) -> RouteType {
        self.route_type
    }

    pub fn transport_mode(&self) -> TransportMode {
        self.transport_mode
    }

    pub fn is_navigating(&self) -> bool {
        self.is_navigating
    }
}
