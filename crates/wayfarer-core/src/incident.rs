//! Traffic incidents displayed on the map.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

use crate::geo::Coordinates;

/// Marker color used for incident types without a dedicated entry.
pub const DEFAULT_MARKER_COLOR: &str = "#666666";

/// An incident reported by the mapping provider.
///
/// `kind` is an open-ended tag (`"accident"`, `"police"`, ...). Unknown tags
/// are kept verbatim and rendered with [`DEFAULT_MARKER_COLOR`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
}

impl Incident {
    pub fn new(
        kind: impl Into<String>,
        position: Coordinates,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            kind: kind.into(),
            latitude: position.latitude,
            longitude: position.longitude,
            description: description.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn position(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Parsed kind, `None` for tags outside the known set.
    pub fn known_kind(&self) -> Option<IncidentKind> {
        self.kind.parse().ok()
    }

    /// Fill color of the incident marker.
    pub fn marker_color(&self) -> &'static str {
        self.known_kind()
            .map(IncidentKind::marker_color)
            .unwrap_or(DEFAULT_MARKER_COLOR)
    }
}

/// The incident tags the application knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum IncidentKind {
    Accident,
    Traffic,
    Police,
    RoadClosed,
    Construction,
    Obstacle,
    Warning,
}

impl IncidentKind {
    /// Closed type→color lookup.
    pub fn marker_color(self) -> &'static str {
        match self {
            IncidentKind::Accident => "#ff0000",
            IncidentKind::Traffic => "#ff9900",
            IncidentKind::Police => "#0066ff",
            IncidentKind::RoadClosed => "#990000",
            IncidentKind::Construction | IncidentKind::Obstacle | IncidentKind::Warning => {
                DEFAULT_MARKER_COLOR
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incident(kind: &str) -> Incident {
        Incident::new(kind, Coordinates::new(48.85, 2.35), "desc")
    }

    #[test]
    fn test_known_colors() {
        assert_eq!(incident("accident").marker_color(), "#ff0000");
        assert_eq!(incident("traffic").marker_color(), "#ff9900");
        assert_eq!(incident("police").marker_color(), "#0066ff");
        assert_eq!(incident("road_closed").marker_color(), "#990000");
    }

    #[test]
    fn test_unknown_kind_falls_back_to_gray() {
        assert_eq!(incident("meteor").marker_color(), DEFAULT_MARKER_COLOR);
        assert_eq!(incident("construction").marker_color(), DEFAULT_MARKER_COLOR);
        assert!(incident("meteor").known_kind().is_none());
    }

    #[test]
    fn test_kind_serializes_as_type() {
        let json = serde_json::to_value(incident("police").with_id("i-1")).unwrap();
        assert_eq!(json["type"], "police");
        assert_eq!(json["id"], "i-1");
    }
}
