//! Search domain models.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;

/// Address block of a place search candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchAddress {
    /// Single-line address suitable for display
    #[serde(default)]
    pub freeform_address: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub country_code: String,
    #[serde(default)]
    pub municipality: String,
}

/// Position of a place search candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchPosition {
    pub lat: f64,
    pub lon: f64,
}

/// A single place returned by the search provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub address: SearchAddress,
    pub position: SearchPosition,
}

impl SearchResult {
    /// Converts the candidate position into map coordinates.
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.position.lat, self.position.lon)
    }

    /// Secondary line shown under a suggestion (`municipality, country`).
    pub fn locality(&self) -> String {
        match (
            self.address.municipality.is_empty(),
            self.address.country.is_empty(),
        ) {
            (false, false) => format!("{}, {}", self.address.municipality, self.address.country),
            (false, true) => self.address.municipality.clone(),
            (true, false) => self.address.country.clone(),
            (true, true) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(municipality: &str, country: &str) -> SearchResult {
        SearchResult {
            id: "r-1".to_string(),
            address: SearchAddress {
                freeform_address: "Champ de Mars, 75007 Paris".to_string(),
                country: country.to_string(),
                country_code: "FR".to_string(),
                municipality: municipality.to_string(),
            },
            position: SearchPosition {
                lat: 48.8584,
                lon: 2.2945,
            },
        }
    }

    #[test]
    fn test_coordinates_from_position() {
        assert_eq!(result("Paris", "France").coordinates(), Coordinates::new(48.8584, 2.2945));
    }

    #[test]
    fn test_locality() {
        assert_eq!(result("Paris", "France").locality(), "Paris, France");
        assert_eq!(result("", "France").locality(), "France");
        assert_eq!(result("", "").locality(), "");
    }

    #[test]
    fn test_camel_case_serialization() {
        let json = serde_json::to_value(result("Paris", "France")).unwrap();
        assert_eq!(json["address"]["freeformAddress"], "Champ de Mars, 75007 Paris");
        assert_eq!(json["address"]["countryCode"], "FR");
    }
}
