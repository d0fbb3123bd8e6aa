//! Geographic primitives shared by the map, search and location layers.

use serde::{Deserialize, Serialize};

/// A WGS84 position.
///
/// No range validation is performed. Out-of-range or non-finite values are
/// carried as-is and simply produce a broken map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns the `[longitude, latitude]` pair expected by the map SDK.
    pub fn lng_lat(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }

    /// True when both components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lng_lat_order() {
        let paris = Coordinates::new(48.8566, 2.3522);
        assert_eq!(paris.lng_lat(), [2.3522, 48.8566]);
    }

    #[test]
    fn test_is_finite() {
        assert!(Coordinates::new(45.764, 4.8357).is_finite());
        assert!(!Coordinates::new(f64::NAN, 4.8357).is_finite());
    }
}
