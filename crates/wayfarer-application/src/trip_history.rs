//! Trip history list state.

use wayfarer_core::trip::{Trip, TripCounts, TripFilter};
use wayfarer_core::{Result, WayfarerError};

/// In-memory list of past trips behind the history screen.
#[derive(Debug, Clone, Default)]
pub struct TripHistory {
    trips: Vec<Trip>,
}

impl TripHistory {
    pub fn new(trips: Vec<Trip>) -> Self {
        Self { trips }
    }

    /// Trips visible under `filter`, in list order.
    pub fn list(&self, filter: TripFilter) -> Vec<&Trip> {
        self.trips.iter().filter(|trip| filter.matches(trip)).collect()
    }

    /// Badge counts of the three filter tabs.
    pub fn counts(&self) -> TripCounts {
        TripCounts {
            all: self.trips.len(),
            saved: self.trips.iter().filter(|t| t.saved).count(),
            favorites: self.trips.iter().filter(|t| t.favorite).count(),
        }
    }

    /// Flips the favorite flag and returns the new value.
    pub fn toggle_favorite(&mut self, id: &str) -> Result<bool> {
        let trip = self
            .trips
            .iter_mut()
            .find(|trip| trip.id == id)
            .ok_or_else(|| WayfarerError::not_found("Trip", id))?;
        trip.favorite = !trip.favorite;
        tracing::debug!("[Trips] '{}' favorite: {}", trip.name, trip.favorite);
        Ok(trip.favorite)
    }

    pub fn delete(&mut self, id: &str) -> Result<Trip> {
        let index = self
            .trips
            .iter()
            .position(|trip| trip.id == id)
            .ok_or_else(|| WayfarerError::not_found("Trip", id))?;
        Ok(self.trips.remove(index))
    }

    /// Destination handed to the map screen when a trip is opened.
    pub fn destination_label(&self, id: &str) -> Result<&str> {
        self.trips
            .iter()
            .find(|trip| trip.id == id)
            .map(|trip| trip.end_location.as_str())
            .ok_or_else(|| WayfarerError::not_found("Trip", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn trip(id: &str, saved: bool, favorite: bool) -> Trip {
        Trip {
            id: id.to_string(),
            name: format!("Trip {id}"),
            start_location: "Rue de la Paix, Paris".to_string(),
            end_location: format!("Destination {id}"),
            date: Utc.with_ymd_and_hms(2025, 5, 12, 8, 30, 0).unwrap(),
            duration_minutes: 35,
            distance_km: 12.5,
            saved,
            favorite,
        }
    }

    fn history() -> TripHistory {
        TripHistory::new(vec![
            trip("1", true, true),
            trip("2", true, false),
            trip("3", false, false),
        ])
    }

    #[test]
    fn test_filters_and_counts() {
        let history = history();

        assert_eq!(history.list(TripFilter::All).len(), 3);
        assert_eq!(history.list(TripFilter::Saved).len(), 2);
        assert_eq!(history.list(TripFilter::Favorites)[0].id, "1");
        assert_eq!(
            history.counts(),
            TripCounts {
                all: 3,
                saved: 2,
                favorites: 1
            }
        );
    }

    #[test]
    fn test_toggle_favorite() {
        let mut history = history();

        assert!(history.toggle_favorite("3").unwrap());
        assert_eq!(history.counts().favorites, 2);
        assert!(!history.toggle_favorite("3").unwrap());
        assert!(history.toggle_favorite("missing").unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete() {
        let mut history = history();

        assert_eq!(history.delete("2").unwrap().id, "2");
        assert_eq!(history.counts().all, 2);
        assert!(history.delete("2").unwrap_err().is_not_found());
    }

    #[test]
    fn test_destination_label() {
        let history = history();
        assert_eq!(history.destination_label("1").unwrap(), "Destination 1");
        assert!(history.destination_label("9").is_err());
    }
}
