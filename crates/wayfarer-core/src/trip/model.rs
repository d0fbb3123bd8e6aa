//! Trip history domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A past trip shown in the history list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: String,
    pub name: String,
    pub start_location: String,
    pub end_location: String,
    pub date: DateTime<Utc>,
    pub duration_minutes: u32,
    pub distance_km: f64,
    #[serde(default)]
    pub saved: bool,
    #[serde(default)]
    pub favorite: bool,
}

/// Filter tabs of the trip history list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripFilter {
    #[default]
    All,
    Saved,
    Favorites,
}

impl TripFilter {
    pub fn matches(self, trip: &Trip) -> bool {
        match self {
            TripFilter::All => true,
            TripFilter::Saved => trip.saved,
            TripFilter::Favorites => trip.favorite,
        }
    }
}

/// Number of trips behind each filter tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TripCounts {
    pub all: usize,
    pub saved: usize,
    pub favorites: usize,
}
