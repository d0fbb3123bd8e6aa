//! Trip history domain module.

mod model;

pub use model::{Trip, TripCounts, TripFilter};
