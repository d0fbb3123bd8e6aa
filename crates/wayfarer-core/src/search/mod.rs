//! Place search for the route search panel.

pub mod model;
pub mod service;

pub use model::{SearchAddress, SearchPosition, SearchResult};
pub use service::PlaceSearch;
