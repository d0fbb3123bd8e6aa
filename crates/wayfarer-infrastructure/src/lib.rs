//! Infrastructure layer for Wayfarer.
//!
//! Concrete implementations of the core traits: configuration loading,
//! on-disk storage, the stored user repository and the TomTom search client.

pub mod config_service;
pub mod paths;
pub mod storage;
pub mod tomtom_search;
pub mod user_repository;

pub use config_service::ConfigService;
pub use paths::WayfarerPaths;
pub use storage::JsonKeyValueStore;
pub use tomtom_search::TomTomSearchClient;
pub use user_repository::StoredUserRepository;
