//! User domain model.

use serde::{Deserialize, Serialize};

/// The signed-in user, persisted as a single JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
}
