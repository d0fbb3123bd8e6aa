//! User repository trait.

use async_trait::async_trait;

use super::User;
use crate::error::Result;

/// Persistence for the single signed-in user.
///
/// Implementations store the user under a fixed key; there is never more
/// than one user on a device.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Loads the stored user.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when nobody is signed in.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the stored value is corrupt.
    async fn load(&self) -> Result<Option<User>>;

    /// Stores `user`, replacing any previous value.
    async fn save(&self, user: &User) -> Result<()>;

    /// Removes the stored user. Removing when nobody is stored succeeds.
    async fn clear(&self) -> Result<()>;
}
