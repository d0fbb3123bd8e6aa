//! Local authentication state.
//!
//! There is no remote account service: signing in validates the credentials
//! locally and persists the resulting [`User`] through a [`UserRepository`].

use std::sync::Arc;

use uuid::Uuid;
use wayfarer_core::user::{User, UserRepository};
use wayfarer_core::{Result, WayfarerError};

/// Domain used for the email of users who sign in with a username only.
pub const LOGIN_EMAIL_DOMAIN: &str = "example.com";

/// Sign-in, registration and sign-out over the stored user.
pub struct AuthService {
    repository: Arc<dyn UserRepository>,
}

impl AuthService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Returns the signed-in user, if any.
    ///
    /// # Errors
    ///
    /// Propagates storage errors, including a serialization error when the
    /// stored user is corrupt.
    pub async fn current_user(&self) -> Result<Option<User>> {
        let user = self.repository.load().await?;
        match &user {
            Some(user) => tracing::info!("[Auth] Signed in as '{}'", user.username),
            None => tracing::info!("[Auth] No signed-in user"),
        }
        Ok(user)
    }

    /// Signs in with a username and password.
    ///
    /// The email is derived as `<username>@example.com`.
    pub async fn login(&self, username: &str, password: &str) -> Result<User> {
        let username = required("username", username)?;
        required("password", password)?;

        tracing::info!("[Auth] Login attempt for '{}'", username);
        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            email: format!("{username}@{LOGIN_EMAIL_DOMAIN}"),
        };
        self.persist(user).await
    }

    /// Registers a new account and signs it in.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<User> {
        let username = required("username", username)?;
        let email = required("email", email)?;
        required("password", password)?;
        if !email.contains('@') {
            return Err(WayfarerError::validation(format!(
                "Invalid email address '{email}'"
            )));
        }

        tracing::info!("[Auth] Registration for '{}'", username);
        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            email: email.to_string(),
        };
        self.persist(user).await
    }

    pub async fn logout(&self) -> Result<()> {
        self.repository.clear().await?;
        tracing::info!("[Auth] Signed out");
        Ok(())
    }

    async fn persist(&self, user: User) -> Result<User> {
        self.repository.save(&user).await.inspect_err(|e| {
            tracing::error!("[Auth] Failed to store user: {}", e);
        })?;
        tracing::info!("[Auth] Signed in as '{}'", user.username);
        Ok(user)
    }
}

fn required<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(WayfarerError::validation(format!("{field} is required")));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct InMemoryUsers(Mutex<Option<User>>);

    #[async_trait]
    impl UserRepository for InMemoryUsers {
        async fn load(&self) -> Result<Option<User>> {
            Ok(self.0.lock().await.clone())
        }

        async fn save(&self, user: &User) -> Result<()> {
            *self.0.lock().await = Some(user.clone());
            Ok(())
        }

        async fn clear(&self) -> Result<()> {
            *self.0.lock().await = None;
            Ok(())
        }
    }

    fn service() -> AuthService {
        AuthService::new(Arc::new(InMemoryUsers::default()))
    }

    #[tokio::test]
    async fn test_login_derives_email_and_persists() {
        let auth = service();
        let user = auth.login("camille", "secret").await.unwrap();

        assert_eq!(user.email, "camille@example.com");
        assert!(!user.id.is_empty());
        assert_eq!(auth.current_user().await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn test_register_keeps_email() {
        let auth = service();
        let user = auth
            .register("lea", "lea@wayfarer.test", "secret")
            .await
            .unwrap();

        assert_eq!(user.email, "lea@wayfarer.test");
    }

    #[tokio::test]
    async fn test_invalid_credentials_are_rejected() {
        let auth = service();

        assert!(auth.login(" ", "secret").await.unwrap_err().is_validation());
        assert!(auth.login("camille", "").await.unwrap_err().is_validation());
        assert!(auth
            .register("lea", "not-an-email", "secret")
            .await
            .unwrap_err()
            .is_validation());
        assert!(auth.current_user().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_user() {
        let auth = service();
        auth.login("camille", "secret").await.unwrap();
        auth.logout().await.unwrap();

        assert!(auth.current_user().await.unwrap().is_none());
    }
}
