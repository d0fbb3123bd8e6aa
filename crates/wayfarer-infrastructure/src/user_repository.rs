//! Stored user repository.
//!
//! Persists the signed-in user as a JSON document under the fixed key
//! [`USER_STORAGE_KEY`] of a [`JsonKeyValueStore`].

use std::sync::Arc;

use async_trait::async_trait;
use wayfarer_core::Result;
use wayfarer_core::user::{User, UserRepository};

use crate::storage::JsonKeyValueStore;

pub const USER_STORAGE_KEY: &str = "user";

/// [`UserRepository`] backed by the key-value store.
#[derive(Debug, Clone)]
pub struct StoredUserRepository {
    store: Arc<JsonKeyValueStore>,
}

impl StoredUserRepository {
    pub fn new(store: Arc<JsonKeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for StoredUserRepository {
    async fn load(&self) -> Result<Option<User>> {
        match self.store.get_item(USER_STORAGE_KEY).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, user: &User) -> Result<()> {
        let raw = serde_json::to_string(user)?;
        self.store.set_item(USER_STORAGE_KEY, raw).await
    }

    async fn clear(&self) -> Result<()> {
        self.store.remove_item(USER_STORAGE_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repository(dir: &std::path::Path) -> (Arc<JsonKeyValueStore>, StoredUserRepository) {
        let store = Arc::new(JsonKeyValueStore::new(dir.join("storage.json")));
        (store.clone(), StoredUserRepository::new(store))
    }

    #[tokio::test]
    async fn test_save_load_clear() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (_, repo) = repository(temp_dir.path());

        assert!(repo.load().await.unwrap().is_none());

        let user = User {
            id: "1".to_string(),
            username: "camille".to_string(),
            email: "camille@example.com".to_string(),
        };
        repo.save(&user).await.unwrap();
        assert_eq!(repo.load().await.unwrap(), Some(user));

        repo.clear().await.unwrap();
        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_user_is_stored_under_fixed_key() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (store, repo) = repository(temp_dir.path());

        repo.save(&User {
            id: "7".to_string(),
            username: "lea".to_string(),
            email: "lea@example.com".to_string(),
        })
        .await
        .unwrap();

        let raw = store.get_item(USER_STORAGE_KEY).await.unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["username"], "lea");
    }

    #[tokio::test]
    async fn test_corrupt_user_value() {
        let temp_dir = tempfile::tempdir().unwrap();
        let (store, repo) = repository(temp_dir.path());

        store.set_item(USER_STORAGE_KEY, "{broken").await.unwrap();
        assert!(repo.load().await.unwrap_err().is_serialization());
    }
}
