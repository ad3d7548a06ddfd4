//! User repository over the content store.

use std::sync::Arc;

use tally_shared::auth::UserInfo;

use crate::client::ContentStore;
use crate::error::StoreError;
use crate::object::{NewObject, ObjectQuery, StoredObject, USERS};

/// A stored user, including the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Store object ID.
    pub id: String,
    /// Normalized email.
    pub email: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    /// Display name.
    pub full_name: String,
}

impl UserRecord {
    /// Returns the public profile, without the hash.
    #[must_use]
    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id.clone(),
            email: self.email.clone(),
            full_name: self.full_name.clone(),
        }
    }

    fn from_object(object: &StoredObject) -> Self {
        Self {
            id: object.id.clone(),
            email: object.str_field("email").unwrap_or_default().to_string(),
            password_hash: object
                .str_field("password_hash")
                .unwrap_or_default()
                .to_string(),
            full_name: object
                .str_field("full_name")
                .unwrap_or_default()
                .to_string(),
        }
    }
}

/// User repository for lookup and registration.
#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn ContentStore>,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// Finds a user by normalized email.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let query = ObjectQuery::new(USERS).filter("metadata.email", email);
        Ok(self
            .store
            .find_one(&query)
            .await?
            .as_ref()
            .map(UserRecord::from_object))
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<UserRecord>, StoreError> {
        let query = ObjectQuery::new(USERS).filter("id", id);
        Ok(self
            .store
            .find_one(&query)
            .await?
            .as_ref()
            .map(UserRecord::from_object))
    }

    /// Checks if an email is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        let query = ObjectQuery::new(USERS)
            .filter("metadata.email", email)
            .props(&["id"]);
        Ok(self.store.find_one(&query).await?.is_some())
    }

    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// Returns an error if the store insert fails.
    pub async fn create(
        &self,
        email: &str,
        password_hash: &str,
        full_name: &str,
    ) -> Result<UserRecord, StoreError> {
        let object = NewObject::new(USERS, email)
            .field("email", email)
            .field("password_hash", password_hash)
            .field("full_name", full_name);

        let stored = self.store.insert(object).await?;
        Ok(UserRecord::from_object(&stored))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryContentStore;

    fn repo() -> UserRepository {
        UserRepository::new(Arc::new(MemoryContentStore::new()))
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = repo();
        let created = repo
            .create("ada@example.com", "$argon2id$hash", "Ada")
            .await
            .unwrap();

        let by_email = repo.find_by_email("ada@example.com").await.unwrap().unwrap();
        assert_eq!(by_email, created);

        let by_id = repo.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(by_id.password_hash, "$argon2id$hash");
        assert_eq!(
            by_id.to_info(),
            UserInfo {
                id: created.id.clone(),
                email: "ada@example.com".into(),
                full_name: "Ada".into(),
            }
        );
    }

    #[tokio::test]
    async fn test_email_exists() {
        let repo = repo();
        assert!(!repo.email_exists("ada@example.com").await.unwrap());
        repo.create("ada@example.com", "h", "").await.unwrap();
        assert!(repo.email_exists("ada@example.com").await.unwrap());
        assert!(repo.find_by_email("bob@example.com").await.unwrap().is_none());
    }
}
