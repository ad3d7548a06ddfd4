//! The content store abstraction.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::object::{NewObject, ObjectPatch, ObjectQuery, StoredObject};

/// A headless content store holding typed JSON objects.
///
/// Implementations must treat "no match" as an empty result rather than an
/// error for queries. Handlers receive the store as an `Arc<dyn ContentStore>`.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Returns every object matching the query.
    async fn find(&self, query: &ObjectQuery) -> Result<Vec<StoredObject>, StoreError>;

    /// Returns the first object matching the query, if any.
    async fn find_one(&self, query: &ObjectQuery) -> Result<Option<StoredObject>, StoreError> {
        let query = query.clone().limit(1);
        Ok(self.find(&query).await?.into_iter().next())
    }

    /// Inserts an object and returns it as stored.
    async fn insert(&self, object: NewObject) -> Result<StoredObject, StoreError>;

    /// Merges a patch into an existing object.
    ///
    /// Returns `StoreError::NotFound` if the object does not exist.
    async fn update(&self, id: &str, patch: ObjectPatch) -> Result<StoredObject, StoreError>;

    /// Deletes an object.
    ///
    /// Returns `StoreError::NotFound` if the object does not exist.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}
