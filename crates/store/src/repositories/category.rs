//! Category repository over the content store.

use std::sync::Arc;

use tally_core::category::{Category, CategoryPatch, NewCategory};

use super::{OWNER_FIELD, decode};
use crate::client::ContentStore;
use crate::error::StoreError;
use crate::object::{CATEGORIES, NewObject, ObjectPatch, ObjectQuery};

/// Category repository scoped by owner.
#[derive(Clone)]
pub struct CategoryRepository {
    store: Arc<dyn ContentStore>,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    fn owned(user_id: &str) -> ObjectQuery {
        ObjectQuery::new(CATEGORIES).filter(OWNER_FIELD, user_id)
    }

    /// Lists a user's categories, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Category>, StoreError> {
        let mut categories: Vec<Category> = self
            .store
            .find(&Self::owned(user_id))
            .await?
            .iter()
            .map(decode::category)
            .collect();
        categories.sort_by_key(|c| c.name.to_lowercase());
        Ok(categories)
    }

    /// Finds one of a user's categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub async fn find_for_user(
        &self,
        user_id: &str,
        id: &str,
    ) -> Result<Option<Category>, StoreError> {
        let query = Self::owned(user_id).filter("id", id);
        Ok(self.store.find_one(&query).await?.as_ref().map(decode::category))
    }

    /// Checks whether the user already has a category with this name,
    /// case-insensitively, ignoring `except_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub async fn name_exists(
        &self,
        user_id: &str,
        name: &str,
        except_id: Option<&str>,
    ) -> Result<bool, StoreError> {
        Ok(self
            .list_for_user(user_id)
            .await?
            .iter()
            .any(|c| c.name.eq_ignore_ascii_case(name) && Some(c.id.as_str()) != except_id))
    }

    /// Creates a category owned by the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the store insert fails.
    pub async fn create(
        &self,
        user_id: &str,
        category: &NewCategory,
    ) -> Result<Category, StoreError> {
        let object = NewObject::new(CATEGORIES, &category.name)
            .field("name", category.name.as_str())
            .field("color", category.color.as_str())
            .field("user", user_id);

        let stored = self.store.insert(object).await?;
        Ok(decode::category(&stored))
    }

    /// Applies a patch to one of the user's categories.
    ///
    /// Returns `None` if the user owns no such category.
    ///
    /// # Errors
    ///
    /// Returns an error if the store call fails.
    pub async fn update(
        &self,
        user_id: &str,
        id: &str,
        patch: &CategoryPatch,
    ) -> Result<Option<Category>, StoreError> {
        let Some(existing) = self.find_for_user(user_id, id).await? else {
            return Ok(None);
        };
        if patch.is_empty() {
            return Ok(Some(existing));
        }

        let mut object_patch = ObjectPatch::default();
        if let Some(name) = &patch.name {
            object_patch.title = Some(name.clone());
            object_patch = object_patch.field("name", name.as_str());
        }
        if let Some(color) = &patch.color {
            object_patch = object_patch.field("color", color.as_str());
        }

        let stored = self.store.update(id, object_patch).await?;
        Ok(Some(decode::category(&stored)))
    }

    /// Deletes one of the user's categories.
    ///
    /// Returns `false` if the user owns no such category.
    ///
    /// # Errors
    ///
    /// Returns an error if the store call fails.
    pub async fn delete(&self, user_id: &str, id: &str) -> Result<bool, StoreError> {
        if self.find_for_user(user_id, id).await?.is_none() {
            return Ok(false);
        }
        match self.store.delete(id).await {
            Ok(()) => Ok(true),
            Err(StoreError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryContentStore;

    fn new_category(name: &str) -> NewCategory {
        NewCategory {
            name: name.to_string(),
            color: "#123456".to_string(),
        }
    }

    #[tokio::test]
    async fn test_categories_are_scoped_by_owner() {
        let repo = CategoryRepository::new(Arc::new(MemoryContentStore::new()));
        let food = repo.create("u1", &new_category("Food")).await.unwrap();
        repo.create("u2", &new_category("Travel")).await.unwrap();

        let mine = repo.list_for_user("u1").await.unwrap();
        assert_eq!(mine, vec![food.clone()]);

        assert!(repo.find_for_user("u2", &food.id).await.unwrap().is_none());
        assert!(!repo.delete("u2", &food.id).await.unwrap());
        assert!(
            repo.update("u2", &food.id, &CategoryPatch::default())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_list_sorted_by_name() {
        let repo = CategoryRepository::new(Arc::new(MemoryContentStore::new()));
        repo.create("u1", &new_category("rent")).await.unwrap();
        repo.create("u1", &new_category("Food")).await.unwrap();

        let names: Vec<_> = repo
            .list_for_user("u1")
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Food", "rent"]);
    }

    #[tokio::test]
    async fn test_name_exists_is_case_insensitive() {
        let repo = CategoryRepository::new(Arc::new(MemoryContentStore::new()));
        let food = repo.create("u1", &new_category("Food")).await.unwrap();

        assert!(repo.name_exists("u1", "food", None).await.unwrap());
        assert!(!repo.name_exists("u1", "food", Some(&food.id)).await.unwrap());
        assert!(!repo.name_exists("u2", "food", None).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let repo = CategoryRepository::new(Arc::new(MemoryContentStore::new()));
        let food = repo.create("u1", &new_category("Food")).await.unwrap();

        let patch = CategoryPatch {
            name: Some("Groceries".into()),
            color: None,
        };
        let updated = repo.update("u1", &food.id, &patch).await.unwrap().unwrap();
        assert_eq!(updated.name, "Groceries");
        assert_eq!(updated.color, "#123456");

        assert!(repo.delete("u1", &food.id).await.unwrap());
        assert!(repo.list_for_user("u1").await.unwrap().is_empty());
    }
}
