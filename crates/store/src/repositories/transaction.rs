//! Transaction repository over the content store.

use std::sync::Arc;

use chrono::NaiveDate;

use tally_core::transaction::{Direction, NewTransaction, TransactionPatch, TransactionRecord};

use super::{OWNER_FIELD, decode};
use crate::client::ContentStore;
use crate::error::StoreError;
use crate::object::{NewObject, ObjectPatch, ObjectQuery, TRANSACTIONS};

/// Filters for listing transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Only income or only expenses.
    pub direction: Option<Direction>,
    /// Only this category.
    pub category_id: Option<String>,
    /// Inclusive start date.
    pub from: Option<NaiveDate>,
    /// Inclusive end date.
    pub to: Option<NaiveDate>,
}

impl TransactionFilter {
    fn within_dates(&self, record: &TransactionRecord) -> bool {
        if self.from.is_none() && self.to.is_none() {
            return true;
        }
        record.occurred_on.is_some_and(|date| {
            self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
        })
    }
}

/// Transaction repository scoped by owner.
#[derive(Clone)]
pub struct TransactionRepository {
    store: Arc<dyn ContentStore>,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    fn owned(user_id: &str) -> ObjectQuery {
        ObjectQuery::new(TRANSACTIONS).filter(OWNER_FIELD, user_id)
    }

    /// Lists a user's transactions, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub async fn list_for_user(
        &self,
        user_id: &str,
        filter: &TransactionFilter,
    ) -> Result<Vec<TransactionRecord>, StoreError> {
        let mut query = Self::owned(user_id);
        if let Some(direction) = filter.direction {
            query = query.filter("metadata.type", direction.as_str());
        }
        if let Some(category_id) = &filter.category_id {
            query = query.filter("metadata.category", category_id.as_str());
        }

        let mut records: Vec<TransactionRecord> = self
            .store
            .find(&query)
            .await?
            .iter()
            .map(decode::transaction)
            .filter(|record| filter.within_dates(record))
            .collect();
        records.sort_by(|a, b| b.occurred_on.cmp(&a.occurred_on));
        Ok(records)
    }

    /// Lists every transaction the user owns, in store order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub async fn all_for_user(&self, user_id: &str) -> Result<Vec<TransactionRecord>, StoreError> {
        Ok(self
            .store
            .find(&Self::owned(user_id))
            .await?
            .iter()
            .map(decode::transaction)
            .collect())
    }

    /// Finds one of a user's transactions.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub async fn find_for_user(
        &self,
        user_id: &str,
        id: &str,
    ) -> Result<Option<TransactionRecord>, StoreError> {
        let query = Self::owned(user_id).filter("id", id);
        Ok(self
            .store
            .find_one(&query)
            .await?
            .as_ref()
            .map(decode::transaction))
    }

    /// Creates a transaction owned by the user.
    ///
    /// The result is re-read so the category comes back resolved.
    ///
    /// # Errors
    ///
    /// Returns an error if the store call fails.
    pub async fn create(
        &self,
        user_id: &str,
        transaction: &NewTransaction,
    ) -> Result<TransactionRecord, StoreError> {
        let mut object = NewObject::new(TRANSACTIONS, &transaction.description)
            .field("description", transaction.description.as_str())
            .field("amount", transaction.amount.to_string())
            .field("type", transaction.direction.as_str())
            .field("date", transaction.occurred_on.format("%Y-%m-%d").to_string())
            .field("user", user_id);
        if let Some(category_id) = &transaction.category_id {
            object = object.field("category", category_id.as_str());
        }

        let stored = self.store.insert(object).await?;
        Ok(self
            .find_for_user(user_id, &stored.id)
            .await?
            .unwrap_or_else(|| decode::transaction(&stored)))
    }

    /// Applies a patch to one of the user's transactions.
    ///
    /// Returns `None` if the user owns no such transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the store call fails.
    pub async fn update(
        &self,
        user_id: &str,
        id: &str,
        patch: &TransactionPatch,
    ) -> Result<Option<TransactionRecord>, StoreError> {
        let Some(existing) = self.find_for_user(user_id, id).await? else {
            return Ok(None);
        };
        if patch.is_empty() {
            return Ok(Some(existing));
        }

        let mut object_patch = ObjectPatch::default();
        if let Some(description) = &patch.description {
            object_patch.title = Some(description.clone());
            object_patch = object_patch.field("description", description.as_str());
        }
        if let Some(amount) = patch.amount {
            object_patch = object_patch.field("amount", amount.to_string());
        }
        if let Some(direction) = patch.direction {
            object_patch = object_patch.field("type", direction.as_str());
        }
        if let Some(category_id) = &patch.category_id {
            object_patch =
                object_patch.field("category", category_id.as_deref().unwrap_or_default());
        }
        if let Some(date) = patch.occurred_on {
            object_patch = object_patch.field("date", date.format("%Y-%m-%d").to_string());
        }

        self.store.update(id, object_patch).await?;
        self.find_for_user(user_id, id).await
    }

    /// Deletes one of the user's transactions.
    ///
    /// Returns `false` if the user owns no such transaction.
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
