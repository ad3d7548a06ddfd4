//! In-process content store.
//!
//! Mirrors the remote store closely enough for tests and local runs:
//! equality filters on `id`, `title`, and `metadata.<field>`, prop
//! projection, and one level of relation resolution for configured fields.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value, json};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::client::ContentStore;
use crate::error::StoreError;
use crate::object::{NewObject, ObjectPatch, ObjectQuery, StoredObject};

/// Metadata fields resolved into embedded objects by default.
pub const DEFAULT_RELATIONS: &[&str] = &["category"];

/// Content store held in memory. Data is lost when dropped.
#[derive(Debug)]
pub struct MemoryContentStore {
    objects: RwLock<Vec<StoredObject>>,
    relations: Vec<String>,
}

impl Default for MemoryContentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryContentStore {
    /// Creates an empty store resolving [`DEFAULT_RELATIONS`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_relations(DEFAULT_RELATIONS)
    }

    /// Creates an empty store resolving the given metadata fields.
    #[must_use]
    pub fn with_relations(relations: &[&str]) -> Self {
        Self {
            objects: RwLock::new(Vec::new()),
            relations: relations.iter().map(|r| (*r).to_string()).collect(),
        }
    }

    /// Returns the number of stored objects.
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    /// Returns true when nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }

    fn matches(object: &StoredObject, query: &ObjectQuery) -> bool {
        object.object_type == query.object_type
            && query
                .filters
                .iter()
                .all(|(path, expected)| Self::field_equals(object, path, expected))
    }

    fn field_equals(object: &StoredObject, path: &str, expected: &str) -> bool {
        let value = match path {
            "id" => return object.id == expected,
            "title" => return object.title == expected,
            "type" => return object.object_type == expected,
            _ => path
                .strip_prefix("metadata.")
                .and_then(|field| object.metadata.get(field)),
        };

        match value {
            Some(Value::String(s)) => s == expected,
            Some(Value::Object(related)) => {
                related.get("id").and_then(Value::as_str) == Some(expected)
            }
            Some(other) => other.to_string() == expected,
            None => false,
        }
    }

    fn resolve(&self, object: &StoredObject, all: &[StoredObject]) -> StoredObject {
        let mut resolved = object.clone();
        let Some(metadata) = resolved.metadata.as_object_mut() else {
            return resolved;
        };
        for relation in &self.relations {
            let Some(id) = metadata.get(relation).and_then(Value::as_str) else {
                continue;
            };
            if let Some(related) = all.iter().find(|o| o.id == id) {
                metadata.insert(
                    relation.clone(),
                    json!({
                        "id": related.id,
                        "type": related.object_type,
                        "title": related.title,
                        "metadata": related.metadata,
                    }),
                );
            }
        }
        resolved
    }

    fn project(object: StoredObject, props: &[String]) -> Result<StoredObject, StoreError> {
        if props.is_empty() {
            return Ok(object);
        }
        let full = serde_json::to_value(&object).map_err(|e| StoreError::Decode(e.to_string()))?;
        let mut projected = Map::new();
        projected.insert("id".to_string(), Value::String(object.id));

        for prop in props {
            let mut segments = prop.split('.');
            let Some(head) = segments.next() else {
                continue;
            };
            let rest: Vec<&str> = segments.collect();
            let mut value = full.get(head);
            for segment in &rest {
                value = value.and_then(|v| v.get(segment));
            }
            let Some(value) = value else {
                continue;
            };

            // Rebuild the nested path inside the projected document.
            let mut cursor = &mut projected;
            let mut key = head;
            for segment in &rest {
                cursor = cursor
                    .entry(key.to_string())
                    .or_insert_with(|| Value::Object(Map::new()))
                    .as_object_mut()
                    .ok_or_else(|| StoreError::Decode(format!("conflicting prop {prop}")))?;
                key = segment;
            }
            cursor.insert(key.to_string(), value.clone());
        }

        serde_json::from_value(Value::Object(projected)).map_err(|e| StoreError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn find(&self, query: &ObjectQuery) -> Result<Vec<StoredObject>, StoreError> {
        let objects = self.objects.read().await;
        objects
            .iter()
            .filter(|object| Self::matches(object, query))
            .take(query.limit.unwrap_or(usize::MAX))
            .map(|object| Self::project(self.resolve(object, &objects), &query.props))
            .collect()
    }

    async fn insert(&self, object: NewObject) -> Result<StoredObject, StoreError> {
        let stored = StoredObject {
            id: Uuid::new_v4().simple().to_string(),
            object_type: object.object_type,
            title: object.title,
            metadata: Value::Object(object.metadata),
            created_at: Some(Utc::now().to_rfc3339()),
        };
        let mut objects = self.objects.write().await;
        objects.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: &str, patch: ObjectPatch) -> Result<StoredObject, StoreError> {
        let mut objects = self.objects.write().await;
        let object = objects
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if let Some(title) = patch.title {
            object.title = title;
        }
        if !object.metadata.is_object() {
            object.metadata = Value::Object(Map::new());
        }
        if let Some(metadata) = object.metadata.as_object_mut() {
            metadata.extend(patch.metadata);
        }
        Ok(object.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut objects = self.objects.write().await;
        let before = objects.len();
        objects.retain(|o| o.id != id);
        if objects.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
