//! Store object and query types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Object type tag for users.
pub const USERS: &str = "users";
/// Object type tag for categories.
pub const CATEGORIES: &str = "categories";
/// Object type tag for transactions.
pub const TRANSACTIONS: &str = "transactions";

/// An object as returned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredObject {
    /// Object ID.
    pub id: String,
    /// Type tag.
    #[serde(rename = "type", default)]
    pub object_type: String,
    /// Title.
    #[serde(default)]
    pub title: String,
    /// Custom fields.
    #[serde(default)]
    pub metadata: Value,
    /// Creation timestamp, as the store formats it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl StoredObject {
    /// Returns a metadata field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.metadata.get(name)
    }

    /// Returns a metadata field as a string slice.
    #[must_use]
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }
}

/// An object to insert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewObject {
    /// Type tag.
    #[serde(rename = "type")]
    pub object_type: String,
    /// Title.
    pub title: String,
    /// Custom fields.
    pub metadata: Map<String, Value>,
}

impl NewObject {
    /// Creates an object of the given type.
    #[must_use]
    pub fn new(object_type: &str, title: &str) -> Self {
        Self {
            object_type: object_type.to_string(),
            title: title.to_string(),
            metadata: Map::new(),
        }
    }

    /// Adds a metadata field.
    #[must_use]
    pub fn field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(name.to_string(), value.into());
        self
    }
}

/// Partial update of an object; metadata keys are merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ObjectPatch {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Metadata fields to overwrite.
    pub metadata: Map<String, Value>,
}

impl ObjectPatch {
    /// Sets a metadata field.
    #[must_use]
    pub fn field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(name.to_string(), value.into());
        self
    }

    /// Returns true when nothing would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.metadata.is_empty()
    }
}

/// A query: one type tag plus equality filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectQuery {
    /// Type tag to match.
    pub object_type: String,
    /// Field path (`id`, `title`, `metadata.<field>`) to expected value.
    pub filters: BTreeMap<String, String>,
    /// Fields to return; empty means all.
    pub props: Vec<String>,
    /// Maximum number of objects.
    pub limit: Option<usize>,
}

impl ObjectQuery {
    /// Creates a query for all objects of a type.
    #[must_use]
    pub fn new(object_type: &str) -> Self {
        Self {
            object_type: object_type.to_string(),
            ..Self::default()
        }
    }

    /// Adds an equality filter.
    #[must_use]
    pub fn filter(mut self, path: &str, value: impl Into<String>) -> Self {
        self.filters.insert(path.to_string(), value.into());
        self
    }

    /// Restricts the returned fields.
    #[must_use]
    pub fn props(mut self, props: &[&str]) -> Self {
        self.props = props.iter().map(|p| (*p).to_string()).collect();
        self
    }

    /// Caps the number of returned objects.
    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Renders the type tag and filters as the store's JSON query document.
    #[must_use]
    pub fn to_query_document(&self) -> Value {
        let mut doc = Map::new();
        doc.insert("type".to_string(), Value::String(self.object_type.clone()));
        for (path, value) in &self.filters {
            doc.insert(path.clone(), Value::String(value.clone()));
        }
        Value::Object(doc)
    }
}
