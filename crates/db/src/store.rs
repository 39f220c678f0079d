//! Collection-based document store abstraction.
//!
//! Every entity is persisted as a JSON object keyed by `_id` inside a named
//! collection. Backends implement [`DocumentStore`]; repositories only speak
//! in terms of [`Filter`], [`Sort`] and [`Document`].

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// A stored JSON object.
pub type Document = serde_json::Map<String, Value>;

/// Field holding the primary key of every document.
pub const ID_FIELD: &str = "_id";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures raised by a store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The PostgreSQL backend failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A document could not be converted to or from its typed model.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An insert reused an `_id` already present in the collection.
    #[error("Duplicate id '{id}' in collection '{collection}'")]
    DuplicateId { collection: String, id: String },

    /// A document or query was structurally invalid.
    #[error("Malformed document: {0}")]
    Malformed(String),
}

// ---------------------------------------------------------------------------
// Query types
// ---------------------------------------------------------------------------

/// Conjunction of top-level field equality conditions.
///
/// A `null` condition value matches documents where the field is absent or
/// explicitly `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
}

impl Filter {
    /// A filter matching every document.
    pub fn all() -> Self {
        Self::default()
    }

    /// A filter matching the document with the given primary key.
    pub fn by_id(id: &str) -> Self {
        Self::all().eq(ID_FIELD, id)
    }

    /// Add an equality condition.
    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.conditions.push((field.to_string(), value.into()));
        self
    }

    pub fn conditions(&self) -> &[(String, Value)] {
        &self.conditions
    }

    /// Whether `document` satisfies every condition.
    pub fn matches(&self, document: &Document) -> bool {
        self.conditions
            .iter()
            .all(|(field, expected)| match document.get(field) {
                None | Some(Value::Null) => expected.is_null(),
                Some(actual) => actual == expected,
            })
    }
}

/// Ordering on a timestamp field.
///
/// Sort keys hold RFC 3339 timestamps. Documents missing the key order as the
/// oldest. Ties keep insertion order: oldest first when ascending, newest
/// first when descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: &'static str,
    pub descending: bool,
}

impl Sort {
    pub fn newest_first(field: &'static str) -> Self {
        Self {
            field,
            descending: true,
        }
    }

    pub fn oldest_first(field: &'static str) -> Self {
        Self {
            field,
            descending: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Store trait
// ---------------------------------------------------------------------------

/// Minimal persistence contract shared by all backends.
///
/// Calls are independent round trips; the store offers no multi-call
/// transactions. Conditional writes are expressed by putting the expected
/// state into the [`Filter`] of [`DocumentStore::update`].
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a document by primary key.
    async fn find_by_id(&self, collection: &str, id: &str)
        -> Result<Option<Document>, StoreError>;

    /// Fetch all documents matching `filter`, optionally ordered.
    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        sort: Option<Sort>,
    ) -> Result<Vec<Document>, StoreError>;

    /// Fetch the first document matching `filter`.
    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self.find(collection, filter, None).await?.into_iter().next())
    }

    /// Insert a new document. Fails with [`StoreError::DuplicateId`] if the
    /// collection already holds its `_id`.
    async fn insert(&self, collection: &str, document: Document) -> Result<(), StoreError>;

    /// Overwrite the top-level fields in `set` on every matching document.
    /// `_id` is never changed. Returns the number of documents matched.
    async fn update(
        &self,
        collection: &str,
        filter: &Filter,
        set: Document,
    ) -> Result<u64, StoreError>;

    /// Remove matching documents. Returns the number removed.
    async fn delete(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// Typed conversion helpers
// ---------------------------------------------------------------------------

/// Serialize a model into a document.
pub fn to_document<T: Serialize>(value: &T) -> Result<Document, StoreError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Malformed(format!(
            "expected a JSON object, got {other}"
        ))),
    }
}

/// Deserialize a document into a model.
pub fn from_document<T: DeserializeOwned>(document: Document) -> Result<T, StoreError> {
    Ok(serde_json::from_value(Value::Object(document))?)
}

/// Read the `_id` of a document.
pub fn document_id(document: &Document) -> Result<&str, StoreError> {
    document
        .get(ID_FIELD)
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::Malformed(format!("document has no string '{ID_FIELD}'")))
}
