//! Generic document-store contract.
//!
//! This module provides the `DocumentStore<D>` trait that defines the CRUD
//! surface every collection shares, plus the paging primitives understood by
//! the engines.
//!
//! # DRY Pattern
//!
//! Instead of each collection trait repeating `find_all`, `find_one`,
//! `insert`, `save`, `delete` with identical signatures, the per-collection
//! traits in [`super::collections`] inherit from this base trait and only add
//! their derived query methods.

use async_trait::async_trait;
use thiserror::Error;

/// Faults raised by a storage engine.
///
/// Engines never report "not found" through this type; absence is encoded
/// in the result of the read operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Duplicate key '{key}' in collection '{collection}'")]
    DuplicateKey {
        collection: &'static str,
        key: String,
    },

    #[error("Document serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage backend failure: {0}")]
    Backend(#[from] sqlx::Error),

    #[error("Migration failure: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// A storable document: keyed by a string identity within its collection.
pub trait Document: Clone + Send + Sync + 'static {
    /// Collection this document belongs to.
    const COLLECTION: &'static str;

    /// The identity key. Empty means "not yet assigned".
    fn key(&self) -> &str;

    /// Assigns a store-generated identity. Called by engines on insert
    /// when the key is empty.
    fn assign_key(&mut self, key: String);
}

/// Base trait for document collections.
///
/// # Error Handling
///
/// All methods return `Result<_, StoreError>`. Adapters convert these into
/// the repository error taxonomy; engines never panic on missing documents.
#[async_trait]
pub trait DocumentStore<D>: Send + Sync
where
    D: Document,
{
    /// Returns every document in the collection, in no particular order.
    async fn find_all(&self) -> Result<Vec<D>, StoreError>;

    /// Point lookup by key. Returns `Ok(None)` if absent.
    async fn find_one(&self, key: &str) -> Result<Option<D>, StoreError>;

    /// Inserts a new document, assigning a key if the document has none.
    ///
    /// Returns the persisted form, including any assigned key.
    ///
    /// # Errors
    ///
    /// - `DuplicateKey` if a document with the same key already exists
    async fn insert(&self, doc: D) -> Result<D, StoreError>;

    /// Upserts a document by key, returning the persisted form.
    async fn save(&self, doc: D) -> Result<D, StoreError>;

    /// Removes a document by key. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}

/// Field a paged query sorts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    CreatedAt,
    UpdatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Sort specification for paged queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub key: SortKey,
    pub order: SortOrder,
}

impl Sort {
    pub fn ascending(key: SortKey) -> Self {
        Self {
            key,
            order: SortOrder::Ascending,
        }
    }

    pub fn descending(key: SortKey) -> Self {
        Self {
            key,
            order: SortOrder::Descending,
        }
    }
}

/// Engine-native page request. Page indexes are 0-based here; the adapter
/// layer owns the translation from the 1-based domain contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
    pub size: u32,
    pub sort: Sort,
}

/// One page of documents plus the total match count for the filter.
#[derive(Debug, Clone)]
pub struct DocumentPage<D> {
    pub content: Vec<D>,
    /// 0-based index of this page.
    pub page: u32,
    pub total: u64,
}
