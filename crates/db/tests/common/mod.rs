//! Shared helpers for repository integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use playground_db::store::{Document, DocumentStore, Filter, Sort, StoreError};
use playground_db::MemoryStore;

/// A [`MemoryStore`] wrapper that counts calls and can simulate losing every
/// conditional-update race.
#[derive(Default)]
pub struct CountingStore {
    pub inner: MemoryStore,
    calls: AtomicUsize,
    updates: AtomicUsize,
    lose_updates: AtomicBool,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `update` match nothing, as if another writer always won.
    pub fn losing_updates() -> Self {
        let store = Self::default();
        store.lose_updates.store(true, Ordering::SeqCst);
        store
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn update_attempts(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentStore for CountingStore {
    async fn find_by_id(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, StoreError> {
        self.record();
        self.inner.find_by_id(collection, id).await
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        sort: Option<Sort>,
    ) -> Result<Vec<Document>, StoreError> {
        self.record();
        self.inner.find(collection, filter, sort).await
    }

    async fn insert(&self, collection: &str, document: Document) -> Result<(), StoreError> {
        self.record();
        self.inner.insert(collection, document).await
    }

    async fn update(
        &self,
        collection: &str,
        filter: &Filter,
        set: Document,
    ) -> Result<u64, StoreError> {
        self.record();
        self.updates.fetch_add(1, Ordering::SeqCst);
        if self.lose_updates.load(Ordering::SeqCst) {
            return Ok(0);
        }
        self.inner.update(collection, filter, set).await
    }

    async fn delete(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        self.record();
        self.inner.delete(collection, filter).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }
}
