//! In-memory document store.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use super::{ContentUpdate, DocumentRecord, DocumentStore, NewDocument, RecordId};
use crate::cache::StorageFormatVersion;
use crate::error::StoreError;
use crate::guid::Guid;
use crate::render::Html;

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    records: BTreeMap<RecordId, DocumentRecord>,
    sources: HashMap<RecordId, Vec<u8>>,
}

/// Document store held entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, published or not.
    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Every mutation is a plain assignment, so poisoned data is still consistent.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn with_record<T>(
        &self,
        id: RecordId,
        f: impl FnOnce(&mut DocumentRecord) -> T,
    ) -> Result<T, StoreError> {
        let mut inner = self.lock();
        let record = inner.records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        Ok(f(record))
    }
}

impl DocumentStore for InMemoryStore {
    fn insert(&self, doc: NewDocument) -> Result<DocumentRecord, StoreError> {
        let mut inner = self.lock();
        inner.next_id += 1;
        let id = RecordId(inner.next_id);
        let record = doc.into_record(id);
        inner.records.insert(id, record.clone());
        Ok(record)
    }

    fn find_by_id(&self, id: RecordId) -> Result<Option<DocumentRecord>, StoreError> {
        Ok(self.lock().records.get(&id).cloned())
    }

    fn find_by_guid(&self, guid: &Guid) -> Result<Option<DocumentRecord>, StoreError> {
        Ok(self
            .lock()
            .records
            .values()
            .find(|r| r.guid == *guid)
            .cloned())
    }

    fn list_published(&self) -> Result<Vec<DocumentRecord>, StoreError> {
        Ok(self
            .lock()
            .records
            .values()
            .filter(|r| r.is_published())
            .cloned()
            .collect())
    }

    fn remove(&self, id: RecordId) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.records.remove(&id).ok_or(StoreError::NotFound(id))?;
        inner.sources.remove(&id);
        Ok(())
    }

    fn replace_content(&self, id: RecordId, update: ContentUpdate) -> Result<(), StoreError> {
        self.with_record(id, |record| record.apply(update))
    }

    fn update_render_cache(
        &self,
        id: RecordId,
        revision: u64,
        version: StorageFormatVersion,
        html: Html,
    ) -> Result<bool, StoreError> {
        self.with_record(id, |record| record.set_render_cache(revision, version, html))
    }

    fn put_source(&self, id: RecordId, bytes: &[u8]) -> Result<(), StoreError> {
        let mut inner = self.lock();
        if !inner.records.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }
        inner.sources.insert(id, bytes.to_vec());
        Ok(())
    }

    fn read_source(&self, id: RecordId) -> Result<Vec<u8>, StoreError> {
        self.lock()
            .sources
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn download_count(&self, id: RecordId) -> Result<u64, StoreError> {
        self.with_record(id, |record| record.download_count)
    }

    fn compare_and_set_download_count(
        &self,
        id: RecordId,
        expected: u64,
        new: u64,
    ) -> Result<bool, StoreError> {
        self.with_record(id, |record| {
            if record.download_count == expected {
                record.download_count = new;
                true
            } else {
                false
            }
        })
    }
}
