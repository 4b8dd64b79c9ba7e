//! Directory-backed document store.
//!
//! Layout under the root directory:
//! - `records/<id>.json`: one pretty-printed `DocumentRecord` per file
//! - `sources/<id>.bin`: the uploaded bytes
//!
//! A process-local lock serializes writers. Records are written to a
//! temporary file and renamed into place.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use super::{ContentUpdate, DocumentRecord, DocumentStore, NewDocument, RecordId};
use crate::cache::StorageFormatVersion;
use crate::error::StoreError;
use crate::guid::Guid;
use crate::render::Html;

#[derive(Debug)]
pub struct JsonDirStore {
    root: PathBuf,
    lock: Mutex<()>,
}

impl JsonDirStore {
    /// Open a store rooted at `root`, creating its directories if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(root.join("records"))?;
        fs::create_dir_all(root.join("sources"))?;
        Ok(Self {
            root,
            lock: Mutex::new(()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record_path(&self, id: RecordId) -> PathBuf {
        self.root.join("records").join(format!("{id}.json"))
    }

    fn source_path(&self, id: RecordId) -> PathBuf {
        self.root.join("sources").join(format!("{id}.bin"))
    }

    fn read_record(&self, id: RecordId) -> Result<Option<DocumentRecord>, StoreError> {
        match fs::read(self.record_path(id)) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write_record(&self, record: &DocumentRecord) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(record)?;
        write_atomic(&self.record_path(record.id), &bytes)
    }

    fn update_record<T>(
        &self,
        id: RecordId,
        f: impl FnOnce(&mut DocumentRecord) -> T,
    ) -> Result<T, StoreError> {
        let _guard = self.guard();
        let mut record = self.read_record(id)?.ok_or(StoreError::NotFound(id))?;
        let out = f(&mut record);
        self.write_record(&record)?;
        Ok(out)
    }

    /// Ids of all stored records, ascending.
    fn record_ids(&self) -> Result<Vec<RecordId>, StoreError> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(self.root.join("records"))? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(id) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<u64>().ok())
            {
                ids.push(RecordId(id));
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// Every readable record. Unreadable files are logged and skipped so one
    /// damaged record does not hide the others.
    fn all_records(&self) -> Result<Vec<DocumentRecord>, StoreError> {
        let mut records = Vec::new();
        for id in self.record_ids()? {
            match self.read_record(id) {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {}
                Err(e) => tracing::warn!(%id, error = %e, "skipping unreadable record"),
            }
        }
        Ok(records)
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let tmp = path.with_extension("tmp");
    {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

impl DocumentStore for JsonDirStore {
    fn insert(&self, doc: NewDocument) -> Result<DocumentRecord, StoreError> {
        let _guard = self.guard();
        let next = self.record_ids()?.last().map_or(1, |id| id.0 + 1);
        let record = doc.into_record(RecordId(next));
        self.write_record(&record)?;
        Ok(record)
    }

    fn find_by_id(&self, id: RecordId) -> Result<Option<DocumentRecord>, StoreError> {
        self.read_record(id)
    }

    fn find_by_guid(&self, guid: &Guid) -> Result<Option<DocumentRecord>, StoreError> {
        Ok(self.all_records()?.into_iter().find(|r| r.guid == *guid))
    }

    fn list_published(&self) -> Result<Vec<DocumentRecord>, StoreError> {
        Ok(self
            .all_records()?
            .into_iter()
            .filter(DocumentRecord::is_published)
            .collect())
    }

    fn remove(&self, id: RecordId) -> Result<(), StoreError> {
        let _guard = self.guard();
        match fs::remove_file(self.record_path(id)) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(StoreError::NotFound(id)),
            Err(e) => return Err(e.into()),
        }
        match fs::remove_file(self.source_path(id)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }

    fn replace_content(&self, id: RecordId, update: ContentUpdate) -> Result<(), StoreError> {
        self.update_record(id, |record| record.apply(update))
    }

    fn update_render_cache(
        &self,
        id: RecordId,
        revision: u64,
        version: StorageFormatVersion,
        html: Html,
    ) -> Result<bool, StoreError> {
        let _guard = self.guard();
        let mut record = self.read_record(id)?.ok_or(StoreError::NotFound(id))?;
        if !record.set_render_cache(revision, version, html) {
            return Ok(false);
        }
        self.write_record(&record)?;
        Ok(true)
    }

    fn put_source(&self, id: RecordId, bytes: &[u8]) -> Result<(), StoreError> {
        let _guard = self.guard();
        if !self.record_path(id).exists() {
            return Err(StoreError::NotFound(id));
        }
        write_atomic(&self.source_path(id), bytes)
    }

    fn read_source(&self, id: RecordId) -> Result<Vec<u8>, StoreError> {
        match fs::read(self.source_path(id)) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StoreError::NotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    fn download_count(&self, id: RecordId) -> Result<u64, StoreError> {
        self.read_record(id)?
            .map(|r| r.download_count)
            .ok_or(StoreError::NotFound(id))
    }

    fn compare_and_set_download_count(
        &self,
        id: RecordId,
        expected: u64,
        new: u64,
    ) -> Result<bool, StoreError> {
        let _guard = self.guard();
        let mut record = self.read_record(id)?.ok_or(StoreError::NotFound(id))?;
        if record.download_count != expected {
            return Ok(false);
        }
        record.download_count = new;
        self.write_record(&record)?;
        Ok(true)
    }
}
