//! Document storage abstraction.
//!
//! This module provides:
//! - `DocumentRecord`: the persisted shape of an upload
//! - `DocumentStore`: trait the library reads and writes records through
//! - `InMemoryStore`: mutex-guarded store for tests and short-lived use
//! - `JsonDirStore`: one JSON file per record in a directory

mod json_dir;
mod memory;

pub use json_dir::JsonDirStore;
pub use memory::InMemoryStore;

use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::StorageFormatVersion;
use crate::error::StoreError;
use crate::guid::Guid;
use crate::render::Html;
use crate::table::{CsvDocument, Header, Table};

/// Attempts made by `increment_counter` before giving up.
pub const MAX_COUNTER_ATTEMPTS: u32 = 256;

/// Internal numeric record id. Never exposed in download links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Csv,
    Pdf,
    Other,
}

impl DocumentKind {
    /// Classify by file extension, case-insensitively.
    pub fn from_file_name(name: &str) -> Self {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => DocumentKind::Csv,
            Some("pdf") => DocumentKind::Pdf,
            _ => DocumentKind::Other,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            DocumentKind::Csv => "text/csv",
            DocumentKind::Pdf => "application/pdf",
            DocumentKind::Other => "application/octet-stream",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishStatus {
    #[default]
    Published,
    Draft,
}

/// A stored document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: RecordId,
    pub guid: Guid,
    pub title: String,
    pub kind: DocumentKind,
    #[serde(default)]
    pub status: PublishStatus,
    pub file_name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub has_header_row: bool,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub header: Header,
    #[serde(default)]
    pub table: Table,
    pub storage_format_version: StorageFormatVersion,
    #[serde(default)]
    pub rendered_html_cache: Option<Html>,
    #[serde(default)]
    pub download_count: u64,
    /// Bumped every time the content is replaced
    #[serde(default)]
    pub content_revision: u64,
}

impl DocumentRecord {
    pub fn is_published(&self) -> bool {
        self.status == PublishStatus::Published
    }

    /// Header and table as a standalone document.
    pub fn csv(&self) -> Option<CsvDocument> {
        (self.kind == DocumentKind::Csv)
            .then(|| CsvDocument::new(self.header.clone(), self.table.clone()))
    }

    pub(crate) fn apply(&mut self, update: ContentUpdate) {
        self.kind = update.kind;
        self.file_name = update.file_name;
        self.has_header_row = update.has_header_row;
        self.header = update.header;
        self.table = update.table;
        self.storage_format_version = update.storage_format_version;
        self.rendered_html_cache = update.rendered_html_cache;
        self.content_revision += 1;
    }

    /// Store `html` only if it was rendered from the current content.
    pub(crate) fn set_render_cache(
        &mut self,
        revision: u64,
        version: StorageFormatVersion,
        html: Html,
    ) -> bool {
        if self.content_revision != revision {
            return false;
        }
        self.storage_format_version = version;
        self.rendered_html_cache = Some(html);
        true
    }
}

/// Everything needed to create a record; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub guid: Guid,
    pub title: String,
    pub kind: DocumentKind,
    pub status: PublishStatus,
    pub file_name: String,
    pub created_at: DateTime<Utc>,
    pub has_header_row: bool,
    pub categories: Vec<String>,
    pub header: Header,
    pub table: Table,
    pub storage_format_version: StorageFormatVersion,
    pub rendered_html_cache: Option<Html>,
}

impl NewDocument {
    pub(crate) fn into_record(self, id: RecordId) -> DocumentRecord {
        DocumentRecord {
            id,
            guid: self.guid,
            title: self.title,
            kind: self.kind,
            status: self.status,
            file_name: self.file_name,
            created_at: self.created_at,
            has_header_row: self.has_header_row,
            categories: self.categories,
            header: self.header,
            table: self.table,
            storage_format_version: self.storage_format_version,
            rendered_html_cache: self.rendered_html_cache,
            download_count: 0,
            content_revision: 0,
        }
    }
}

/// Replacement content for a re-upload, together with its default rendering.
#[derive(Debug, Clone)]
pub struct ContentUpdate {
    pub kind: DocumentKind,
    pub file_name: String,
    pub has_header_row: bool,
    pub header: Header,
    pub table: Table,
    pub storage_format_version: StorageFormatVersion,
    /// `None` leaves the record without a cache
    pub rendered_html_cache: Option<Html>,
}

/// Data access for document records and their source files.
///
/// Implementations must be safe to share between request handlers.
pub trait DocumentStore: Send + Sync {
    /// Persist a new record and return it with its assigned id.
    fn insert(&self, doc: NewDocument) -> Result<DocumentRecord, StoreError>;

    fn find_by_id(&self, id: RecordId) -> Result<Option<DocumentRecord>, StoreError>;

    fn find_by_guid(&self, guid: &Guid) -> Result<Option<DocumentRecord>, StoreError>;

    /// Published records ordered by id.
    fn list_published(&self) -> Result<Vec<DocumentRecord>, StoreError>;

    /// Delete a record and its source bytes.
    fn remove(&self, id: RecordId) -> Result<(), StoreError>;

    /// Replace header, table, file details and render cache in one write.
    /// Bumps `content_revision`.
    fn replace_content(&self, id: RecordId, update: ContentUpdate) -> Result<(), StoreError>;

    /// Store a rendering of the content at `revision`.
    ///
    /// Returns `false` and writes nothing when the content has been replaced
    /// since that revision was read.
    fn update_render_cache(
        &self,
        id: RecordId,
        revision: u64,
        version: StorageFormatVersion,
        html: Html,
    ) -> Result<bool, StoreError>;

    fn put_source(&self, id: RecordId, bytes: &[u8]) -> Result<(), StoreError>;

    fn read_source(&self, id: RecordId) -> Result<Vec<u8>, StoreError>;

    fn download_count(&self, id: RecordId) -> Result<u64, StoreError>;

    /// Set the counter to `new` only if it still equals `expected`.
    fn compare_and_set_download_count(
        &self,
        id: RecordId,
        expected: u64,
        new: u64,
    ) -> Result<bool, StoreError>;

    /// Increment the download counter and return the new value.
    ///
    /// Read, then conditionally write; retried when another writer got there
    /// first, so no increment is lost.
    fn increment_counter(&self, id: RecordId) -> Result<u64, StoreError> {
        for attempt in 1..=MAX_COUNTER_ATTEMPTS {
            let current = self.download_count(id)?;
            if self.compare_and_set_download_count(id, current, current + 1)? {
                return Ok(current + 1);
            }
            tracing::debug!(%id, attempt, "download counter update lost a race, retrying");
        }
        tracing::warn!(%id, "download counter contention, giving up");
        Err(StoreError::Contention {
            id,
            attempts: MAX_COUNTER_ATTEMPTS,
        })
    }
}
