//! Document library: upload, display and download orchestration.

use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::cache::{CURRENT_FORMAT_VERSION, CacheDecision};
use crate::config::LibraryConfig;
use crate::context::{DisplayContext, NoticeLevel};
use crate::error::{LibraryError, Stage, StoreError};
use crate::guid::{self, Guid};
use crate::io::UploadSource;
use crate::options::{DisplayRequest, ShortcodeAttributes};
use crate::render::{Caption, Html, RenderOptions, Renderer};
use crate::store::{
    ContentUpdate, DocumentKind, DocumentRecord, DocumentStore, NewDocument, PublishStatus,
    RecordId,
};
use crate::table::{self, Header, Record, Table};

/// Metadata for a new upload.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Defaults to the file name without extension
    pub title: Option<String>,
    /// Whether the first CSV record holds column names
    pub has_header_row: bool,
    pub status: PublishStatus,
    pub categories: Vec<String>,
    /// Defaults to now
    pub uploaded_at: Option<DateTime<Utc>>,
}

impl Default for UploadRequest {
    fn default() -> Self {
        Self {
            title: None,
            has_header_row: true,
            status: PublishStatus::Published,
            categories: Vec::new(),
            uploaded_at: None,
        }
    }
}

impl UploadRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_header_row(mut self, has_header_row: bool) -> Self {
        self.has_header_row = has_header_row;
        self
    }

    pub fn with_status(mut self, status: PublishStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    pub fn uploaded_at(mut self, at: DateTime<Utc>) -> Self {
        self.uploaded_at = Some(at);
        self
    }
}

/// A served download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
    /// Counter value after this download
    pub download_count: u64,
}

/// Uploads documents, renders them for display and serves downloads.
pub struct DocumentLibrary {
    store: Arc<dyn DocumentStore>,
    renderer: Renderer,
    config: LibraryConfig,
}

impl DocumentLibrary {
    pub fn new(store: Arc<dyn DocumentStore>, config: LibraryConfig) -> Self {
        Self {
            renderer: Renderer::new(config.class_prefix.clone()),
            store,
            config,
        }
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    /// Store a new document. CSV uploads are parsed and their default
    /// rendering cached at the current format version.
    pub fn upload(
        &self,
        source: &dyn UploadSource,
        request: UploadRequest,
    ) -> Result<DocumentRecord, LibraryError> {
        let file_name = source.file_name().to_string();
        let bytes = source
            .read_all()
            .map_err(|e| LibraryError::new(Stage::Open, &file_name, e))?;

        let kind = source.kind();
        let (header, table) = parse_content(kind, &bytes, request.has_header_row)
            .map_err(|e| LibraryError::new(Stage::Parse, &file_name, e))?;

        let title = request
            .title
            .unwrap_or_else(|| default_title(&file_name));
        let created_at = request.uploaded_at.unwrap_or_else(Utc::now);
        let rendered_html_cache = (kind == DocumentKind::Csv).then(|| {
            self.render_default_parts(&title, created_at, &header, &table)
        });

        let record = self
            .store
            .insert(NewDocument {
                guid: guid::generate(),
                title,
                kind,
                status: request.status,
                file_name: file_name.clone(),
                created_at,
                has_header_row: request.has_header_row,
                categories: request.categories,
                header,
                table,
                storage_format_version: CURRENT_FORMAT_VERSION,
                rendered_html_cache,
            })
            .map_err(|e| LibraryError::new(Stage::Store, &file_name, e))?;

        if let Err(e) = self.store.put_source(record.id, &bytes) {
            if let Err(cleanup) = self.store.remove(record.id) {
                tracing::warn!(id = %record.id, error = %cleanup, "could not remove record without source");
            }
            return Err(LibraryError::new(Stage::Store, record.id.to_string(), e));
        }

        tracing::info!(
            id = %record.id,
            guid = %record.guid,
            file = %file_name,
            rows = record.table.len(),
            "document uploaded"
        );
        Ok(record)
    }

    /// Replace a document's file and table wholesale. Nothing from the old
    /// table is kept; the default rendering is recomputed.
    ///
    /// The new source bytes are written first and restored to the previous
    /// bytes if the record update fails.
    pub fn reupload(
        &self,
        id: RecordId,
        source: &dyn UploadSource,
        has_header_row: bool,
    ) -> Result<DocumentRecord, LibraryError> {
        let target = id.to_string();
        let store_err = |e: StoreError| LibraryError::new(Stage::Store, &target, e);

        let existing = self
            .store
            .find_by_id(id)
            .map_err(store_err)?
            .ok_or_else(|| store_err(StoreError::NotFound(id)))?;

        let file_name = source.file_name().to_string();
        let bytes = source
            .read_all()
            .map_err(|e| LibraryError::new(Stage::Open, &file_name, e))?;
        let kind = source.kind();
        let (header, table) = parse_content(kind, &bytes, has_header_row)
            .map_err(|e| LibraryError::new(Stage::Parse, &file_name, e))?;

        let rendered_html_cache = (kind == DocumentKind::Csv).then(|| {
            self.render_default_parts(&existing.title, existing.created_at, &header, &table)
        });

        let previous = match self.store.read_source(id) {
            Ok(previous) => Some(previous),
            Err(StoreError::NotFound(_)) => None,
            Err(e) => return Err(store_err(e)),
        };
        self.store.put_source(id, &bytes).map_err(store_err)?;

        let update = ContentUpdate {
            kind,
            file_name,
            has_header_row,
            header,
            table,
            storage_format_version: CURRENT_FORMAT_VERSION,
            rendered_html_cache,
        };
        if let Err(e) = self.store.replace_content(id, update) {
            if let Some(previous) = previous
                && let Err(restore) = self.store.put_source(id, &previous)
            {
                tracing::warn!(%id, error = %restore, "could not restore previous source");
            }
            return Err(store_err(e));
        }

        tracing::info!(%id, "document re-uploaded");
        self.store
            .find_by_id(id)
            .map_err(store_err)?
            .ok_or_else(|| store_err(StoreError::NotFound(id)))
    }

    /// Render a display directive. Never fails: anything that cannot be
    /// shown yields an empty fragment, with a notice when debugging.
    pub fn display(&self, attrs: ShortcodeAttributes, ctx: &mut DisplayContext) -> Html {
        self.display_request(&attrs.into_request(), ctx)
    }

    pub fn display_request(&self, request: &DisplayRequest, ctx: &mut DisplayContext) -> Html {
        let debug = self.is_debug(ctx);
        let Some(id) = request.id else {
            if debug {
                ctx.push(NoticeLevel::Warning, "display directive without a numeric id");
            }
            return Html::empty();
        };

        let record = match self.store.find_by_id(id) {
            Ok(Some(record)) if record.is_published() => record,
            Ok(_) => {
                if debug {
                    ctx.push(NoticeLevel::Warning, format!("no published document {id}"));
                }
                return Html::empty();
            }
            Err(e) => {
                tracing::warn!(%id, error = %e, "document lookup failed");
                if debug {
                    ctx.push(NoticeLevel::Error, format!("document {id}: {e}"));
                }
                return Html::empty();
            }
        };

        self.render_record(&record, &request.options, ctx)
    }

    /// Render a stored record, reusing or refreshing its cached HTML.
    pub fn render_record(
        &self,
        record: &DocumentRecord,
        options: &RenderOptions,
        ctx: &mut DisplayContext,
    ) -> Html {
        if record.kind != DocumentKind::Csv {
            return self
                .renderer
                .render_download_link(&self.download_url(record), &record.title);
        }

        let debug = self.is_debug(ctx);
        let decision = CacheDecision::decide(
            record.storage_format_version,
            record.rendered_html_cache.is_some(),
            options,
            debug,
        );
        tracing::debug!(id = %record.id, ?decision, "render cache decision");

        match decision {
            CacheDecision::Reuse => record.rendered_html_cache.clone().unwrap_or_default(),
            CacheDecision::RenderAndPersist => {
                let html = self.render_with(record, options);
                match self.store.update_render_cache(
                    record.id,
                    record.content_revision,
                    CURRENT_FORMAT_VERSION,
                    html.clone(),
                ) {
                    Ok(true) => {}
                    Ok(false) => {
                        tracing::debug!(id = %record.id, "content replaced while rendering, cache not stored");
                    }
                    Err(e) => {
                        tracing::warn!(id = %record.id, error = %e, "could not persist rendered table");
                    }
                }
                html
            }
            CacheDecision::RenderTransient => self.render_with(record, options),
            CacheDecision::Unsupported(version) => {
                let message = format!("Unsupported storage format version {version}");
                tracing::warn!(id = %record.id, %version, "unsupported storage format version");
                ctx.push(
                    NoticeLevel::Warning,
                    format!("document {}: {message}", record.id),
                );
                if debug {
                    self.renderer.render_placeholder(&message)
                } else {
                    Html::empty()
                }
            }
        }
    }

    /// Column names of a CSV document.
    pub fn csv_header(&self, id: RecordId) -> Option<Header> {
        self.find_csv(id).map(|record| record.header)
    }

    /// A CSV data row keyed by column name. `None` for unknown documents and
    /// out-of-range rows.
    pub fn csv_record(&self, id: RecordId, index: usize) -> Option<Record> {
        self.find_csv(id)?.csv()?.record(index)
    }

    /// Serve a document by its public GUID and count the download.
    ///
    /// Malformed and unknown GUIDs yield `Ok(None)`.
    pub fn download(&self, guid: &str) -> Result<Option<Download>, LibraryError> {
        let Ok(guid) = guid.parse::<Guid>() else {
            return Ok(None);
        };
        let target = guid.to_string();
        let store_err = |e: StoreError| LibraryError::new(Stage::Store, &target, e);

        let Some(record) = self.store.find_by_guid(&guid).map_err(store_err)? else {
            return Ok(None);
        };
        if !record.is_published() {
            return Ok(None);
        }

        let bytes = self.store.read_source(record.id).map_err(store_err)?;
        let download_count = self.store.increment_counter(record.id).map_err(store_err)?;
        tracing::info!(id = %record.id, %guid, download_count, "document downloaded");

        Ok(Some(Download {
            file_name: record.file_name,
            content_type: record.kind.content_type(),
            bytes,
            download_count,
        }))
    }

    /// Public download link for a record.
    pub fn download_url(&self, record: &DocumentRecord) -> String {
        format!(
            "{}/{}",
            self.config.download_prefix.trim_end_matches('/'),
            record.guid
        )
    }

    pub fn list_published(&self) -> Result<Vec<DocumentRecord>, LibraryError> {
        self.store
            .list_published()
            .map_err(|e| LibraryError::new(Stage::Store, "published documents", e))
    }

    fn is_debug(&self, ctx: &DisplayContext) -> bool {
        self.config.debug || ctx.is_debug()
    }

    fn find_csv(&self, id: RecordId) -> Option<DocumentRecord> {
        match self.store.find_by_id(id) {
            Ok(Some(record)) if record.kind == DocumentKind::Csv => Some(record),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(%id, error = %e, "document lookup failed");
                None
            }
        }
    }

    fn render_with(&self, record: &DocumentRecord, options: &RenderOptions) -> Html {
        let caption = self.caption(&record.title, record.created_at);
        self.renderer
            .render_captioned(&caption, &record.header, &record.table, options)
    }

    fn render_default_parts(
        &self,
        title: &str,
        created_at: DateTime<Utc>,
        header: &Header,
        table: &Table,
    ) -> Html {
        let caption = self.caption(title, created_at);
        self.renderer
            .render_captioned(&caption, header, table, &RenderOptions::default())
    }

    fn caption(&self, title: &str, created_at: DateTime<Utc>) -> Caption {
        Caption {
            title: title.to_string(),
            date: Some(self.format_date(created_at)),
        }
    }

    fn format_date(&self, at: DateTime<Utc>) -> String {
        let mut out = String::new();
        if write!(out, "{}", at.format(&self.config.date_format)).is_err() {
            out = at.format("%Y-%m-%d").to_string();
        }
        out
    }
}

fn parse_content(
    kind: DocumentKind,
    bytes: &[u8],
    has_header_row: bool,
) -> Result<(Header, Table), crate::error::ParseError> {
    match kind {
        DocumentKind::Csv => table::parse(bytes, has_header_row),
        DocumentKind::Pdf | DocumentKind::Other => Ok((Header::default(), Table::default())),
    }
}

fn default_title(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string())
}
