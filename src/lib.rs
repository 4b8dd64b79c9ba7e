//! # doctable
//!
//! Core of a document library: uploads become stored records, CSV uploads
//! are rendered as HTML tables for inline display, and every document can be
//! downloaded through an unguessable GUID.
//!
//! ## Overview
//!
//! doctable provides:
//! - **Parsing**: CSV byte streams into a header and a ragged table
//! - **Rendering**: HTML table fragments with row numbers, row colors,
//!   row selection and multi-line cells rendered as lists
//! - **Versioned caching**: the default rendering is cached with a format
//!   version and refreshed lazily when rendering rules change
//! - **Display attributes**: permissive coercion of directive attributes
//!   (`id`, `rows`, `row-colors`, `row-number`, `page-length`, `date`)
//! - **Downloads**: version 4 GUIDs and a lossless download counter
//! - **Storage**: a `DocumentStore` trait with in-memory and JSON directory
//!   implementations
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use doctable::{DisplayContext, LibraryBuilder, MemoryUpload, ShortcodeAttributes, UploadRequest};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let library = LibraryBuilder::new().build()?;
//!
//!     let upload = MemoryUpload::from_string("staff.csv", "name,email\nJane,jane@example.com\n");
//!     let record = library.upload(&upload, UploadRequest::new())?;
//!
//!     let mut ctx = DisplayContext::default();
//!     let attrs = ShortcodeAttributes::parse(&format!("id={} rows=\"1\"", record.id));
//!     println!("{}", library.display(attrs, &mut ctx));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `yaml` - YAML config files (enabled by default)
//! - `toml` - TOML config files (enabled by default)
//! - `miette` - Pretty error reporting with miette
//! - `cli` - The `doctable` command line tool

pub mod builder;
pub mod cache;
pub mod cli;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod guid;
pub mod io;
pub mod options;
pub mod render;
pub mod store;
pub mod table;

// Re-exports for convenience
pub use builder::LibraryBuilder;
pub use cache::{CURRENT_FORMAT_VERSION, CacheDecision, StorageFormatVersion, should_reuse_cache};
pub use config::{ConfigFormat, LibraryConfig, StoreConfig};
pub use context::{DisplayContext, Notice, NoticeLevel};
pub use engine::{DocumentLibrary, Download, UploadRequest};
pub use error::{ConfigError, LibraryError, ParseError, Stage, StoreError};
pub use guid::Guid;
pub use io::{FileUpload, MemoryUpload, StdinUpload, UploadSource};
pub use options::{DisplayRequest, MAX_SELECTED_NUMBER, ShortcodeAttributes, parse_bool, parse_numbers};
pub use render::{Caption, Html, RenderOptions, Renderer, render};
pub use store::{
    DocumentKind, DocumentRecord, DocumentStore, InMemoryStore, JsonDirStore, PublishStatus,
    RecordId,
};
pub use table::{CsvDocument, Header, Record, Table, parse};

// Miette re-exports
#[cfg(feature = "miette")]
pub use error::DocDiagnostic;
