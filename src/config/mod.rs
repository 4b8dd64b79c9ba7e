//! Configuration for a document library.
//!
//! This module provides:
//! - `LibraryConfig`: display and storage settings
//! - `StoreConfig`: which `DocumentStore` backs the library
//! - `ConfigFormat`: file formats a config can be loaded from

mod format;
mod library;

pub use format::ConfigFormat;
pub use library::{LibraryConfig, StoreConfig};
