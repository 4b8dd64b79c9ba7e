//! Error types for doctable operations.
//!
//! This module provides:
//! - `ParseError`: Failures while reading a CSV upload
//! - `StoreError`: Failures reported by a `DocumentStore`
//! - `ConfigError`: Failures while loading a `LibraryConfig`
//! - `Stage`: Indicates where a library operation failed
//! - `LibraryError`: A single failure with stage and target context

use std::fmt;

use thiserror::Error;

use crate::store::RecordId;

/// Errors produced while parsing a CSV byte stream.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The underlying stream could not be opened or read
    #[error("could not read CSV source: {0}")]
    Io(#[from] std::io::Error),

    /// A header row was requested but no first record could be read
    #[error("CSV source is empty or malformed: {0}")]
    EmptyOrMalformed(String),
}

impl From<csv::Error> for ParseError {
    fn from(err: csv::Error) -> Self {
        match err.into_kind() {
            csv::ErrorKind::Io(e) => ParseError::Io(e),
            other => ParseError::EmptyOrMalformed(format!("{other:?}")),
        }
    }
}

/// Errors reported by document store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record with the given id exists
    #[error("document {0} not found")]
    NotFound(RecordId),

    /// I/O error in the backing storage
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted record could not be encoded or decoded
    #[error("record encoding error: {0}")]
    Serde(#[from] serde_json::Error),

    /// The optimistic counter update kept losing to concurrent writers
    #[error("download counter for document {id} still contended after {attempts} attempts")]
    Contention { id: RecordId, attempts: u32 },
}

/// Errors produced while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Extension does not map to a known (and enabled) config format
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid config: {0}")]
    Invalid(Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Error while opening or reading the upload source
    Open,
    Parse,
    /// Error in the document store
    Store,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Open => write!(f, "Open"),
            Stage::Parse => write!(f, "Parse"),
            Stage::Store => write!(f, "Store"),
        }
    }
}

/// A failed library operation.
#[derive(Debug)]
pub struct LibraryError {
    /// Stage where the error occurred
    pub stage: Stage,
    /// Identifier of the target (upload file name, record id, GUID)
    pub target: String,
    /// The underlying error
    pub error: Box<dyn std::error::Error + Send + Sync>,
}

impl LibraryError {
    pub fn new(
        stage: Stage,
        target: impl Into<String>,
        error: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            stage,
            target: target.into(),
            error: error.into(),
        }
    }

    /// Message suitable for showing to the editor who triggered the upload.
    pub fn user_message(&self) -> String {
        match self.stage {
            Stage::Open | Stage::Parse => {
                format!("Could not process upload '{}': {}", self.target, self.error)
            }
            Stage::Store => format!("Could not save document {}", self.target),
        }
    }
}

impl fmt::Display for LibraryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.stage, self.target, self.error)
    }
}

impl std::error::Error for LibraryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.error.as_ref())
    }
}

#[cfg(feature = "miette")]
mod miette_impl;

#[cfg(feature = "miette")]
pub use miette_impl::*;
