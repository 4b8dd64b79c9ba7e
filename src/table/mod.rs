//! Tabular data parsed from CSV uploads.
//!
//! This module provides:
//! - `Header` and `Table`: the parsed, immutable shape of an upload
//! - `parse`: reads a CSV byte stream into a header and a (possibly ragged) table
//! - `CsvDocument`: header + table pair with record-style accessors

mod parse;
mod record;

pub use parse::parse;
pub use record::{CsvDocument, Record};

use serde::{Deserialize, Serialize};

/// Ordered column names.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Header(Vec<String>);

impl Header {
    pub fn new(columns: Vec<String>) -> Self {
        Self(columns)
    }

    /// Build `Column 1`, `Column 2`, ... for tables uploaded without a header row.
    pub fn synthesized(width: usize) -> Self {
        Self((1..=width).map(|n| format!("Column {n}")).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// Ordered rows of string cells. Rows may have different lengths.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table(Vec<Vec<String>>);

impl Table {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self(rows)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Row at a 0-based position.
    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.0.get(index).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.0.iter().map(Vec::as_slice)
    }

    /// Width of the widest row.
    pub fn widest_row(&self) -> usize {
        self.0.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Column count every rendered row is padded to.
pub fn max_columns(header: &Header, table: &Table) -> usize {
    header.len().max(table.widest_row())
}
