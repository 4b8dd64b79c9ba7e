//! Record-style access to parsed CSV data.

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::{Header, Table, max_columns};

/// A header and table pair, as produced by an upload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CsvDocument {
    header: Header,
    table: Table,
}

impl CsvDocument {
    pub fn new(header: Header, table: Table) -> Self {
        Self { header, table }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn max_columns(&self) -> usize {
        max_columns(&self.header, &self.table)
    }

    /// Data row at a 0-based index, keyed by header name.
    ///
    /// Empty and missing cells map to `None`. Columns beyond the header are
    /// not addressable by name and are left out.
    pub fn record(&self, index: usize) -> Option<Record> {
        let row = self.table.row(index)?;
        let fields = self
            .header
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let value = row
                    .get(i)
                    .filter(|cell| !cell.is_empty())
                    .cloned();
                (name.to_string(), value)
            })
            .collect();
        Some(Record { fields })
    }

    pub fn records(&self) -> impl Iterator<Item = Record> + '_ {
        (0..self.table.len()).filter_map(|i| self.record(i))
    }

    pub fn into_parts(self) -> (Header, Table) {
        (self.header, self.table)
    }
}

/// One data row keyed by column name, in header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, Option<String>)>,
}

impl Record {
    /// Value for a column. `None` for unknown columns as well as empty cells.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .and_then(|(_, value)| value.as_deref())
    }

    pub fn contains_column(&self, column: &str) -> bool {
        self.fields.iter().any(|(name, _)| name == column)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
