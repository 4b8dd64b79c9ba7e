//! CSV parsing into a header and a ragged table.

use std::io::Read;

use csv::{ByteRecord, ReaderBuilder};

use super::{Header, Table};
use crate::error::ParseError;

const BOM: char = '\u{feff}';

/// Parse a comma-delimited, double-quote-quoted byte stream.
///
/// With `has_header_row` the first record becomes the header and a missing
/// first record is an error. Otherwise the header is synthesized from the
/// widest row once all rows are read. Rows are stored as read: short rows
/// are padded only when rendered.
pub fn parse<R: Read>(reader: R, has_header_row: bool) -> Result<(Header, Table), ParseError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut record = ByteRecord::new();
    let mut rows = Vec::new();

    let header = if has_header_row {
        if !rdr.read_byte_record(&mut record)? {
            return Err(ParseError::EmptyOrMalformed(
                "expected a header row but the source has no records".into(),
            ));
        }
        let mut columns = decode(&record);
        if let Some(first) = columns.first_mut()
            && first.starts_with(BOM)
        {
            *first = first.trim_start_matches(BOM).to_string();
        }
        Some(Header::new(columns))
    } else {
        None
    };

    while rdr.read_byte_record(&mut record)? {
        let mut row = decode(&record);
        if header.is_none()
            && rows.is_empty()
            && let Some(first) = row.first_mut()
            && first.starts_with(BOM)
        {
            *first = first.trim_start_matches(BOM).to_string();
        }
        rows.push(row);
    }

    let table = Table::new(rows);
    let header = header.unwrap_or_else(|| Header::synthesized(table.widest_row()));

    tracing::debug!(
        columns = header.len(),
        rows = table.len(),
        has_header_row,
        "parsed CSV upload"
    );

    Ok((header, table))
}

fn decode(record: &ByteRecord) -> Vec<String> {
    record
        .iter()
        .map(|field| String::from_utf8_lossy(field).into_owned())
        .collect()
}
