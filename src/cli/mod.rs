//! CLI integration helpers.
//!
//! Flag values are parsed with the same coercion rules as display
//! attributes, so `--rows 1-3,7` on the command line selects the same rows
//! as `rows="1-3,7"` in a directive.
//!
//! # Example with sarge
//!
//! ```rust,ignore
//! use doctable::cli::{ColorList, DisplayArgs, RowSelection};
//! use sarge::prelude::*;
//!
//! let mut reader = ArgumentReader::new();
//! let rows = reader.add::<RowSelection>(tag::long("rows"));
//! let args = reader.parse()?;
//!
//! let display = DisplayArgs::new().with_rows(rows.get(&args).and_then(Result::ok));
//! let options = display.render_options();
//! ```

#[cfg(feature = "cli")]
mod sarge;

use crate::options::{parse_colors, parse_numbers};
use crate::render::RenderOptions;

/// 1-based rows selected on the command line, sorted and deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSelection(pub Vec<usize>);

impl RowSelection {
    pub fn parse(value: &str) -> Self {
        Self(parse_numbers(Some(value)))
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Row background colors selected on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorList(pub Vec<String>);

impl ColorList {
    pub fn parse(value: &str) -> Self {
        Self(parse_colors(value).unwrap_or_default())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Display flags collected from a command line.
#[derive(Debug, Clone, Default)]
pub struct DisplayArgs {
    pub rows: Option<RowSelection>,
    pub row_colors: Option<ColorList>,
    pub hide_row_numbers: bool,
    pub hide_date: bool,
    pub page_length: Option<u32>,
}

impl DisplayArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(mut self, rows: Option<RowSelection>) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_row_colors(mut self, colors: Option<ColorList>) -> Self {
        self.row_colors = colors;
        self
    }

    pub fn with_hidden_row_numbers(mut self, hide: bool) -> Self {
        self.hide_row_numbers = hide;
        self
    }

    pub fn with_hidden_date(mut self, hide: bool) -> Self {
        self.hide_date = hide;
        self
    }

    pub fn with_page_length(mut self, page_length: Option<u32>) -> Self {
        self.page_length = page_length;
        self
    }

    /// Merge the flags over the default options.
    pub fn render_options(&self) -> RenderOptions {
        let mut options = RenderOptions::default()
            .with_row_numbers(!self.hide_row_numbers)
            .with_caption_date(!self.hide_date);
        if let Some(rows) = &self.rows {
            options = options.with_included_rows(rows.0.clone());
        }
        if let Some(colors) = &self.row_colors {
            options = options.with_row_colors(colors.0.clone());
        }
        if let Some(n) = self.page_length {
            options = options.with_page_length(n);
        }
        options
    }
}
