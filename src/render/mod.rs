//! HTML table rendering.
//!
//! This module provides:
//! - `RenderOptions`: typed display options with fixed defaults
//! - `Html`: a rendered fragment
//! - `Renderer`: turns a header and table into a `<table>` fragment
//! - `render`: convenience entry point using the default class prefix

mod html;

pub use html::escape_html;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::table::{Header, Table, max_columns};

pub const DEFAULT_PAGE_LENGTH: u32 = 10;
pub const DEFAULT_CLASS_PREFIX: &str = "doctable";

/// Display options for a single render request.
///
/// Only a render with `RenderOptions::default()` is ever cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Prepend a `#` column holding the 1-based row index
    pub show_row_numbers: bool,
    /// Background colors cycled over displayed rows
    pub row_colors: Option<Vec<String>>,
    /// 1-based rows to display, in display order. Empty means all rows.
    pub included_rows: Vec<usize>,
    /// Rows per page for client-side pagination
    pub page_length: u32,
    /// Show the upload date in the caption
    pub show_caption_date: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_row_numbers: true,
            row_colors: None,
            included_rows: Vec::new(),
            page_length: DEFAULT_PAGE_LENGTH,
            show_caption_date: true,
        }
    }
}

impl RenderOptions {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn with_row_numbers(mut self, show: bool) -> Self {
        self.show_row_numbers = show;
        self
    }

    pub fn with_row_colors(mut self, colors: Vec<String>) -> Self {
        self.row_colors = if colors.is_empty() { None } else { Some(colors) };
        self
    }

    pub fn with_included_rows(mut self, rows: Vec<usize>) -> Self {
        self.included_rows = rows;
        self
    }

    /// Zero is ignored; page length stays positive.
    pub fn with_page_length(mut self, page_length: u32) -> Self {
        if page_length > 0 {
            self.page_length = page_length;
        }
        self
    }

    pub fn with_caption_date(mut self, show: bool) -> Self {
        self.show_caption_date = show;
        self
    }
}

/// A rendered HTML fragment.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Html(String);

impl Html {
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Html {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Html> for String {
    fn from(html: Html) -> Self {
        html.0
    }
}

/// Title and optional date shown above a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption {
    pub title: String,
    /// Already formatted for display
    pub date: Option<String>,
}

/// Renders tables with a configurable CSS class prefix.
#[derive(Debug, Clone)]
pub struct Renderer {
    class_prefix: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(DEFAULT_CLASS_PREFIX)
    }
}

impl Renderer {
    pub fn new(class_prefix: impl Into<String>) -> Self {
        Self {
            class_prefix: class_prefix.into(),
        }
    }

    pub fn class_prefix(&self) -> &str {
        &self.class_prefix
    }

    /// Render a table fragment without caption.
    pub fn render(&self, header: &Header, table: &Table, options: &RenderOptions) -> Html {
        self.render_table(None, header, table, options)
    }

    /// Render a table fragment with a caption. The date is only shown when
    /// `options.show_caption_date` is set.
    pub fn render_captioned(
        &self,
        caption: &Caption,
        header: &Header,
        table: &Table,
        options: &RenderOptions,
    ) -> Html {
        self.render_table(Some(caption), header, table, options)
    }

    /// Single-cell table shown in place of a document whose stored format
    /// this renderer does not understand.
    pub fn render_placeholder(&self, message: &str) -> Html {
        let p = &self.class_prefix;
        Html(format!(
            "<table class=\"{p} {p}-unsupported\">\n<tbody>\n<tr><td>{}</td></tr>\n</tbody>\n</table>\n",
            escape_html(message)
        ))
    }

    /// A link to a document that is not rendered as a table.
    pub fn render_download_link(&self, href: &str, title: &str) -> Html {
        Html(format!(
            "<a class=\"{}-download\" href=\"{}\">{}</a>",
            self.class_prefix,
            escape_html(href),
            escape_html(title)
        ))
    }

    fn render_table(
        &self,
        caption: Option<&Caption>,
        header: &Header,
        table: &Table,
        options: &RenderOptions,
    ) -> Html {
        let p = &self.class_prefix;
        let width = max_columns(header, table);
        let mut out = String::new();

        out.push_str(&format!(
            "<table class=\"{p}\" data-page-length=\"{}\">\n",
            options.page_length
        ));

        if let Some(caption) = caption {
            out.push_str("<caption>");
            out.push_str(&escape_html(&caption.title));
            if options.show_caption_date
                && let Some(date) = &caption.date
            {
                out.push_str(&format!(
                    " <span class=\"{p}-date\">{}</span>",
                    escape_html(date)
                ));
            }
            out.push_str("</caption>\n");
        }

        out.push_str("<thead><tr>");
        if options.show_row_numbers {
            out.push_str(&format!("<th class=\"{p}-row-number\">#</th>"));
        }
        for i in 0..width {
            out.push_str("<th>");
            out.push_str(&escape_html(header.get(i).unwrap_or("")));
            out.push_str("</th>");
        }
        out.push_str("</tr></thead>\n<tbody>\n");

        for (position, index) in self.selected_rows(table, options).enumerate() {
            let Some(row) = table.row(index) else {
                continue;
            };
            let color = options
                .row_colors
                .as_deref()
                .filter(|colors| !colors.is_empty())
                .map(|colors| colors[position % colors.len()].as_str());
            self.render_row(&mut out, index, row, width, color, options);
        }

        out.push_str("</tbody>\n</table>\n");
        Html(out)
    }

    /// 0-based indices of the rows to emit, in display order.
    ///
    /// `included_rows` is honoured as given: no sorting, no deduplication.
    /// Out-of-range entries are skipped.
    fn selected_rows<'a>(
        &self,
        table: &'a Table,
        options: &'a RenderOptions,
    ) -> Box<dyn Iterator<Item = usize> + 'a> {
        if options.included_rows.is_empty() {
            Box::new(0..table.len())
        } else {
            Box::new(
                options
                    .included_rows
                    .iter()
                    .filter(|&&n| n >= 1 && n <= table.len())
                    .map(|&n| n - 1),
            )
        }
    }

    fn render_row(
        &self,
        out: &mut String,
        index: usize,
        row: &[String],
        width: usize,
        color: Option<&str>,
        options: &RenderOptions,
    ) {
        let style = color
            .map(|c| format!(" style=\"background-color: {}\"", escape_html(c)))
            .unwrap_or_default();

        out.push_str("<tr>");
        if options.show_row_numbers {
            out.push_str(&format!(
                "<td class=\"{}-row-number\"{style}>{}</td>",
                self.class_prefix,
                index + 1
            ));
        }
        for i in 0..width {
            let cell = row.get(i).map(String::as_str).unwrap_or("");
            out.push_str(&format!("<td{style}>"));
            html::push_cell(out, cell, &self.class_prefix);
            out.push_str("</td>");
        }
        out.push_str("</tr>\n");
    }
}

/// Render with the default class prefix and no caption.
pub fn render(header: &Header, table: &Table, options: &RenderOptions) -> Html {
    Renderer::default().render(header, table, options)
}
