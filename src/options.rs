//! Coercion of untyped display attributes into typed options.
//!
//! Shortcode attributes arrive as strings. Everything is converted here, once,
//! and nothing past this module sees the raw mapping. Bad values never fail:
//! they fall back to defaults or to an empty selection.

use crate::render::RenderOptions;
use crate::store::RecordId;

/// Permissive boolean: `1`, `yes`, `true` and `on` (any case) are true.
pub fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "yes" | "true" | "on"
    )
}

/// Highest number `parse_numbers` will select. Ranges are cut off here so
/// attribute text cannot ask for an unbounded allocation.
pub const MAX_SELECTED_NUMBER: usize = 100_000;

/// Parse a list of numbers and inclusive ranges such as `1-5,7,15-17`.
///
/// Whitespace is ignored and the result is deduplicated and sorted. A
/// reversed range (`7-5`) is read as `5-7`. Numbers above
/// `MAX_SELECTED_NUMBER` are dropped. Any malformed token yields an empty
/// selection.
pub fn parse_numbers(value: Option<&str>) -> Vec<usize> {
    let Some(value) = value else {
        return Vec::new();
    };
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();

    let mut ranges = Vec::new();
    for token in compact.split(',').filter(|t| !t.is_empty()) {
        match parse_token(token) {
            Some((start, _)) if start > MAX_SELECTED_NUMBER => {}
            Some((start, end)) => ranges.push((start, end.min(MAX_SELECTED_NUMBER))),
            None => return Vec::new(),
        }
    }
    ranges.sort_unstable();

    let mut numbers: Vec<usize> = Vec::new();
    for (start, end) in ranges {
        let from = match numbers.last() {
            Some(&last) if last >= end => continue,
            Some(&last) => start.max(last + 1),
            None => start,
        };
        numbers.extend(from..=end);
    }
    numbers
}

fn parse_token(token: &str) -> Option<(usize, usize)> {
    match token.split_once('-') {
        Some((start, end)) => {
            let start: usize = start.parse().ok()?;
            let end: usize = end.parse().ok()?;
            Some((start.min(end), start.max(end)))
        }
        None => {
            let n: usize = token.parse().ok()?;
            Some((n, n))
        }
    }
}

/// Comma-separated CSS colors. Accepts `#rgb`, `#rrggbb` and plain color
/// names; anything else is dropped.
pub fn parse_colors(value: &str) -> Option<Vec<String>> {
    let colors: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|c| is_color(c))
        .map(str::to_string)
        .collect();
    if colors.is_empty() { None } else { Some(colors) }
}

fn is_color(token: &str) -> bool {
    if let Some(hex) = token.strip_prefix('#') {
        return matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit());
    }
    !token.is_empty() && token.chars().all(|c| c.is_ascii_alphabetic())
}

/// Raw attributes from a bracketed display directive, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortcodeAttributes {
    pairs: Vec<(String, String)>,
}

impl ShortcodeAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an attribute. Keys are case-insensitive.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into().to_ascii_lowercase();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        let key = key.to_ascii_lowercase();
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Parse `key="value" key2='value' key3=value` attribute text.
    ///
    /// Whitespace around `=` is allowed. A bare word without `=` is kept with
    /// an empty value.
    pub fn parse(text: &str) -> Self {
        let mut attrs = Self::new();
        let mut chars = text.chars().peekable();

        loop {
            while chars.next_if(|c| c.is_whitespace()).is_some() {}
            let mut key = String::new();
            while let Some(c) = chars.next_if(|c| !c.is_whitespace() && *c != '=') {
                key.push(c);
            }
            if key.is_empty() {
                if chars.next().is_none() {
                    break;
                }
                continue;
            }

            let mut value = String::new();
            while chars.next_if(|c| c.is_whitespace()).is_some() {}
            if chars.next_if_eq(&'=').is_some() {
                while chars.next_if(|c| c.is_whitespace()).is_some() {}
                match chars.next_if(|c| *c == '"' || *c == '\'') {
                    Some(quote) => {
                        for c in chars.by_ref() {
                            if c == quote {
                                break;
                            }
                            value.push(c);
                        }
                    }
                    None => {
                        while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                            value.push(c);
                        }
                    }
                }
            }
            attrs.insert(key, value);
        }
        attrs
    }

    /// Coerce into a typed request. Rows are deduplicated and sorted here.
    pub fn into_request(self) -> DisplayRequest {
        let id = self.get("id").and_then(|v| v.trim().parse::<u64>().ok()).map(RecordId);

        let mut options = RenderOptions::default();
        if let Some(v) = self.get("row-number") {
            options.show_row_numbers = parse_bool(v);
        }
        if let Some(v) = self.get("date") {
            options.show_caption_date = parse_bool(v);
        }
        if let Some(v) = self.get("row-colors") {
            options.row_colors = parse_colors(v);
        }
        if let Some(n) = self.get("page-length").and_then(|v| v.trim().parse::<u32>().ok()) {
            options = options.with_page_length(n);
        }
        options.included_rows = parse_numbers(self.get("rows"));

        DisplayRequest { id, options }
    }
}

/// A typed display request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRequest {
    /// `None` when the id attribute is missing or not numeric
    pub id: Option<RecordId>,
    pub options: RenderOptions,
}
