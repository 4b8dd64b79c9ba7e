/// Escape text for embedding in HTML element content or quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Multi-line cells become a list, one item per line.
pub(super) fn push_cell(out: &mut String, cell: &str, class_prefix: &str) {
    if !cell.contains('\n') {
        out.push_str(&escape_html(cell));
        return;
    }

    out.push_str(&format!("<ul class=\"{class_prefix}-list\">"));
    for line in cell.split('\n') {
        out.push_str("<li>");
        out.push_str(&escape_html(line.strip_suffix('\r').unwrap_or(line)));
    }
    out.push_str("</ul>");
}
