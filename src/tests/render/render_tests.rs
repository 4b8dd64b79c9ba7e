//! Tests for HTML table rendering.

use crate::render::{Caption, RenderOptions, Renderer, escape_html, render};
use crate::table::parse;
use crate::tests::{body_rows, sample};

#[test]
fn default_render_has_row_numbers_and_page_length() {
    let (header, table) = sample(&["a", "b"], &[&["1", "2"]]);
    let html = render(&header, &table, &RenderOptions::default());

    assert_eq!(
        html.as_str(),
        "<table class=\"doctable\" data-page-length=\"10\">\n\
         <thead><tr><th class=\"doctable-row-number\">#</th><th>a</th><th>b</th></tr></thead>\n\
         <tbody>\n\
         <tr><td class=\"doctable-row-number\">1</td><td>1</td><td>2</td></tr>\n\
         </tbody>\n\
         </table>\n"
    );
}

#[test]
fn row_numbers_can_be_hidden() {
    let (header, table) = sample(&["a"], &[&["x"]]);
    let html = render(&header, &table, &RenderOptions::default().with_row_numbers(false));

    assert!(!html.as_str().contains("#</th>"));
    assert_eq!(body_rows(html.as_str()), vec!["<tr><td>x</td></tr>"]);
}

#[test]
fn multi_line_cell_renders_as_list() {
    let (header, table) = sample(&["a", "b"], &[&["a\nb\nc", "plain"]]);
    let html = render(&header, &table, &RenderOptions::default().with_row_numbers(false));

    assert_eq!(
        body_rows(html.as_str()),
        vec![
            "<tr><td><ul class=\"doctable-list\"><li>a<li>b<li>c</ul></td><td>plain</td></tr>"
        ]
    );
}

#[test]
fn list_items_are_escaped_and_crlf_trimmed() {
    let (header, table) = sample(&["a"], &[&["<b>\r\n&"]]);
    let html = render(&header, &table, &RenderOptions::default().with_row_numbers(false));

    assert!(
        html.as_str()
            .contains("<ul class=\"doctable-list\"><li>&lt;b&gt;<li>&amp;</ul>")
    );
}

#[test]
fn header_and_cells_are_escaped() {
    let (header, table) = sample(&["<script>"], &[&["\"x\" & 'y'"]]);
    let html = render(&header, &table, &RenderOptions::default());

    assert!(html.as_str().contains("<th>&lt;script&gt;</th>"));
    assert!(html.as_str().contains("<td>&quot;x&quot; &amp; &#39;y&#39;</td>"));
    assert!(!html.as_str().contains("<script>"));
}

#[test]
fn short_rows_are_padded_to_max_columns() {
    let (header, table) = sample(&["a", "b", "c"], &[&["1"], &["1", "2", "3"]]);
    let html = render(&header, &table, &RenderOptions::default().with_row_numbers(false));

    assert_eq!(
        body_rows(html.as_str())[0],
        "<tr><td>1</td><td></td><td></td></tr>"
    );
}

#[test]
fn header_is_padded_when_a_row_is_wider() {
    let (header, table) = sample(&["a"], &[&["1", "2"]]);
    let html = render(&header, &table, &RenderOptions::default().with_row_numbers(false));

    assert!(html.as_str().contains("<tr><th>a</th><th></th></tr>"));
}

#[test]
fn included_rows_keep_given_order_and_original_numbers() {
    let (header, table) = sample(&["v"], &[&["one"], &["two"], &["three"]]);
    let options = RenderOptions::default().with_included_rows(vec![3, 1]);
    let html = render(&header, &table, &options);

    assert_eq!(
        body_rows(html.as_str()),
        vec![
            "<tr><td class=\"doctable-row-number\">3</td><td>three</td></tr>",
            "<tr><td class=\"doctable-row-number\">1</td><td>one</td></tr>",
        ]
    );
}

#[test]
fn included_rows_are_not_deduplicated_by_the_renderer() {
    let (header, table) = sample(&["v"], &[&["one"], &["two"]]);
    let options = RenderOptions::default()
        .with_row_numbers(false)
        .with_included_rows(vec![2, 2]);
    let html = render(&header, &table, &options);

    assert_eq!(body_rows(html.as_str()).len(), 2);
}

#[test]
fn out_of_range_included_rows_are_skipped() {
    let (header, table) = sample(&["v"], &[&["one"], &["two"]]);
    let options = RenderOptions::default()
        .with_row_numbers(false)
        .with_included_rows(vec![0, 2, 9]);
    let html = render(&header, &table, &options);

    assert_eq!(body_rows(html.as_str()), vec!["<tr><td>two</td></tr>"]);
}

#[test]
fn row_colors_cycle_over_displayed_rows() {
    let (header, table) = sample(&["v"], &[&["1"], &["2"], &["3"]]);
    let options = RenderOptions::default()
        .with_row_numbers(false)
        .with_row_colors(vec!["#fff".into(), "#eee".into()]);
    let html = render(&header, &table, &options);

    assert_eq!(
        body_rows(html.as_str()),
        vec![
            "<tr><td style=\"background-color: #fff\">1</td></tr>",
            "<tr><td style=\"background-color: #eee\">2</td></tr>",
            "<tr><td style=\"background-color: #fff\">3</td></tr>",
        ]
    );
}

#[test]
fn row_color_applies_to_row_number_cell() {
    let (header, table) = sample(&["v"], &[&["1"]]);
    let options = RenderOptions::default().with_row_colors(vec!["red".into()]);
    let html = render(&header, &table, &options);

    assert!(html.as_str().contains(
        "<td class=\"doctable-row-number\" style=\"background-color: red\">1</td>"
    ));
}

#[test]
fn empty_color_list_means_no_coloring() {
    let (header, table) = sample(&["v"], &[&["1"]]);
    let mut options = RenderOptions::default();
    options.row_colors = Some(Vec::new());
    let html = render(&header, &table, &options);

    assert!(!html.as_str().contains("background-color"));
}

#[test]
fn caption_shows_date_only_when_enabled() {
    let (header, table) = sample(&["v"], &[&["1"]]);
    let renderer = Renderer::new("docs");
    let caption = Caption {
        title: "Staff & friends".into(),
        date: Some("May 1, 2024".into()),
    };

    let with_date = renderer.render_captioned(&caption, &header, &table, &RenderOptions::default());
    assert!(with_date.as_str().contains(
        "<caption>Staff &amp; friends <span class=\"docs-date\">May 1, 2024</span></caption>"
    ));

    let without_date = renderer.render_captioned(
        &caption,
        &header,
        &table,
        &RenderOptions::default().with_caption_date(false),
    );
    assert!(without_date.as_str().contains("<caption>Staff &amp; friends</caption>"));
}

#[test]
fn class_prefix_is_applied_everywhere() {
    let (header, table) = sample(&["v"], &[&["a\nb"]]);
    let html = Renderer::new("docs").render(&header, &table, &RenderOptions::default());

    assert!(html.as_str().starts_with("<table class=\"docs\""));
    assert!(html.as_str().contains("class=\"docs-row-number\""));
    assert!(html.as_str().contains("class=\"docs-list\""));
    assert!(!html.as_str().contains("doctable"));
}

#[test]
fn page_length_is_emitted() {
    let (header, table) = sample(&["v"], &[]);
    let html = render(&header, &table, &RenderOptions::default().with_page_length(25));
    assert!(html.as_str().contains("data-page-length=\"25\""));
}

#[test]
fn zero_page_length_is_ignored() {
    assert_eq!(RenderOptions::default().with_page_length(0).page_length, 10);
}

#[test]
fn parse_then_render_is_deterministic() {
    let csv = "name,notes\nJane,\"a\nb\"\nJohn,x\n";
    let (header, table) = parse(csv.as_bytes(), true).expect("parse");

    let first = render(&header, &table, &RenderOptions::default());
    let second = render(&header, &table, &RenderOptions::default());
    assert_eq!(first, second);
}

#[test]
fn placeholder_and_download_link_are_escaped() {
    let renderer = Renderer::default();
    let placeholder = renderer.render_placeholder("version <9>");
    assert!(placeholder.as_str().contains("<td>version &lt;9&gt;</td>"));
    assert!(placeholder.as_str().contains("doctable-unsupported"));

    let link = renderer.render_download_link("/download/a\"b", "R&D");
    assert_eq!(
        link.as_str(),
        "<a class=\"doctable-download\" href=\"/download/a&quot;b\">R&amp;D</a>"
    );
}

#[test]
fn escape_html_leaves_plain_text_alone() {
    assert_eq!(escape_html("plain text 123"), "plain text 123");
}
