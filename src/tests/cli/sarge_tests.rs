use crate::cli::{ColorList, RowSelection};
use sarge::ArgumentType;

#[test]
fn rows_flag_parses_ranges() {
    let rows = <RowSelection as ArgumentType>::from_value(Some("1-3,7"))
        .expect("some")
        .expect("ok");
    assert_eq!(rows.as_slice(), &[1, 2, 3, 7]);
}

#[test]
fn bare_rows_flag_selects_nothing() {
    let rows = <RowSelection as ArgumentType>::from_value(None)
        .expect("some")
        .expect("ok");
    assert!(rows.is_empty());
    assert_eq!(
        <RowSelection as ArgumentType>::default_value(),
        Some(RowSelection::default())
    );
}

#[test]
fn row_colors_flag_keeps_valid_colors() {
    let colors = <ColorList as ArgumentType>::from_value(Some("#fff, #eeeeee,nope!"))
        .expect("some")
        .expect("ok");
    assert_eq!(colors.as_slice(), &["#fff", "#eeeeee"]);
}
