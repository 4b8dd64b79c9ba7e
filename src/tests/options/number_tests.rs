use crate::options::{MAX_SELECTED_NUMBER, parse_bool, parse_colors, parse_numbers};

#[test]
fn ranges_and_singles_are_expanded() {
    assert_eq!(parse_numbers(Some("1-3,5,9-10")), vec![1, 2, 3, 5, 9, 10]);
}

#[test]
fn overlaps_are_merged_and_sorted() {
    assert_eq!(parse_numbers(Some("5,4-7")), vec![4, 5, 6, 7]);
    assert_eq!(parse_numbers(Some("9,1,9,3-4,2")), vec![1, 2, 3, 4, 9]);
}

#[test]
fn missing_value_is_empty() {
    assert!(parse_numbers(None).is_empty());
    assert!(parse_numbers(Some("")).is_empty());
    assert!(parse_numbers(Some("   ")).is_empty());
}

#[test]
fn whitespace_is_ignored() {
    assert_eq!(parse_numbers(Some(" 1 - 3 , 7 ")), vec![1, 2, 3, 7]);
}

#[test]
fn reversed_range_is_normalized() {
    assert_eq!(parse_numbers(Some("7-5")), vec![5, 6, 7]);
}

#[test]
fn empty_tokens_are_skipped() {
    assert_eq!(parse_numbers(Some("1,,2,")), vec![1, 2]);
}

#[test]
fn malformed_token_empties_the_selection() {
    assert!(parse_numbers(Some("1,abc")).is_empty());
    assert!(parse_numbers(Some("1-2-3")).is_empty());
    assert!(parse_numbers(Some("-4")).is_empty());
    assert!(parse_numbers(Some("3-")).is_empty());
}

#[test]
fn huge_ranges_stop_at_the_ceiling() {
    let numbers = parse_numbers(Some("1-18446744073709551615"));
    assert_eq!(numbers.len(), MAX_SELECTED_NUMBER);
    assert_eq!(numbers.first(), Some(&1));
    assert_eq!(numbers.last(), Some(&MAX_SELECTED_NUMBER));

    let numbers = parse_numbers(Some("3,1-5000000,2"));
    assert_eq!(numbers.len(), MAX_SELECTED_NUMBER);
}

#[test]
fn numbers_past_the_ceiling_are_dropped() {
    let past = MAX_SELECTED_NUMBER + 1;
    assert_eq!(parse_numbers(Some(&format!("2,{past}"))), vec![2]);
    assert!(parse_numbers(Some(&format!("{past}-{}", past + 10))).is_empty());
}

#[test]
fn number_beyond_usize_is_malformed() {
    assert!(parse_numbers(Some("1,99999999999999999999999")).is_empty());
}

#[test]
fn truthy_values() {
    for value in ["1", "yes", "true", "on", "TRUE", " Yes ", "On"] {
        assert!(parse_bool(value), "{value:?} should be true");
    }
}

#[test]
fn everything_else_is_false() {
    for value in ["0", "no", "false", "off", "", "y", "enabled", "2"] {
        assert!(!parse_bool(value), "{value:?} should be false");
    }
}

#[test]
fn colors_keep_valid_entries_only() {
    assert_eq!(
        parse_colors("#fff, #EEEEEE ,red,#12,url(x),"),
        Some(vec!["#fff".to_string(), "#EEEEEE".to_string(), "red".to_string()])
    );
    assert_eq!(parse_colors("#zzz,;"), None);
}
