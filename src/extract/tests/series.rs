use crate::extract::series::extract_series;
use crate::extract::tests::utils::{lines, patterns};
use crate::time::Time;

fn values(text: &str) -> Vec<(u64, u64, u32)> {
    extract_series(&lines(text), &patterns())
        .iter()
        .map(|p| (p.period_start.0, p.period_end.0, p.value))
        .collect()
}

#[test]
fn test_single_line_layout() {
    assert_eq!(values("0000–0100 73\n0100–0200 64"), vec![(0, 60, 73), (60, 120, 64)]);
}

#[test]
fn test_two_line_layout() {
    assert_eq!(values("0000–0100\n73\n0100–0200\n\n64"), vec![(0, 60, 73), (60, 120, 64)]);
}

#[test]
fn test_mixed_layouts() {
    let text = "Predicted Demand\n0000–0100 73\n0100–0200\n64\n0200-0300   58\n0300–0400\n\n\n41";
    assert_eq!(
        values(text),
        vec![(0, 60, 73), (60, 120, 64), (120, 180, 58), (180, 240, 41)]
    );
}

#[test]
fn test_colon_times_and_end_of_day() {
    assert_eq!(values("23:00–24:00 12"), vec![(1380, 1440, 12)]);
}

#[test]
fn test_ordered_by_start() {
    assert_eq!(
        values("0500–0600 80\n0000–0100 73\n0200–0300 1"),
        vec![(0, 60, 73), (120, 180, 1), (300, 360, 80)]
    );
}

#[test]
fn test_repeated_period_keeps_last_value() {
    assert_eq!(values("0000–0100 73\n0000–0100\n75"), vec![(0, 60, 75)]);
}

#[test]
fn test_malformed_lines_skipped() {
    let text = "0000–0100 7a\n0100–0200\nnot a number\n2500–2600 9\n0200–0300 5";
    assert_eq!(values(text), vec![(120, 180, 5)]);
}

#[test]
fn test_value_line_not_reused() {
    // the value belongs to the first period; the second has none
    assert_eq!(values("0000–0100\n0100–0200\n64"), vec![(60, 120, 64)]);
}

#[test]
fn test_period_at_end_without_value() {
    assert!(values("0000–0100").is_empty());
    assert!(values("").is_empty());
}

#[test]
fn test_label_and_points() {
    let points = extract_series(&lines("0000–0100 73"), &patterns());
    assert_eq!(points[0].period_start, Time(0));
    assert_eq!(points[0].label(), "0000–0100");
}

#[test]
fn test_trailing_text_after_value() {
    assert_eq!(
        values("0000–0100 73 flights\n0100–0200 64 (est)"),
        vec![(0, 60, 73), (60, 120, 64)]
    );
}

#[test]
fn test_value_glued_to_text_is_malformed() {
    assert!(values("0000–0100 73flights").is_empty());
}
