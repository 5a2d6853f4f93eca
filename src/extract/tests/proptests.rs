use crate::extract::entity::{Joiner, split_by_key};
use crate::extract::normalize::DocumentLines;
use crate::extract::section::{HeadingMatch, extract_section};
use crate::extract::series::extract_series;
use crate::extract::tests::utils::{arb_body_line, arb_raw_text, key_pattern, patterns};
use proptest::prelude::*;
use proptest::proptest;

proptest! {
    #[test]
    fn test_normalize_idempotent(raw in arb_raw_text()) {
        let once = DocumentLines::from_raw(&raw);
        let twice = DocumentLines::from_raw(&once.join("\n"));
        prop_assert_eq!(once.join("\n"), twice.join("\n"));
    }

    #[test]
    fn test_normalized_lines_are_clean(raw in arb_raw_text()) {
        for line in DocumentLines::from_raw(&raw).iter() {
            let dirty = line.contains(['\r', '\n', '\u{00A0}', '\u{2014}', '\u{2212}']);
            prop_assert!(!dirty, "unnormalized line {:?}", line);
            prop_assert_eq!(line.trim_end(), line.as_str());
        }
    }

    #[test]
    fn test_no_key_lines_no_blocks(body in prop::collection::vec(arb_body_line(), 0..30)) {
        let blocks = split_by_key(&body, &key_pattern(), Joiner::Space);
        prop_assert!(blocks.is_empty());
    }

    #[test]
    fn test_missing_heading_gives_empty_block(body in prop::collection::vec(arb_body_line(), 0..30)) {
        let block = extract_section(&body, "Airspace:", Some("Airports:"), HeadingMatch::Exact);
        prop_assert!(block.is_empty());
    }

    #[test]
    fn test_block_has_no_edge_blanks(
        before in prop::collection::vec(arb_body_line(), 0..10),
        inside in prop::collection::vec(arb_body_line(), 0..10),
    ) {
        let mut doc = before;
        doc.push("Airspace:".to_string());
        doc.extend(inside);
        let block = extract_section(&doc, "Airspace:", None, HeadingMatch::Exact);
        if let (Some(first), Some(last)) = (block.lines.first(), block.lines.last()) {
            prop_assert!(!first.trim().is_empty());
            prop_assert!(!last.trim().is_empty());
        }
    }

    #[test]
    fn test_series_layouts_agree(
        entries in prop::collection::btree_map(0u64..24, 0u32..500, 0..24),
        blanks in 0usize..3,
    ) {
        let mut single = vec![];
        let mut double = vec![];
        for (hour, value) in &entries {
            let period = format!("{:02}00–{:02}00", hour, hour + 1);
            single.push(format!("{period} {value}"));
            double.push(period);
            double.extend(std::iter::repeat_n(String::new(), blanks));
            double.push(value.to_string());
        }

        let patterns = patterns();
        let from_single = extract_series(&single, &patterns);
        let from_double = extract_series(&double, &patterns);
        prop_assert_eq!(&from_single, &from_double);
        prop_assert_eq!(from_single.len(), entries.len());
        prop_assert!(from_single.windows(2).all(|w| w[0].period_start < w[1].period_start));
    }
}
