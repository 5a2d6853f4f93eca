use crate::extract::entity::{Joiner, split_by_key, split_embedded_codes};
use crate::extract::tests::utils::{code_pattern, key_pattern, lines};
use regex::Regex;

#[test]
fn test_blocks_in_document_order() {
    let doc = lines("ORNI/NJF\nNIL\nORBI/BGW\nA1234/25 – RWY closed.\nORER/EBL:\n  first\n\n  second  ");
    let blocks = split_by_key(&doc, &key_pattern(), Joiner::Space);

    assert_eq!(blocks.keys().collect::<Vec<_>>(), vec!["ORNI/NJF", "ORBI/BGW", "ORER/EBL"]);
    assert!(blocks.get("ORNI/NJF").unwrap().is_nil());
    assert_eq!(blocks.get("ORBI/BGW").unwrap().raw_text, "A1234/25 – RWY closed.");
    assert_eq!(blocks.get("ORER/EBL").unwrap().raw_text, "first second");
}

#[test]
fn test_newline_joiner() {
    let doc = lines("ORBI/BGW\nline one\n\nline two\n");
    let blocks = split_by_key(&doc, &key_pattern(), Joiner::Newline);
    assert_eq!(blocks.get("ORBI/BGW").unwrap().raw_text, "line one\n\nline two");
}

#[test]
fn test_text_before_first_key_dropped() {
    let doc = lines("preamble\nORBI/BGW\nbody");
    let blocks = split_by_key(&doc, &key_pattern(), Joiner::Space);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks.get("ORBI/BGW").unwrap().raw_text, "body");
}

#[test]
fn test_no_keys_is_empty() {
    let doc = lines("nothing\nto see here");
    assert!(split_by_key(&doc, &key_pattern(), Joiner::Space).is_empty());
}

#[test]
fn test_key_mentioned_mid_line_is_body() {
    let doc = lines("ORBI/BGW\ntraffic diverted to ORNI/NJF today");
    let blocks = split_by_key(&doc, &key_pattern(), Joiner::Space);
    assert_eq!(blocks.len(), 1);
    assert!(blocks.get("ORNI/NJF").is_none());
}

#[test]
fn test_key_with_empty_body() {
    let doc = lines("ORBI/BGW\nORNI/NJF\nNIL");
    let blocks = split_by_key(&doc, &key_pattern(), Joiner::Space);
    assert_eq!(blocks.get("ORBI/BGW").unwrap().raw_text, "");
    assert!(!blocks.get("ORBI/BGW").unwrap().is_nil());
}

#[test]
fn test_repeated_key_continues_block() {
    let doc = lines("ORBI/BGW\nfirst\nORNI/NJF\nNIL\nORBI/BGW\nsecond");
    let blocks = split_by_key(&doc, &key_pattern(), Joiner::Space);
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks.get("ORBI/BGW").unwrap().raw_text, "first second");
}

#[test]
fn test_pattern_without_key_group_uses_whole_match() {
    let pattern = Regex::new(r"^Sector [A-Z]+$").unwrap();
    let doc = lines("Sector SOUTH\nsplit\nSector NORTH\ncombined");
    let blocks = split_by_key(&doc, &pattern, Joiner::Space);
    assert_eq!(blocks.get("Sector SOUTH").unwrap().raw_text, "split");
    assert_eq!(blocks.get("Sector NORTH").unwrap().raw_text, "combined");
}

#[test]
fn test_nil_any_case() {
    let doc = lines("ORBI/BGW\n nil \nORNI/NJF\nNil traffic restrictions");
    let blocks = split_by_key(&doc, &key_pattern(), Joiner::Space);
    assert!(blocks.get("ORBI/BGW").unwrap().is_nil());
    assert!(!blocks.get("ORNI/NJF").unwrap().is_nil());
}

#[test]
fn test_embedded_codes() {
    let codes = split_embedded_codes("A1234/25 – RWY closed. A5678/25 – crane near TWY.", &code_pattern());
    assert_eq!(codes.len(), 2);
    assert_eq!(codes[0].code, "A1234/25");
    assert_eq!(codes[0].body, "RWY closed.");
    assert_eq!(codes[1].code, "A5678/25");
    assert_eq!(codes[1].body, "crane near TWY.");
}

#[test]
fn test_embedded_codes_text_before_first_code_dropped() {
    let codes = split_embedded_codes("Nil restrictions, see A0042/25: ILS 18 U/S", &code_pattern());
    assert_eq!(codes.len(), 1);
    assert_eq!(codes[0].code, "A0042/25");
    assert_eq!(codes[0].body, "ILS 18 U/S");
}

#[test]
fn test_embedded_codes_none_found() {
    assert!(split_embedded_codes("RWY 15R closed", &code_pattern()).is_empty());
    assert!(split_embedded_codes("", &code_pattern()).is_empty());
}

#[test]
fn test_adjacent_codes_have_empty_body() {
    let codes = split_embedded_codes("A1111/25 A2222/25 - text", &code_pattern());
    assert_eq!(codes[0].body, "");
    assert_eq!(codes[1].body, "text");
}

#[test]
fn test_embedded_codes_short_bodies() {
    let codes = split_embedded_codes("A1234/25 – RWY closed. A5678/25 – TWY work.", &code_pattern());
    let pairs: Vec<(&str, &str)> = codes.iter().map(|c| (c.code.as_str(), c.body.as_str())).collect();
    assert_eq!(pairs, vec![("A1234/25", "RWY closed."), ("A5678/25", "TWY work.")]);
}
