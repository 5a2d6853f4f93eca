use crate::extract::normalize::DocumentLines;
use crate::extract::patterns::{PatternConfig, Patterns};
use proptest::prelude::Strategy;
use proptest::prop_oneof;
use proptest::strategy::Just;
use regex::Regex;

pub fn lines(text: &str) -> DocumentLines {
    DocumentLines::from_raw(text)
}

pub fn patterns() -> Patterns {
    Patterns::compile(&PatternConfig::default()).unwrap()
}

pub fn key_pattern() -> Regex {
    patterns().airport_key
}

pub fn code_pattern() -> Regex {
    patterns().notam_code
}

/// Free text that never forms an airport key line.
pub fn arb_body_line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z ]{1,30}",
        "[A-Z]{4} [a-z]{2,10}",
        "[0-9]{4}–[0-9]{4}",
    ]
}

/// Raw text mixing line endings, dash and space variants.
pub fn arb_raw_text() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            "[A-Za-z0-9 ]{0,12}",
            Just("\r\n".to_string()),
            Just("\r".to_string()),
            Just("\n".to_string()),
            Just("\u{2014}".to_string()),
            Just("\u{2212}".to_string()),
            Just("\u{00A0}".to_string()),
            Just("  \t".to_string()),
        ],
        0..20,
    )
    .prop_map(|parts| parts.concat())
}
