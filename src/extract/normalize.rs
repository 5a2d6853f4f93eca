use serde::Serialize;
use std::ops::Deref;

/// Canonical dash every dash variant is folded into.
pub const CANONICAL_DASH: char = '–';

const DASHES: [char; 7] = [
    '\u{2010}', '\u{2011}', '\u{2012}', '\u{2013}', '\u{2014}', '\u{2015}', '\u{2212}',
];
const SPACES: [char; 3] = ['\u{00A0}', '\u{2007}', '\u{202F}'];

/// Normalized document text, one entry per source line.
///
/// Empty lines are kept: downstream stages use them as block boundaries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentLines(Vec<String>);

impl DocumentLines {
    pub fn from_raw(text: &str) -> DocumentLines {
        if text.is_empty() {
            return DocumentLines::default();
        }
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        DocumentLines(text.split('\n').map(normalize_line).collect())
    }
}

impl Deref for DocumentLines {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn normalize_line(line: &str) -> String {
    line.chars()
        .map(|c| {
            if DASHES.contains(&c) {
                CANONICAL_DASH
            } else if SPACES.contains(&c) {
                ' '
            } else {
                c
            }
        })
        .collect::<String>()
        .trim_end()
        .to_string()
}
