use serde::{Deserialize, Serialize};
use tracing::debug;

/// How a heading line is recognised.
///
/// `Exact` compares the whole trimmed line, so body text that merely
/// mentions a heading word never ends a block early. `Contains` is a
/// case-insensitive substring match for documents with decorated headings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingMatch {
    #[default]
    Exact,
    Contains,
}

impl HeadingMatch {
    fn matches(&self, line: &str, heading: &str) -> bool {
        match self {
            HeadingMatch::Exact => line.trim() == heading.trim(),
            HeadingMatch::Contains => line
                .to_lowercase()
                .contains(&heading.trim().to_lowercase()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SectionBlock {
    pub name: String,
    pub lines: Vec<String>,
}

impl SectionBlock {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// A named heading pair, as it appears in the planner configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpec {
    pub name: String,
    pub start: String,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub matching: HeadingMatch,
}

impl SectionSpec {
    pub fn new(name: &str, start: &str, end: Option<&str>) -> SectionSpec {
        SectionSpec {
            name: name.to_string(),
            start: start.to_string(),
            end: end.map(str::to_string),
            matching: HeadingMatch::Exact,
        }
    }

    pub fn extract<S: AsRef<str>>(&self, lines: &[S]) -> SectionBlock {
        let mut block = extract_section(lines, &self.start, self.end.as_deref(), self.matching);
        block.name = self.name.clone();
        block
    }
}

/// Returns the lines strictly between `start` and `end` (or end of document).
///
/// A missing start heading is not an error: the block is simply empty.
pub fn extract_section<S: AsRef<str>>(
    lines: &[S],
    start: &str,
    end: Option<&str>,
    matching: HeadingMatch,
) -> SectionBlock {
    let mut block = SectionBlock {
        name: start.trim().to_string(),
        lines: vec![],
    };

    let Some(start_idx) = lines
        .iter()
        .position(|l| matching.matches(l.as_ref(), start))
    else {
        debug!(heading = start, "section heading not found");
        return block;
    };

    let body = &lines[start_idx + 1..];
    let end_idx = end
        .and_then(|end| body.iter().position(|l| matching.matches(l.as_ref(), end)))
        .unwrap_or(body.len());

    let body = &body[..end_idx];
    let first = body.iter().position(|l| !l.as_ref().trim().is_empty());
    let last = body.iter().rposition(|l| !l.as_ref().trim().is_empty());
    if let (Some(first), Some(last)) = (first, last) {
        block.lines = body[first..=last]
            .iter()
            .map(|l| l.as_ref().to_string())
            .collect();
    }

    debug!(heading = start, lines = block.lines.len(), "section extracted");
    block
}
