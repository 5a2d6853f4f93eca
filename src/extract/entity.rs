use regex::Regex;
use serde::Serialize;
use tracing::debug;

/// How body lines are glued together inside an entity block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Joiner {
    /// Non-blank lines trimmed and joined with single spaces.
    #[default]
    Space,
    /// Lines kept as they are, joined with `\n`.
    Newline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityBlock {
    pub key: String,
    pub raw_text: String,
}

impl EntityBlock {
    /// `NIL` (any case) is the document's way of saying "nothing to report".
    pub fn is_nil(&self) -> bool {
        self.raw_text.trim().eq_ignore_ascii_case("NIL")
    }
}

/// Entity blocks keyed by identifier, in the order the keys first appear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EntityBlocks(Vec<EntityBlock>);

impl EntityBlocks {
    pub fn get(&self, key: &str) -> Option<&EntityBlock> {
        self.0.iter().find(|b| b.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|b| b.key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityBlock> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A code found inside running text together with the text that follows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbeddedCode {
    pub code: String,
    pub body: String,
}

fn full_key(key_pattern: &Regex, line: &str) -> Option<String> {
    let caps = key_pattern.captures(line)?;
    let whole = caps.get(0)?;
    if whole.start() != 0 || whole.end() != line.len() {
        return None;
    }
    Some(
        caps.name("key")
            .map_or(whole.as_str(), |m| m.as_str())
            .to_string(),
    )
}

/// Splits lines into blocks opened by lines that fully match `key_pattern`.
///
/// If the pattern has a `key` group, its capture names the block. Lines
/// before the first key are dropped. A key that shows up again continues
/// its earlier block.
pub fn split_by_key<S: AsRef<str>>(lines: &[S], key_pattern: &Regex, joiner: Joiner) -> EntityBlocks {
    let mut accumulators: Vec<(String, Vec<&str>)> = vec![];
    let mut current: Option<usize> = None;
    let mut dropped = 0usize;

    for line in lines.iter().map(|l| l.as_ref()) {
        if let Some(key) = full_key(key_pattern, line.trim()) {
            let idx = match accumulators.iter().position(|(k, _)| *k == key) {
                Some(idx) => idx,
                None => {
                    accumulators.push((key, vec![]));
                    accumulators.len() - 1
                }
            };
            current = Some(idx);
            continue;
        }
        match current {
            Some(idx) => accumulators[idx].1.push(line),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        debug!(dropped, "lines before first key discarded");
    }

    EntityBlocks(
        accumulators
            .into_iter()
            .map(|(key, body)| EntityBlock {
                key,
                raw_text: join(&body, joiner),
            })
            .collect(),
    )
}

fn join(body: &[&str], joiner: Joiner) -> String {
    match joiner {
        Joiner::Space => body
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        Joiner::Newline => body.join("\n").trim().to_string(),
    }
}

/// Cuts a run-on paragraph at every occurrence of `code_pattern`.
///
/// Each code owns the text up to the next code; the last one runs to the
/// end. A leading separator (`–`, `-`, `:`) is removed from each body.
pub fn split_embedded_codes(text: &str, code_pattern: &Regex) -> Vec<EmbeddedCode> {
    let found = code_pattern.find_iter(text).collect::<Vec<_>>();
    found
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let body_end = found.get(i + 1).map_or(text.len(), |next| next.start());
            let body = text[m.end()..body_end]
                .trim()
                .trim_start_matches(['–', '-', ':'])
                .trim();
            EmbeddedCode {
                code: m.as_str().to_string(),
                body: body.to_string(),
            }
        })
        .collect()
}
