//! Error types for document fetching, configuration and report output.
//!
//! Extraction itself never fails: a heading or key that is not found
//! produces an empty result, and malformed lines are skipped. Only the
//! steps around it (getting the document, reading configuration, writing
//! the report) report errors.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlanError>;

#[derive(Debug, Error)]
pub enum PlanError {
    // === Document source ===
    /// Local document could not be read.
    #[error("failed to read document {path}: {source}")]
    DocumentRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// HTTP fetch failed or returned an error status.
    #[error("failed to fetch document from {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Bytes looked like a Word document but could not be read as one.
    #[error("malformed Word document: {0}")]
    Docx(String),

    /// Recognised format without a text reader.
    #[error("unsupported document format: {0}")]
    UnsupportedFormat(&'static str),

    #[error("document is not valid UTF-8 text")]
    Encoding(#[from] std::string::FromUtf8Error),

    // === Configuration ===
    #[error("invalid pattern `{name}`: {source}")]
    Pattern {
        name: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("invalid time `{0}`, expected HHMM")]
    InvalidTime(String),

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // === Session & output ===
    #[error("access denied: incorrect password")]
    AccessDenied,

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize plan: {0}")]
    Serialize(#[from] serde_json::Error),
}
