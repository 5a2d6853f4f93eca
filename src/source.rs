//! Getting the planning document and turning it into text.
//!
//! The document is either a Word file (read paragraph by paragraph from
//! `word/document.xml`) or plain text. PDF is recognised and refused.

use crate::error::{PlanError, Result};
use quick_xml::Reader;
use quick_xml::events::Event;
use std::io::{Cursor, Read};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};
use zip::ZipArchive;

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const PDF_MAGIC: &[u8] = b"%PDF";

pub trait DocumentSource {
    /// Where the document comes from, for messages.
    fn location(&self) -> String;

    fn fetch(&self) -> Result<Vec<u8>>;

    fn read_text(&self) -> Result<String> {
        let bytes = self.fetch()?;
        info!(source = %self.location(), bytes = bytes.len(), "document fetched");
        document_text(bytes)
    }
}

pub struct FileSource {
    pub path: PathBuf,
}

impl DocumentSource for FileSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<Vec<u8>> {
        std::fs::read(&self.path).map_err(|source| PlanError::DocumentRead {
            path: self.path.clone(),
            source,
        })
    }
}

/// Blocking download with a fixed timeout and no retry.
pub struct HttpSource {
    pub url: String,
    pub timeout: Duration,
}

impl DocumentSource for HttpSource {
    fn location(&self) -> String {
        self.url.clone()
    }

    fn fetch(&self) -> Result<Vec<u8>> {
        let fetch_error = |source: reqwest::Error| PlanError::Fetch {
            url: self.url.clone(),
            source,
        };
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(fetch_error)?;
        let response = client
            .get(&self.url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(fetch_error)?;
        let bytes = response.bytes().map_err(fetch_error)?;
        Ok(bytes.to_vec())
    }
}

pub fn source_for(location: &str, timeout: Duration) -> Box<dyn DocumentSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSource {
            url: location.to_string(),
            timeout,
        })
    } else {
        Box::new(FileSource {
            path: PathBuf::from(location),
        })
    }
}

/// Decodes fetched bytes according to their leading magic number.
pub fn document_text(bytes: Vec<u8>) -> Result<String> {
    if bytes.starts_with(ZIP_MAGIC) {
        docx_text(&bytes)
    } else if bytes.starts_with(PDF_MAGIC) {
        Err(PlanError::UnsupportedFormat("PDF"))
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}

/// One line per `w:p` paragraph; `w:br` breaks the line, `w:tab` is a tab.
pub fn docx_text(bytes: &[u8]) -> Result<String> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| PlanError::Docx(e.to_string()))?;
    let xml = {
        let mut document = archive
            .by_name("word/document.xml")
            .map_err(|e| PlanError::Docx(format!("missing word/document.xml: {e}")))?;
        let mut content = String::new();
        document
            .read_to_string(&mut content)
            .map_err(|e| PlanError::Docx(e.to_string()))?;
        content
    };

    let mut reader = Reader::from_str(&xml);
    // runs carry significant spaces (xml:space="preserve")
    reader.trim_text(false);

    let mut paragraphs: Vec<String> = vec![];
    let mut current = String::new();
    let mut in_text = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:p" => current.clear(),
                b"w:t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:br" | b"w:cr" => current.push('\n'),
                b"w:tab" => current.push('\t'),
                b"w:p" => paragraphs.push(String::new()),
                _ => {}
            },
            Ok(Event::Text(e)) if in_text => {
                let text = e
                    .unescape()
                    .map_err(|e| PlanError::Docx(format!("bad text run: {e}")))?;
                current.push_str(&text);
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(PlanError::Docx(format!("error parsing document.xml: {e}")));
            }
            _ => {}
        }
        buf.clear();
    }

    debug!(paragraphs = paragraphs.len(), "word document read");
    Ok(paragraphs.join("\n"))
}
