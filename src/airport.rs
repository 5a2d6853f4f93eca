use crate::extract::entity::{EntityBlock, split_embedded_codes};
use crate::notam::Notam;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::fmt::Formatter;
use std::sync::Arc;

/// `ICAO/IATA` pair as written in the document, e.g. `ORBI/BGW`.
pub type AirportId = Arc<str>;

/// What the document says about an airport's notices.
///
/// `Nil` is an explicit "nothing to report"; an airport that the document
/// never mentions has no `AirportNotices` at all.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", content = "notams", rename_all = "snake_case")]
pub enum Notices {
    Nil,
    Listed(Vec<Notam>),
}

impl Notices {
    pub fn notams(&self) -> &[Notam] {
        match self {
            Notices::Nil => &[],
            Notices::Listed(notams) => notams,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AirportNotices {
    pub id: AirportId,
    pub raw_text: String,
    pub notices: Notices,
}

impl AirportNotices {
    pub fn from_block(block: &EntityBlock, notam_code: &Regex) -> AirportNotices {
        let notices = if block.is_nil() {
            Notices::Nil
        } else {
            Notices::Listed(
                split_embedded_codes(&block.raw_text, notam_code)
                    .into_iter()
                    .map(Notam::interpret)
                    .collect(),
            )
        };
        AirportNotices {
            id: Arc::from(block.key.as_str()),
            raw_text: block.raw_text.clone(),
            notices,
        }
    }

    /// ICAO part of the id, e.g. `ORBI` for `ORBI/BGW`.
    pub fn icao(&self) -> &str {
        self.id.split('/').next().unwrap_or(&self.id)
    }
}

impl fmt::Display for AirportNotices {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.notices {
            Notices::Nil => write!(f, "{}: NIL", self.id),
            Notices::Listed(notams) => write!(f, "{}: {} NOTAM(s)", self.id, notams.len()),
        }
    }
}
