use crate::time::Time;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Formatter;
use std::sync::Arc;

pub type SectorId = Arc<str>;

/// Period during which a sector is split into two positions.
///
/// `start > end` means the window runs past midnight.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityWindow {
    pub start: Time,
    pub end: Time,
    pub sector: SectorId,
}

impl CapacityWindow {
    pub fn wraps_midnight(&self) -> bool {
        self.start > self.end
    }

    pub fn overlaps(&self, from: Time, to: Time) -> bool {
        overlaps(self.start, self.end, from, to)
    }
}

impl fmt::Display for CapacityWindow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}–{}", self.sector, self.start.hhmm(), self.end.hhmm())
    }
}

/// Whether a window touches `[from, to)`.
///
/// A wrapping window is the union of `[start, 1440)` and `[0, end)`.
pub fn overlaps(start: Time, end: Time, from: Time, to: Time) -> bool {
    if start <= end {
        Time::is_overlapping(&(from, to), &(start, end))
    } else {
        !(to <= start && from >= end)
    }
}
