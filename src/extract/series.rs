use crate::extract::patterns::Patterns;
use crate::time::Time;
use regex::Captures;
use serde::Serialize;
use std::collections::BTreeMap;
use tabled::Tabled;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Tabled)]
pub struct TimeSeriesPoint {
    #[tabled(rename = "From (UTC)")]
    pub period_start: Time,
    #[tabled(rename = "To (UTC)")]
    pub period_end: Time,
    #[tabled(rename = "Flights")]
    pub value: u32,
}

impl TimeSeriesPoint {
    pub fn label(&self) -> String {
        format!("{}–{}", self.period_start.hhmm(), self.period_end.hhmm())
    }
}

fn period(caps: &Captures) -> Option<(Time, Time)> {
    let start = Time::from_hhmm(caps.name("start")?.as_str())?;
    let end = Time::from_hhmm(caps.name("end")?.as_str())?;
    Some((start, end))
}

fn value(caps: &Captures) -> Option<u32> {
    caps.name("value")?.as_str().parse().ok()
}

/// Reads `HHMM–HHMM value` pairs written either on one line or as a
/// period line followed (after optional blank lines) by a digits-only line.
///
/// Each line is consumed at most once, so both layouts may be mixed in a
/// document. The result is ordered by the numeric start code; a repeated
/// period keeps the value seen last.
pub fn extract_series<S: AsRef<str>>(lines: &[S], patterns: &Patterns) -> Vec<TimeSeriesPoint> {
    let mut points: BTreeMap<(Time, Time), u32> = BTreeMap::new();
    let mut record = |(start, end): (Time, Time), value: u32| {
        if let Some(previous) = points.insert((start, end), value) {
            debug!(
                start = %start,
                end = %end,
                previous,
                value,
                "period repeated, value overwritten"
            );
        }
    };

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i].as_ref().trim();

        if let Some(caps) = patterns.period_value.captures(line) {
            match period(&caps).zip(value(&caps)) {
                Some((p, v)) => record(p, v),
                None => debug!(line, "malformed single-line period skipped"),
            }
            i += 1;
            continue;
        }

        if let Some(caps) = patterns.period_only.captures(line) {
            let next = (i + 1..lines.len()).find(|j| !lines[*j].as_ref().trim().is_empty());
            let value_caps = next.and_then(|j| patterns.value_only.captures(lines[j].as_ref().trim()));
            if let (Some(j), Some(value_caps)) = (next, value_caps) {
                match period(&caps).zip(value(&value_caps)) {
                    Some((p, v)) => record(p, v),
                    None => debug!(line, "malformed two-line period skipped"),
                }
                i = j + 1;
                continue;
            }
            debug!(line, "period without a value line skipped");
        }

        i += 1;
    }

    points
        .into_iter()
        .map(|((period_start, period_end), value)| TimeSeriesPoint {
            period_start,
            period_end,
            value,
        })
        .collect()
}
