use crate::extract::patterns::Patterns;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tabled::Tabled;
use tracing::debug;

static ARRIVALS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bArr(?:ivals)?\s*[:=]?\s*(\d+)").unwrap());
static DEPARTURES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bDep(?:artures)?\s*[:=]?\s*(\d+)").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tabled)]
pub struct AirportTraffic {
    #[tabled(rename = "Airport")]
    pub airport: String,
    #[tabled(rename = "Arrivals")]
    pub arrivals: u32,
    #[tabled(rename = "Departures")]
    pub departures: u32,
}

impl AirportTraffic {
    pub fn total(&self) -> u32 {
        self.arrivals.saturating_add(self.departures)
    }
}

fn count(pattern: &Regex, line: &str) -> Option<u32> {
    pattern.captures(line)?.get(1)?.as_str().parse().ok()
}

/// Sums arrival and departure counts per airport, e.g. from
/// `ORBI Arrivals: 45, Departures: 50` or `Erbil (ORER) Arr 15 Dep 17`.
///
/// A line needs an airport code and at least one count; the first airport
/// code on the line wins. Airports come back ordered by code.
pub fn extract_traffic<S: AsRef<str>>(lines: &[S], patterns: &Patterns) -> Vec<AirportTraffic> {
    let mut totals: BTreeMap<String, (u32, u32)> = BTreeMap::new();

    for line in lines.iter().map(|l| l.as_ref()) {
        let Some(airport) = patterns
            .traffic_airport
            .captures(line)
            .and_then(|c| c.name("airport").or_else(|| c.get(0)))
            .map(|m| m.as_str().to_uppercase())
        else {
            continue;
        };
        let arrivals = count(&ARRIVALS, line);
        let departures = count(&DEPARTURES, line);
        if arrivals.is_none() && departures.is_none() {
            continue;
        }
        debug!(airport = %airport, ?arrivals, ?departures, "traffic line");
        let entry = totals.entry(airport).or_default();
        entry.0 = entry.0.saturating_add(arrivals.unwrap_or(0));
        entry.1 = entry.1.saturating_add(departures.unwrap_or(0));
    }

    totals
        .into_iter()
        .map(|(airport, (arrivals, departures))| AirportTraffic {
            airport,
            arrivals,
            departures,
        })
        .collect()
}
