//! Named regular expressions used by the extractors.
//!
//! Patterns live in configuration so that a change in the planning
//! document layout only needs a new pattern set, not new extraction code.
//! `version` identifies the set in logs and exports.

use crate::error::{PlanError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Airport key line, e.g. `ORBI/BGW`. Must match the whole trimmed line.
pub const AIRPORT_KEY: &str = r"(?P<key>[A-Z]{4}/[A-Z]{3}):?";
/// NOTAM series letter, four digits, slash, two-digit year: `A1234/25`.
pub const NOTAM_CODE: &str = r"\b[A-Z]\d{4}/\d{2}\b";
/// Period and value on one line: `0000–0100 73`. Text after the value
/// (`73 flights`, `64 (est)`) is ignored.
pub const PERIOD_VALUE: &str =
    r"^(?P<start>\d{2}:?\d{2})\s*[–-]\s*(?P<end>\d{2}:?\d{2})\s+(?P<value>\d+)\b.*$";
/// Period alone on its line; the value follows on a later line.
pub const PERIOD_ONLY: &str = r"^(?P<start>\d{2}:?\d{2})\s*[–-]\s*(?P<end>\d{2}:?\d{2})$";
/// Digits-only value line for the two-line layout.
pub const VALUE_ONLY: &str = r"^(?P<value>\d+)$";
/// Route weather heading, e.g. `Tasmi to Kaban:` or `MODIK–SIDAD`.
pub const ROUTE_KEY: &str =
    r"(?i)(?P<key>(?:TASMI|MODIK)\s*(?:to|–|-|→|>)\s*(?:KABAN|SIDAD))(?:\s+weather)?:?";
/// Forecast window line inside a route block: `00-06Z: Light CAT FL200-280`.
pub const WEATHER_WINDOW: &str = r"(?i)(?P<window>\d{2}\s*[–-]\s*\d{2}Z)\s*:\s*(?P<summary>.+)";
/// Airport mentioned on a traffic line, e.g. `ORBI Arrivals: 45`.
pub const TRAFFIC_AIRPORT: &str = r"\b(?P<airport>OR[A-Z]{2})\b";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    pub version: u32,
    pub airport_key: String,
    pub notam_code: String,
    pub period_value: String,
    pub period_only: String,
    pub value_only: String,
    pub traffic_airport: String,
    pub route_key: String,
    pub weather_window: String,
}

impl Default for PatternConfig {
    fn default() -> Self {
        PatternConfig {
            version: 1,
            airport_key: AIRPORT_KEY.to_string(),
            notam_code: NOTAM_CODE.to_string(),
            period_value: PERIOD_VALUE.to_string(),
            period_only: PERIOD_ONLY.to_string(),
            value_only: VALUE_ONLY.to_string(),
            traffic_airport: TRAFFIC_AIRPORT.to_string(),
            route_key: ROUTE_KEY.to_string(),
            weather_window: WEATHER_WINDOW.to_string(),
        }
    }
}

/// Compiled form of [`PatternConfig`].
#[derive(Debug, Clone)]
pub struct Patterns {
    pub version: u32,
    pub airport_key: Regex,
    pub notam_code: Regex,
    pub period_value: Regex,
    pub period_only: Regex,
    pub value_only: Regex,
    pub traffic_airport: Regex,
    pub route_key: Regex,
    pub weather_window: Regex,
}

impl Patterns {
    pub fn compile(config: &PatternConfig) -> Result<Patterns> {
        Ok(Patterns {
            version: config.version,
            airport_key: anchored("airport_key", &config.airport_key)?,
            notam_code: compile("notam_code", &config.notam_code)?,
            period_value: anchored("period_value", &config.period_value)?,
            period_only: anchored("period_only", &config.period_only)?,
            value_only: anchored("value_only", &config.value_only)?,
            traffic_airport: compile("traffic_airport", &config.traffic_airport)?,
            route_key: anchored("route_key", &config.route_key)?,
            weather_window: anchored("weather_window", &config.weather_window)?,
        })
    }
}

fn compile(name: &'static str, source: &str) -> Result<Regex> {
    Regex::new(source).map_err(|source| PlanError::Pattern { name, source })
}

/// Forces a whole-line match regardless of how the pattern was written.
fn anchored(name: &'static str, source: &str) -> Result<Regex> {
    compile(name, &format!("^(?:{source})$"))
}
