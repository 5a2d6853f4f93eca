use crate::extract::entity::{Joiner, split_by_key};
use crate::extract::patterns::Patterns;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use tabled::Tabled;
use tracing::debug;

static CONVECTION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bCB\b|CONVECT").unwrap());
static TURBULENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bCAT\b|CHOP|TURB").unwrap());
static ICING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)ICING").unwrap());
static WIND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)HEADWIND|CROSSWIND|SHEAR").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tabled)]
pub struct WeatherWindow {
    #[tabled(rename = "Window")]
    pub window: String,
    #[tabled(rename = "Summary")]
    pub summary: String,
    #[tabled(rename = "Severity")]
    pub severity: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteWeather {
    /// Canonical `FROM→TO` name, e.g. `TASMI→KABAN`.
    pub route: String,
    pub windows: Vec<WeatherWindow>,
}

/// Severity from 1 (benign) to 5 by hazard keywords:
/// convection 3, turbulence 2, icing 2, strong or crossing wind 1.
pub fn severity(summary: &str) -> u8 {
    let score: u8 = [(&*CONVECTION, 3), (&*TURBULENCE, 2), (&*ICING, 2), (&*WIND, 1)]
        .into_iter()
        .filter(|(pattern, _)| pattern.is_match(summary))
        .map(|(_, points)| points)
        .sum();
    score.clamp(1, 5)
}

/// `Tasmi to Kaban` and `TASMI–KABAN` both become `TASMI→KABAN`.
pub fn route_name(key: &str) -> String {
    let words: Vec<&str> = key
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty() && !w.eq_ignore_ascii_case("to"))
        .collect();
    match (words.first(), words.last()) {
        (Some(from), Some(to)) if words.len() > 1 => {
            format!("{}→{}", from.to_uppercase(), to.to_uppercase())
        }
        _ => key.trim().to_uppercase(),
    }
}

/// Route blocks open on a line matching `route_key`; inside a block every
/// `window: summary` line is a forecast. Other lines are ignored. Headings
/// that name the same route under different spellings are merged.
pub fn extract_route_weather<S: AsRef<str>>(lines: &[S], patterns: &Patterns) -> Vec<RouteWeather> {
    let mut routes: Vec<RouteWeather> = vec![];

    for block in split_by_key(lines, &patterns.route_key, Joiner::Newline).iter() {
        let route = route_name(&block.key);
        let windows = block.raw_text.lines().filter_map(|line| {
            let caps = patterns.weather_window.captures(line.trim())?;
            let window: String = caps
                .name("window")?
                .as_str()
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            let summary = caps.name("summary")?.as_str().trim().to_string();
            Some(WeatherWindow {
                window,
                severity: severity(&summary),
                summary,
            })
        });

        match routes.iter_mut().find(|r| r.route == route) {
            Some(existing) => existing.windows.extend(windows),
            None => routes.push(RouteWeather {
                route,
                windows: windows.collect(),
            }),
        }
    }

    debug!(routes = routes.len(), "route weather extracted");
    routes
}
