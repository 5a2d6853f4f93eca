use crate::airport::{AirportNotices, Notices};
use crate::capacity::{HourlyCapacity, SectorLoad, UtilizationRow, estimate_peak_demand};
use crate::config::PlannerConfig;
use crate::extract::entity::{Joiner, split_by_key};
use crate::extract::normalize::DocumentLines;
use crate::extract::patterns::Patterns;
use crate::extract::section::SectionBlock;
use crate::extract::series::{TimeSeriesPoint, extract_series};
use crate::extract::traffic::{AirportTraffic, extract_traffic};
use crate::extract::weather::{RouteWeather, extract_route_weather};
use crate::notam::NotamCategory;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Everything extracted from one planning document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPlan {
    pub patterns_version: u32,
    pub airspace: SectionBlock,
    pub airports: Vec<AirportNotices>,
    pub traffic: Vec<AirportTraffic>,
    pub demand: Vec<TimeSeriesPoint>,
    pub weather: Vec<RouteWeather>,
    pub capacity: HourlyCapacity,
    /// Estimated peak hour against each sector's base capacity.
    pub sector_loads: Vec<SectorLoad>,
}

impl DailyPlan {
    pub fn build(lines: &DocumentLines, config: &PlannerConfig, patterns: &Patterns) -> DailyPlan {
        let sections = &config.sections;

        let airspace = sections.airspace.extract(lines);

        let airports_block = sections.airports.extract(lines);
        let blocks = split_by_key(&airports_block.lines, &patterns.airport_key, Joiner::Space);
        debug!(count = blocks.len(), keys = ?blocks.keys().collect::<Vec<_>>(), "airport blocks");
        let airports = blocks
            .iter()
            .map(|block| AirportNotices::from_block(block, &patterns.notam_code))
            .collect::<Vec<_>>();

        let demand = match &sections.demand {
            Some(spec) => extract_series(&spec.extract(lines).lines, patterns),
            None => extract_series(lines, patterns),
        };

        let weather = match &sections.weather {
            Some(spec) => extract_route_weather(&spec.extract(lines).lines, patterns),
            None => extract_route_weather(lines, patterns),
        };

        let traffic = extract_traffic(lines, patterns);
        let capacity = HourlyCapacity::build(&config.sectors, &config.windows);
        let sector_loads = capacity.sector_loads(estimate_peak_demand(&demand, &traffic));

        info!(
            patterns = patterns.version,
            airspace_lines = airspace.lines.len(),
            airports = airports.len(),
            traffic = traffic.len(),
            demand_periods = demand.len(),
            routes = weather.len(),
            "plan built"
        );

        DailyPlan {
            patterns_version: patterns.version,
            airspace,
            airports,
            traffic,
            demand,
            weather,
            capacity,
            sector_loads,
        }
    }

    /// `None` when the document never mentions the airport; an airport
    /// reported as NIL is `Some` with [`Notices::Nil`].
    pub fn airport(&self, key: &str) -> Option<&AirportNotices> {
        self.airports
            .iter()
            .find(|a| &*a.id == key || a.icao().eq_ignore_ascii_case(key))
    }

    pub fn notam_count(&self) -> usize {
        self.airports.iter().map(|a| a.notices.notams().len()).sum()
    }

    pub fn nil_airports(&self) -> impl Iterator<Item = &AirportNotices> {
        self.airports
            .iter()
            .filter(|a| a.notices == Notices::Nil)
    }

    /// NOTAM count per category, in category order.
    pub fn notam_categories(&self) -> BTreeMap<NotamCategory, usize> {
        let mut counts = BTreeMap::new();
        for notam in self.airports.iter().flat_map(|a| a.notices.notams()) {
            *counts.entry(notam.category).or_insert(0) += 1;
        }
        counts
    }

    pub fn route_weather(&self, route: &str) -> Option<&RouteWeather> {
        let wanted = route_key(route);
        self.weather.iter().find(|r| route_key(&r.route) == wanted)
    }

    pub fn peak_demand(&self) -> Option<&TimeSeriesPoint> {
        self.demand.iter().max_by_key(|p| p.value)
    }

    pub fn utilization(&self) -> Vec<UtilizationRow> {
        self.capacity.utilization(&self.demand)
    }
}

fn route_key(route: &str) -> String {
    route
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect::<String>()
        .to_uppercase()
}
