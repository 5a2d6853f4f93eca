use crate::extract::series::TimeSeriesPoint;
use crate::extract::traffic::AirportTraffic;
use crate::sector::{CapacityWindow, SectorId};
use crate::time::Time;
use serde::Serialize;
use std::collections::BTreeMap;
use tabled::Tabled;
use tracing::warn;

pub const HOURS: u8 = 24;

/// Splitting a sector into Low/High positions doubles its throughput.
const SPLIT_FACTOR: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tabled)]
pub struct HourlyCapacityRow {
    #[tabled(rename = "Hour")]
    pub hour: u8,
    #[tabled(rename = "Sector")]
    pub sector: SectorId,
    #[tabled(rename = "Base (acft/hr)")]
    pub base_capacity: u32,
    #[tabled(rename = "Effective (acft/hr)")]
    pub effective_capacity: u32,
}

impl HourlyCapacityRow {
    pub fn is_split(&self) -> bool {
        self.effective_capacity > self.base_capacity
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UtilizationRow {
    pub hour: u8,
    pub demand: u32,
    pub capacity: u32,
    /// `None` when no capacity is configured for the hour.
    pub utilization: Option<f64>,
}

/// One sector's base capacity set against the day's estimated peak hour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorLoad {
    pub sector: SectorId,
    pub capacity: u32,
    pub peak_demand: u32,
    /// `None` when the sector has no capacity.
    pub utilization: Option<f64>,
}

/// Busiest demand period, or a tenth of all airport movements (at least 1)
/// when the document has no demand table.
pub fn estimate_peak_demand(demand: &[TimeSeriesPoint], traffic: &[AirportTraffic]) -> u32 {
    match demand.iter().map(|p| p.value).max() {
        Some(peak) => peak,
        None => {
            let movements = traffic
                .iter()
                .fold(0u32, |sum, t| sum.saturating_add(t.total()));
            (movements / 10).max(1)
        }
    }
}

/// Effective capacity of every sector for every hour of the day, plus the
/// combined FIR capacity per hour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlyCapacity {
    /// Ordered by hour, then by sector name.
    pub rows: Vec<HourlyCapacityRow>,
    pub combined: Vec<u32>,
}

impl HourlyCapacity {
    pub fn build(base: &BTreeMap<SectorId, u32>, windows: &[CapacityWindow]) -> HourlyCapacity {
        windows
            .iter()
            .filter(|w| !base.contains_key(&w.sector))
            .for_each(|w| warn!(window = %w, "window for unknown sector ignored"));

        let mut rows = Vec::with_capacity(base.len() * usize::from(HOURS));
        let mut combined: Vec<u32> = vec![0; usize::from(HOURS)];

        for hour in 0..HOURS {
            let from = Time::hour_start(hour);
            let to = from + 60;
            for (sector, base_capacity) in base {
                let split = windows
                    .iter()
                    .filter(|w| w.sector == *sector)
                    .any(|w| w.overlaps(from, to));
                let effective_capacity = if split {
                    base_capacity.saturating_mul(SPLIT_FACTOR)
                } else {
                    *base_capacity
                };
                let total = &mut combined[usize::from(hour)];
                *total = total.saturating_add(effective_capacity);
                rows.push(HourlyCapacityRow {
                    hour,
                    sector: sector.clone(),
                    base_capacity: *base_capacity,
                    effective_capacity,
                });
            }
        }

        HourlyCapacity { rows, combined }
    }

    pub fn get(&self, hour: u8, sector: &str) -> Option<&HourlyCapacityRow> {
        self.rows
            .iter()
            .find(|r| r.hour == hour && &*r.sector == sector)
    }

    pub fn for_sector<'a>(&'a self, sector: &'a str) -> impl Iterator<Item = &'a HourlyCapacityRow> {
        self.rows.iter().filter(move |r| &*r.sector == sector)
    }

    pub fn combined(&self, hour: u8) -> u32 {
        self.combined.get(usize::from(hour)).copied().unwrap_or(0)
    }

    pub fn sector_loads(&self, peak_demand: u32) -> Vec<SectorLoad> {
        self.rows
            .iter()
            .filter(|r| r.hour == 0)
            .map(|r| SectorLoad {
                sector: r.sector.clone(),
                capacity: r.base_capacity,
                peak_demand,
                utilization: (r.base_capacity > 0)
                    .then(|| f64::from(peak_demand) / f64::from(r.base_capacity)),
            })
            .collect()
    }

    /// Observed demand over combined capacity, hour by hour.
    ///
    /// Demand periods are bucketed by the hour they start in. Sums saturate
    /// at `u32::MAX`.
    pub fn utilization(&self, demand: &[TimeSeriesPoint]) -> Vec<UtilizationRow> {
        let mut per_hour = [0u32; HOURS as usize];
        for point in demand {
            let bucket = &mut per_hour[usize::from(point.period_start.hour())];
            *bucket = bucket.saturating_add(point.value);
        }
        (0..HOURS)
            .map(|hour| {
                let capacity = self.combined(hour);
                let demand = per_hour[usize::from(hour)];
                UtilizationRow {
                    hour,
                    demand,
                    capacity,
                    utilization: (capacity > 0).then(|| f64::from(demand) / f64::from(capacity)),
                }
            })
            .collect()
    }

    /// Hour with the highest utilization, if any hour has capacity.
    pub fn peak_utilization(&self, demand: &[TimeSeriesPoint]) -> Option<UtilizationRow> {
        self.utilization(demand)
            .into_iter()
            .filter(|r| r.utilization.is_some())
            .max_by(|a, b| a.utilization.partial_cmp(&b.utilization).unwrap_or(std::cmp::Ordering::Equal))
    }
}
