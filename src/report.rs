//! Rendering of a [`DailyPlan`] as tables and as the ADP report file.

use crate::airport::{AirportNotices, Notices};
use crate::capacity::{SectorLoad, UtilizationRow};
use crate::error::{PlanError, Result};
use crate::plan::DailyPlan;
use crate::session::Session;
use crate::time::Time;
use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;
use std::fmt::Write as _;
use std::path::Path;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

#[derive(Tabled)]
pub struct UtilizationLine {
    #[tabled(rename = "Period (UTC)")]
    pub period: String,
    #[tabled(rename = "Demand")]
    pub demand: u32,
    #[tabled(rename = "Capacity (acft/hr)")]
    pub capacity: u32,
    #[tabled(rename = "Utilization")]
    pub utilization: String,
}

impl From<&UtilizationRow> for UtilizationLine {
    fn from(row: &UtilizationRow) -> Self {
        let from = Time::hour_start(row.hour);
        UtilizationLine {
            period: format!("{}–{}", from.hhmm(), (from + 60).hhmm()),
            demand: row.demand,
            capacity: row.capacity,
            utilization: percent(row.utilization),
        }
    }
}

#[derive(Tabled)]
pub struct AirportLine {
    #[tabled(rename = "Airport")]
    pub airport: String,
    #[tabled(rename = "NOTAMs")]
    pub status: String,
}

#[derive(Tabled)]
pub struct NotamLine {
    #[tabled(rename = "Airport")]
    pub airport: String,
    #[tabled(rename = "Code")]
    pub code: String,
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Action")]
    pub action: String,
    #[tabled(rename = "Text")]
    pub text: String,
}

#[derive(Tabled)]
pub struct SectorLoadLine {
    #[tabled(rename = "Sector")]
    pub sector: String,
    #[tabled(rename = "Capacity (acft/hr)")]
    pub capacity: u32,
    #[tabled(rename = "Estimated Peak Demand")]
    pub peak_demand: u32,
    #[tabled(rename = "Utilization")]
    pub utilization: String,
}

impl From<&SectorLoad> for SectorLoadLine {
    fn from(load: &SectorLoad) -> Self {
        SectorLoadLine {
            sector: load.sector.to_string(),
            capacity: load.capacity,
            peak_demand: load.peak_demand,
            utilization: percent(load.utilization),
        }
    }
}

#[derive(Tabled)]
pub struct CategoryLine {
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Count")]
    pub count: usize,
}

pub fn category_lines(plan: &DailyPlan) -> Vec<CategoryLine> {
    plan.notam_categories()
        .into_iter()
        .map(|(category, count)| CategoryLine {
            category: category.to_string(),
            count,
        })
        .collect()
}

pub fn sector_load_lines(plan: &DailyPlan) -> Vec<SectorLoadLine> {
    plan.sector_loads.iter().map(SectorLoadLine::from).collect()
}

/// `ATFM Daily Plan – 2026-10-17`
pub fn default_title(date: NaiveDate) -> String {
    format!("ATFM Daily Plan – {}", date.format("%Y-%m-%d"))
}

pub fn airport_lines(airports: &[AirportNotices]) -> Vec<AirportLine> {
    airports
        .iter()
        .map(|a| AirportLine {
            airport: a.id.to_string(),
            status: match &a.notices {
                Notices::Nil => "NIL".to_string(),
                Notices::Listed(notams) => notams.len().to_string(),
            },
        })
        .collect()
}

pub fn notam_lines<'a, I>(airports: I) -> Vec<NotamLine>
where
    I: IntoIterator<Item = &'a AirportNotices>,
{
    airports
        .into_iter()
        .flat_map(|a| {
            a.notices.notams().iter().map(move |n| NotamLine {
                airport: a.icao().to_string(),
                code: n.code.clone(),
                category: n.category.to_string(),
                action: n.action.to_string(),
                text: n.body.clone(),
            })
        })
        .collect()
}

pub fn percent(utilization: Option<f64>) -> String {
    utilization.map_or("-".to_string(), |u| format!("{:.0}%", u * 100.0))
}

/// Table in the style used on screen.
pub fn table<I, T>(rows: I) -> String
where
    I: IntoIterator<Item = T>,
    T: Tabled,
{
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.with(Alignment::left());
    table.to_string()
}

fn report_table<I, T>(rows: I) -> String
where
    I: IntoIterator<Item = T>,
    T: Tabled,
{
    let mut table = Table::new(rows);
    table.with(Style::markdown());
    table.to_string()
}

pub fn utilization_lines(plan: &DailyPlan) -> Vec<UtilizationLine> {
    plan.utilization().iter().map(UtilizationLine::from).collect()
}

/// Plain-text Air-traffic Daily Plan.
pub fn render(plan: &DailyPlan, session: &Session, title: &str, generated: DateTime<Utc>) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_plan(&mut out, plan, session, title, generated);
    out
}

fn write_plan(
    out: &mut String,
    plan: &DailyPlan,
    session: &Session,
    title: &str,
    generated: DateTime<Utc>,
) -> fmt::Result {
    writeln!(out, "{title}\n{}\n", "=".repeat(title.chars().count()))?;
    writeln!(out, "Generated: {}\n", generated.format("%Y-%m-%d %H:%MZ"))?;

    writeln!(out, "## Airspace\n")?;
    if plan.airspace.is_empty() {
        writeln!(out, "No airspace information found.\n")?;
    } else {
        writeln!(out, "{}\n", plan.airspace.text())?;
    }

    writeln!(out, "## Airport Traffic\n")?;
    if plan.traffic.is_empty() {
        writeln!(out, "No airport traffic found.\n")?;
    } else {
        writeln!(out, "{}\n", report_table(&plan.traffic))?;
    }

    writeln!(out, "## NOTAMs\n")?;
    if plan.airports.is_empty() {
        writeln!(out, "No airport NOTAMs found.\n")?;
    }
    let categories = category_lines(plan);
    if !categories.is_empty() {
        writeln!(out, "{}\n", report_table(categories))?;
    }
    for airport in &plan.airports {
        match &airport.notices {
            Notices::Nil => writeln!(out, "{}: NIL\n", airport.id)?,
            Notices::Listed(notams) if notams.is_empty() => {
                writeln!(out, "{}: {}\n", airport.id, airport.raw_text)?
            }
            Notices::Listed(notams) => {
                writeln!(out, "{}:", airport.id)?;
                for notam in notams {
                    writeln!(out, "- [{}] {} {}", notam.category, notam.code, notam.body)?;
                }
                writeln!(out)?;
            }
        }
    }

    writeln!(out, "## Hourly Demand (UTC)\n")?;
    if plan.demand.is_empty() {
        writeln!(out, "No hourly demand table found.\n")?;
    } else {
        writeln!(out, "{}\n", report_table(&plan.demand))?;
    }

    writeln!(out, "## Sector Capacity & Utilization\n")?;
    writeln!(out, "{}\n", report_table(utilization_lines(plan)))?;
    if let Some(peak) = plan.capacity.peak_utilization(&plan.demand) {
        writeln!(
            out,
            "Peak utilization {} at {}.\n",
            percent(peak.utilization),
            Time::hour_start(peak.hour)
        )?;
    }

    writeln!(out, "### Peak demand by sector\n")?;
    if plan.sector_loads.is_empty() {
        writeln!(out, "No sectors configured.\n")?;
    } else {
        writeln!(out, "{}\n", report_table(sector_load_lines(plan)))?;
    }

    writeln!(out, "## Route Weather\n")?;
    if plan.weather.is_empty() {
        writeln!(out, "No route weather found.\n")?;
    }
    for route in &plan.weather {
        writeln!(out, "{}:", route.route)?;
        if route.windows.is_empty() {
            writeln!(out, "- no forecast windows")?;
        }
        for window in &route.windows {
            writeln!(out, "- {}: {} (severity {})", window.window, window.summary, window.severity)?;
        }
        writeln!(out)?;
    }

    writeln!(out, "Prepared by: {}", session.username())
}

pub fn write_report(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|source| PlanError::Write {
        path: path.to_path_buf(),
        source,
    })
}

pub fn export_json(plan: &DailyPlan, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(plan)?;
    write_report(path, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlannerConfig;
    use crate::extract::normalize::DocumentLines;
    use crate::extract::patterns::Patterns;

    fn plan(text: &str) -> DailyPlan {
        let config = PlannerConfig::default();
        let patterns = Patterns::compile(&config.patterns).unwrap();
        DailyPlan::build(&DocumentLines::from_raw(text), &config, &patterns)
    }

    fn generated() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-10-17T05:42:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn session() -> Session {
        Session::login("duty", "atfmiraqmm", "atfmiraqmm").unwrap()
    }

    #[test]
    fn test_report_sections() {
        let plan = plan(
            "Airspace:\nAll routes open\nAirports:\nORBI/BGW\nA1234/25 – RWY closed.\nORNI/NJF\nNIL\nPredicted Demand\n0500–0600 79\n",
        );
        let title = default_title(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        let report = render(&plan, &session(), &title, generated());

        assert!(report.starts_with("ATFM Daily Plan – 2025-01-01\n"));
        assert!(report.contains("Generated: 2026-10-17 05:42Z"));
        assert!(report.contains("| Closure/Unserviceable | 1"));
        assert!(report.contains("Estimated Peak Demand"));
        let south = sector_load_lines(&plan).into_iter().find(|l| l.sector == "South").unwrap();
        assert_eq!((south.capacity, south.peak_demand), (26, 79));
        assert_eq!(south.utilization, "304%");
        assert!(report.contains("No route weather found."));
        assert!(report.contains("All routes open"));
        assert!(report.contains("- [Closure/Unserviceable] A1234/25 RWY closed."));
        assert!(report.contains("ORNI/NJF: NIL"));
        assert!(report.contains("No airport traffic found."));
        assert!(report.contains("Peak utilization 100% at 05:00."));
        assert!(report.trim_end().ends_with("Prepared by: duty"));
    }

    #[test]
    fn test_empty_document_report() {
        let report = render(&plan(""), &session(), "ADP", generated());
        assert!(report.contains("No airspace information found."));
        assert!(report.contains("No airport NOTAMs found."));
        assert!(report.contains("No hourly demand table found."));
    }

    #[test]
    fn test_airport_and_notam_lines() {
        let plan = plan("Airports:\nORBI/BGW\nA1234/25 – RWY closed. A2222/25 – VOR test.\nORNI/NJF\nnil\n");
        let airports = airport_lines(&plan.airports);
        assert_eq!(airports.len(), 2);
        assert_eq!(airports[0].status, "2");
        assert_eq!(airports[1].status, "NIL");

        let notams = notam_lines(&plan.airports);
        assert_eq!(notams.len(), 2);
        assert_eq!(notams[0].airport, "ORBI");
        assert_eq!(notams[1].category, "NavAid");
        assert_eq!(notams[1].action, "Info");
        assert!(table(notams).contains("A2222/25"));
    }

    #[test]
    fn test_route_weather_section() {
        let plan = plan("Tasmi to Kaban:\n00-06Z: Isolated CB N of route\nMODIK to SIDAD:\n");
        let report = render(&plan, &session(), "ADP", generated());
        assert!(report.contains("TASMI→KABAN:\n- 00-06Z: Isolated CB N of route (severity 3)"));
        assert!(report.contains("MODIK→SIDAD:\n- no forecast windows"));
    }

    #[test]
    fn test_sector_load_line() {
        let line = SectorLoadLine::from(&SectorLoad {
            sector: "North".into(),
            capacity: 27,
            peak_demand: 12,
            utilization: Some(12.0 / 27.0),
        });
        assert_eq!(line.utilization, "44%");
        assert_eq!(line.sector, "North");
    }

    #[test]
    fn test_utilization_line() {
        let line = UtilizationLine::from(&UtilizationRow {
            hour: 23,
            demand: 40,
            capacity: 80,
            utilization: Some(0.5),
        });
        assert_eq!(line.period, "2300–2400");
        assert_eq!(line.utilization, "50%");
        assert_eq!(percent(None), "-");
    }
}
