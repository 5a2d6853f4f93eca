use crate::error::{PlanError, Result};
use crate::extract::patterns::PatternConfig;
use crate::extract::section::SectionSpec;
use crate::sector::{CapacityWindow, SectorId};
use crate::time::Time;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Headings that delimit each part of the planning document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sections {
    pub airspace: SectionSpec,
    pub airports: SectionSpec,
    /// `None` scans the whole document for demand periods.
    pub demand: Option<SectionSpec>,
    /// `None` scans the whole document for route weather blocks.
    pub weather: Option<SectionSpec>,
}

impl Default for Sections {
    fn default() -> Self {
        Sections {
            airspace: SectionSpec::new("Airspace", "Airspace:", Some("Airports:")),
            airports: SectionSpec::new("Airports", "Airports:", Some("Predicted Demand")),
            demand: Some(SectionSpec::new("Predicted Demand", "Predicted Demand", None)),
            weather: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Path or `http(s)://` URL of the planning document.
    pub source: String,
    pub fetch_timeout_secs: u64,
    /// Shared password; any username is accepted.
    pub shared_secret: String,
    pub sections: Sections,
    pub patterns: PatternConfig,
    /// Base hourly capacity per sector.
    pub sectors: BTreeMap<SectorId, u32>,
    pub windows: Vec<CapacityWindow>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        let south: SectorId = Arc::from("South");
        PlannerConfig {
            source: "data/sample_plan.txt".to_string(),
            fetch_timeout_secs: 30,
            shared_secret: "atfmiraqmm".to_string(),
            sections: Sections::default(),
            patterns: PatternConfig::default(),
            sectors: BTreeMap::from([(south.clone(), 26), (Arc::from("North"), 27)]),
            windows: vec![
                CapacityWindow {
                    start: Time(330),
                    end: Time(450),
                    sector: south.clone(),
                },
                CapacityWindow {
                    start: Time(1410),
                    end: Time(90),
                    sector: south,
                },
            ],
        }
    }
}

impl PlannerConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|source| PlanError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| PlanError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
