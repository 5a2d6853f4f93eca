use crate::extract::entity::EmbeddedCode;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::fmt::Formatter;
use std::sync::LazyLock;

static RUNWAY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\b(?:RWY|RUNWAY)").unwrap());
static TAXIWAY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\b(?:TWY|TAXI)").unwrap());
static NAVAID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\b(?:ILS|VOR|NDB)\b").unwrap());
static CLOSURE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)CLOSED|CLSD|U/S|UNSERVICEABLE").unwrap());
static WORK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)CRANE|WIP|WORK IN PROGRESS|\bWORKS?\b").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum NotamCategory {
    General,
    Runway,
    Taxiway,
    NavAid,
    Closure,
    ObstacleWork,
}

impl fmt::Display for NotamCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            NotamCategory::General => "General",
            NotamCategory::Runway => "Runway",
            NotamCategory::Taxiway => "Taxiway",
            NotamCategory::NavAid => "NavAid",
            NotamCategory::Closure => "Closure/Unserviceable",
            NotamCategory::ObstacleWork => "Obstacles/Work",
        };
        write!(f, "{}", name)
    }
}

impl NotamCategory {
    /// Later rules win: obstacles and works outrank closures, which
    /// outrank the facility kind.
    pub fn classify(text: &str) -> NotamCategory {
        [
            (&*RUNWAY, NotamCategory::Runway),
            (&*TAXIWAY, NotamCategory::Taxiway),
            (&*NAVAID, NotamCategory::NavAid),
            (&*CLOSURE, NotamCategory::Closure),
            (&*WORK, NotamCategory::ObstacleWork),
        ]
        .into_iter()
        .filter(|(pattern, _)| pattern.is_match(text))
        .map(|(_, category)| category)
        .last()
        .unwrap_or(NotamCategory::General)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NotamAction {
    Info,
    RestrictMitigate,
}

impl fmt::Display for NotamAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            NotamAction::Info => write!(f, "Info"),
            NotamAction::RestrictMitigate => write!(f, "Restrict / Mitigate"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notam {
    pub code: String,
    pub category: NotamCategory,
    pub action: NotamAction,
    pub body: String,
}

impl Notam {
    pub fn interpret(code: EmbeddedCode) -> Notam {
        let action = if CLOSURE.is_match(&code.body) {
            NotamAction::RestrictMitigate
        } else {
            NotamAction::Info
        };
        Notam {
            category: NotamCategory::classify(&code.body),
            action,
            code: code.code,
            body: code.body,
        }
    }
}
