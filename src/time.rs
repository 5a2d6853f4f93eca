use crate::error::PlanError;
use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Minutes since 00:00 UTC.
#[derive(Debug, Clone, Copy, Ord, Eq, PartialEq, Hash, Serialize, Deserialize, PartialOrd)]
#[serde(try_from = "String", into = "String")]
pub struct Time(pub u64);

impl Time {
    pub const END_OF_DAY: Time = Time(1440);

    /// Parses `HHMM` or `HH:MM`. `2400` is accepted as the end of the day.
    pub fn from_hhmm(code: &str) -> Option<Time> {
        let digits: String = code.chars().filter(|c| *c != ':').collect();
        if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let hours: u64 = digits[..2].parse().ok()?;
        let mins: u64 = digits[2..].parse().ok()?;
        match (hours, mins) {
            (24, 0) => Some(Self::END_OF_DAY),
            (h, m) if h < 24 && m < 60 => Some(Time(h * 60 + m)),
            _ => None,
        }
    }

    pub fn hhmm(&self) -> String {
        format!("{:02}{:02}", self.0 / 60, self.0 % 60)
    }

    pub fn hour(&self) -> u8 {
        ((self.0 % 1440) / 60) as u8
    }

    pub fn hour_start(hour: u8) -> Time {
        Time(u64::from(hour) * 60)
    }

    pub(crate) fn is_overlapping(time: &(Time, Time), window: &(Time, Time)) -> bool {
        time.0 < window.1 && time.1 > window.0
    }
}

impl std::fmt::Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl TryFrom<String> for Time {
    type Error = PlanError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Time::from_hhmm(value.trim()).ok_or(PlanError::InvalidTime(value))
    }
}

impl From<Time> for String {
    fn from(time: Time) -> Self {
        time.hhmm()
    }
}

impl Add<u64> for Time {
    type Output = Self;

    fn add(self, rhs: u64) -> Self::Output {
        Time(self.0 + rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hhmm() {
        assert_eq!(Time::from_hhmm("0000"), Some(Time(0)));
        assert_eq!(Time::from_hhmm("0530"), Some(Time(330)));
        assert_eq!(Time::from_hhmm("23:30"), Some(Time(1410)));
        assert_eq!(Time::from_hhmm("2400"), Some(Time::END_OF_DAY));
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert_eq!(Time::from_hhmm("2460"), None);
        assert_eq!(Time::from_hhmm("2401"), None);
        assert_eq!(Time::from_hhmm("0575"), None);
        assert_eq!(Time::from_hhmm("530"), None);
        assert_eq!(Time::from_hhmm("05a0"), None);
    }

    #[test]
    fn test_display_and_code() {
        assert_eq!(Time(330).to_string(), "05:30");
        assert_eq!(Time(330).hhmm(), "0530");
        assert_eq!(Time::END_OF_DAY.hhmm(), "2400");
        assert_eq!(Time(1439).hour(), 23);
        assert_eq!(Time::END_OF_DAY.hour(), 0);
    }

    #[test]
    fn test_serde_as_hhmm_string() {
        let json = serde_json::to_string(&Time(90)).unwrap();
        assert_eq!(json, "\"0130\"");
        let back: Time = serde_json::from_str("\"2330\"").unwrap();
        assert_eq!(back, Time(1410));
        assert!(serde_json::from_str::<Time>("\"9999\"").is_err());
    }
}
