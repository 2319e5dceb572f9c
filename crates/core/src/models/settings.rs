use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::Currency;
use crate::errors::CoreError;

/// Inclusive date window that new transactions default into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |s| date >= s) && self.end.map_or(true, |e| date <= e)
    }

    /// Pull `date` into the range, snapping to whichever bound it overshoots.
    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        match (self.start, self.end) {
            (Some(start), _) if date < start => start,
            (_, Some(end)) if date > end => end,
            _ => date,
        }
    }
}

/// User-configurable settings for the rule layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Currency used for records created without an explicit one (e.g., "GBP").
    pub default_currency: Currency,

    /// Window that default transaction dates are clamped into.
    #[serde(default)]
    pub date_range: DateRange,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_currency: Currency::gbp(),
            date_range: DateRange::default(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize settings: {e}")))
    }
}
