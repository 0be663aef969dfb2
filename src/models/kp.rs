use std::fmt;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Suffix appended to the label of every day that was approximated
/// rather than observed
pub const FORECAST_MARKER: &str = " (forecast)";

/// One 3-hour Kp sample within a day
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HourlyKp {
    pub hour: String,
    pub kp: f64,
}

/// A single day as decoded from one of the upstream feeds, before
/// labeling and window alignment. The text bulletin never declares a
/// day maximum so declared_max stays None on that path.
#[derive(Clone, Debug)]
pub struct ObservedKpDay {
    pub date: NaiveDate,
    pub declared_max: Option<f64>,
    pub hourly: Vec<HourlyKp>,
}

/// Canonical day entity all feeds are normalized into.
///
/// Dates within one window are unique and strictly ascending. The label
/// is Yesterday/Today/Tomorrow for the days around the reference date,
/// otherwise the weekday name, with the forecast marker appended for
/// approximated days. An empty hourly sequence together with a zero
/// max_kp is a valid "no data" day, not an error.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DailyKp {
    pub date: NaiveDate,
    pub label: String,
    pub max_kp: f64,
    pub hourly: Vec<HourlyKp>,
}

impl DailyKp {
    /// True for days produced by the synthetic generator
    pub fn is_forecast(&self) -> bool {
        self.label.ends_with(FORECAST_MARKER)
    }

    pub fn activity(&self) -> ActivityLevel {
        ActivityLevel::from_kp(self.max_kp)
    }
}

/// Implementation of the Display Trait rendering one forecast card
impl fmt::Display for DailyKp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.hourly.is_empty() && self.max_kp == 0.0 {
            return write!(f, "{} {:<22} no data", self.date, self.label);
        }

        write!(f, "{} {:<22} max Kp {:>4.2} [{}]", self.date, self.label, self.max_kp, self.activity())?;
        for h in &self.hourly {
            write!(f, "  {} {:0.2}", h.hour, h.kp)?;
        }

        Ok(())
    }
}

/// Geomagnetic activity bands over the Kp scale
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivityLevel {
    Quiet,
    Unsettled,
    Storm,
    SevereStorm,
}

impl ActivityLevel {
    /// Classifies a Kp value into its activity band
    ///
    /// # Arguments
    ///
    /// * 'kp' - the Kp value to classify
    pub fn from_kp(kp: f64) -> ActivityLevel {
        if kp >= 7.0 {
            ActivityLevel::SevereStorm
        } else if kp >= 5.0 {
            ActivityLevel::Storm
        } else if kp >= 3.0 {
            ActivityLevel::Unsettled
        } else {
            ActivityLevel::Quiet
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ActivityLevel::Quiet       => write!(f, "quiet"),
            ActivityLevel::Unsettled   => write!(f, "unsettled"),
            ActivityLevel::Storm       => write!(f, "storm"),
            ActivityLevel::SevereStorm => write!(f, "severe storm"),
        }
    }
}
