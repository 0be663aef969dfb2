use chrono::{DateTime, TimeDelta, Utc};
use crate::errors::FeedError;
use crate::models::kp::{HourlyKp, ObservedKpDay};
use crate::models::xras_kp::{XrasKpEntry, XrasKpReport};
use crate::service::KpSource;
use crate::upstream::Upstream;

/// Start hours of the eight 3-hour slots in one feed entry
const SLOT_HOURS: [u32; 8] = [0, 3, 6, 9, 12, 15, 18, 21];

/// Manager for the XRAS structured daily Kp series
pub struct Xras {
    upstream: Upstream,
    url: String,
}

impl Xras {
    /// Returns an Xras struct ready for fetching and decoding the feed
    ///
    /// # Arguments
    ///
    /// * 'url' - feed URL
    /// * 'timeout_secs' - fetch timeout in seconds
    pub fn new(url: &str, timeout_secs: u64) -> Xras {
        Xras { upstream: Upstream::new(timeout_secs), url: url.to_string() }
    }

    /// Retrieves the feed and decodes the three days of interest around
    /// the fetch time.
    ///
    /// # Arguments
    ///
    /// * 'now' - fetch time, basis for the yesterday..tomorrow targets
    pub fn get_forecast(&self, now: DateTime<Utc>) -> Result<Vec<ObservedKpDay>, FeedError> {
        let json = self.upstream.get_text(&self.url)?;
        parse_report(&json, now)
    }
}

impl KpSource for Xras {
    fn observe(&self, now: DateTime<Utc>) -> Result<Vec<ObservedKpDay>, FeedError> {
        self.get_forecast(now)
    }
}

/// Decodes the feed document into one observation per target day.
///
/// A non-empty top-level error field means the upstream itself declared
/// the document unusable and is reported as such. Otherwise the entries
/// are sorted by date and matched against the three UTC calendar days
/// yesterday/today/tomorrow; a target without an entry becomes a
/// zero-activity day, which is a valid result rather than an error.
///
/// # Arguments
///
/// * 'json' - the raw feed document
/// * 'now' - fetch time, basis for the yesterday..tomorrow targets
pub fn parse_report(json: &str, now: DateTime<Utc>) -> Result<Vec<ObservedKpDay>, FeedError> {
    let mut report: XrasKpReport = serde_json::from_str(json)?;

    if !report.error.is_empty() {
        return Err(FeedError::UpstreamReported(report.error));
    }

    report.data.sort_by_key(|e| e.time);

    let today = now.date_naive();
    let targets = [today - TimeDelta::days(1), today, today + TimeDelta::days(1)];

    let mut days: Vec<ObservedKpDay> = Vec::with_capacity(targets.len());
    for date in targets {
        let day = match report.data.iter().find(|e| e.time == date) {
            Some(entry) => entry_to_day(entry),
            None => ObservedKpDay { date, declared_max: Some(0.0), hourly: Vec::new() },
        };
        days.push(day);
    }

    Ok(days)
}

/// Converts one raw feed entry to an observed day. Slots the feed marked
/// "null" or filled with something non-numeric are omitted, not
/// zero-filled.
fn entry_to_day(entry: &XrasKpEntry) -> ObservedKpDay {
    let slots = [
        &entry.h00, &entry.h03, &entry.h06, &entry.h09,
        &entry.h12, &entry.h15, &entry.h18, &entry.h21,
    ];

    let mut hourly: Vec<HourlyKp> = Vec::with_capacity(slots.len());
    for (hour, slot) in SLOT_HOURS.iter().zip(slots) {
        if let Some(kp) = slot.as_deref().and_then(parse_kp) {
            hourly.push(HourlyKp { hour: format!("{:02}:00", hour), kp });
        }
    }

    ObservedKpDay {
        date: entry.time,
        declared_max: Some(parse_kp(&entry.max_kp).unwrap_or(0.0)),
        hourly,
    }
}

fn parse_kp(raw: &str) -> Option<f64> {
    match raw.trim() {
        "" | "null" => None,
        v => v.parse::<f64>().ok().map(|kp| kp.clamp(0.0, 9.0)),
    }
}
