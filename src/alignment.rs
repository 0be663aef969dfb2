use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use log::warn;
use crate::errors::FeedError;
use crate::models::kp::{DailyKp, ObservedKpDay};
use crate::synthetic::synthesize;

/// Tolerated disagreement between a declared day maximum and the maximum
/// of the parsed hourly values before a warning is logged
const MAX_KP_TOLERANCE: f64 = 0.05;

/// Relative label for a date against the reference day: Yesterday, Today
/// or Tomorrow on an exact match, otherwise the weekday name.
///
/// # Arguments
///
/// * 'date' - the date to label
/// * 'today' - the reference day, computed once per alignment run
pub fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today - TimeDelta::days(1) {
        "Yesterday".to_string()
    } else if date == today {
        "Today".to_string()
    } else if date == today + TimeDelta::days(1) {
        "Tomorrow".to_string()
    } else {
        date.format("%A").to_string()
    }
}

/// Aligns parser observations into the canonical gap-free window.
///
/// Observations are canonicalized first; when the result covers fewer
/// days than requested, the shortfall is logged and filled per-day with
/// synthetic data, never touching the days that were observed. The
/// window is finally clipped to the requested length.
///
/// # Arguments
///
/// * 'observed' - per-day observations from either feed manager
/// * 'window_days' - requested window length
/// * 'now' - fetch time; all window arithmetic derives from its UTC date
pub fn align(observed: Vec<ObservedKpDay>, window_days: usize, now: DateTime<Utc>) -> Vec<DailyKp> {
    let today = now.date_naive();

    let mut days = canonicalize(observed, today);
    let missing = missing_dates(&days, window_days, today);

    if !missing.is_empty() {
        warn!("{}", FeedError::PartialData(missing.clone()));
        days = extend(days, &missing, today);
    }

    days.truncate(window_days);
    days
}

/// Converts observations to canonical days: resolves each day maximum,
/// assigns labels, deduplicates by date keeping the first occurrence and
/// sorts ascending.
///
/// The day maximum is the larger of the declared value and the computed
/// hourly maximum; a disagreement between the two is worth a warning but
/// not a rejection.
///
/// # Arguments
///
/// * 'observed' - per-day observations from either feed manager
/// * 'today' - reference date for labeling
pub fn canonicalize(observed: Vec<ObservedKpDay>, today: NaiveDate) -> Vec<DailyKp> {
    let mut days: Vec<DailyKp> = Vec::with_capacity(observed.len());

    for day in observed {
        if days.iter().any(|d| d.date == day.date) {
            continue;
        }

        let hourly_max = day.hourly.iter().fold(0.0f64, |m, h| m.max(h.kp));
        let max_kp = match day.declared_max {
            Some(declared) => {
                if !day.hourly.is_empty() && (declared - hourly_max).abs() > MAX_KP_TOLERANCE {
                    warn!("declared max Kp {} disagrees with hourly max {} on {}",
                          declared, hourly_max, day.date);
                }
                declared.max(hourly_max)
            }
            None => hourly_max,
        };

        days.push(DailyKp {
            date: day.date,
            label: day_label(day.date, today),
            max_kp,
            hourly: day.hourly,
        });
    }

    days.sort_by_key(|d| d.date);
    days
}

/// Dates the window still lacks: yesterday when the feed did not cover
/// it, then trailing dates until the window length is reached.
///
/// # Arguments
///
/// * 'days' - canonical days recovered so far, date-sorted
/// * 'window_days' - requested window length
/// * 'today' - reference date
pub fn missing_dates(days: &[DailyKp], window_days: usize, today: NaiveDate) -> Vec<NaiveDate> {
    let yesterday = today - TimeDelta::days(1);
    let mut missing: Vec<NaiveDate> = Vec::new();

    if !days.iter().any(|d| d.date == yesterday) {
        missing.push(yesterday);
    }

    let mut next = days.last().map_or(today, |d| d.date + TimeDelta::days(1));
    while days.len() + missing.len() < window_days {
        missing.push(next);
        next = next + TimeDelta::days(1);
    }

    missing
}

/// Inserts one synthetic day per missing date and restores date order.
/// Existing entries are never modified; gaps are filled by insertion
/// only.
///
/// # Arguments
///
/// * 'days' - canonical days recovered from the feed
/// * 'missing' - dates to approximate
/// * 'today' - reference date for labeling
pub fn extend(mut days: Vec<DailyKp>, missing: &[NaiveDate], today: NaiveDate) -> Vec<DailyKp> {
    for date in missing {
        days.extend(synthesize(1, *date, today));
    }

    days.sort_by_key(|d| d.date);
    days
}
