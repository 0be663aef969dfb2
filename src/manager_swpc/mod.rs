use std::collections::BTreeMap;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use crate::errors::FeedError;
use crate::models::kp::{HourlyKp, ObservedKpDay};
use crate::service::KpSource;
use crate::upstream::Upstream;

/// Marker line opening the Kp breakdown section of the bulletin
const SECTION_MARKER: &str = "NOAA Kp index breakdown";

/// Line classifier states for walking the bulletin top to bottom
enum ParseState {
    SeekingHeader,
    ReadingHeader,
    ReadingRows,
    Done,
}

/// Manager for the NOAA SWPC 3-day plain-text forecast bulletin
pub struct Swpc {
    upstream: Upstream,
    url: String,
}

impl Swpc {
    /// Returns a Swpc struct ready for fetching and decoding bulletins
    ///
    /// # Arguments
    ///
    /// * 'url' - bulletin URL
    /// * 'timeout_secs' - fetch timeout in seconds
    pub fn new(url: &str, timeout_secs: u64) -> Swpc {
        Swpc { upstream: Upstream::new(timeout_secs), url: url.to_string() }
    }

    /// Retrieves the bulletin and decodes its Kp breakdown section into
    /// one observation per covered day.
    ///
    /// # Arguments
    ///
    /// * 'now' - fetch time, used to resolve the year the header omits
    pub fn get_forecast(&self, now: DateTime<Utc>) -> Result<Vec<ObservedKpDay>, FeedError> {
        let text = self.upstream.get_text(&self.url)?;
        parse_bulletin(&text, now)
    }
}

impl KpSource for Swpc {
    fn observe(&self, now: DateTime<Utc>) -> Result<Vec<ObservedKpDay>, FeedError> {
        self.get_forecast(now)
    }
}

/// Decodes the Kp breakdown section of a bulletin into per-day
/// observations.
///
/// The section opens with a marker line; the first line after it holding
/// exactly three "Mon D" tokens is the date header and maps positionally
/// to day index 0..2. Rows of the form "HH-HHUT v0 v1 v2" fill an
/// hour-keyed table; values may carry a storm-level annotation such as
/// "(G1)" which is stripped before parsing, and non-numeric values are
/// dropped rather than zero-filled. A bulletin without marker, header or
/// rows is unusable as a whole and reported as an incomplete feed.
///
/// # Arguments
///
/// * 'text' - the full bulletin
/// * 'now' - fetch time, used to resolve the year the header omits
pub fn parse_bulletin(text: &str, now: DateTime<Utc>) -> Result<Vec<ObservedKpDay>, FeedError> {
    let mut state = ParseState::SeekingHeader;
    let mut header: Vec<NaiveDate> = Vec::new();
    let mut rows: BTreeMap<u32, [Option<f64>; 3]> = BTreeMap::new();

    for line in text.lines() {
        match state {
            ParseState::SeekingHeader => {
                if line.contains(SECTION_MARKER) {
                    state = ParseState::ReadingHeader;
                }
            }
            ParseState::ReadingHeader => {
                if let Some(dates) = header_dates(line, now.year()) {
                    header = dates;
                    state = ParseState::ReadingRows;
                }
            }
            ParseState::ReadingRows => {
                if is_section_end(line) {
                    if !rows.is_empty() {
                        state = ParseState::Done;
                    }
                } else if let Some((hour, values)) = data_row(line) {
                    rows.insert(hour, values);
                }
            }
            ParseState::Done => break,
        }
    }

    if header.is_empty() {
        return Err(FeedError::IncompleteFeed("no date header found in bulletin".to_string()));
    }
    if rows.is_empty() {
        return Err(FeedError::IncompleteFeed("no hourly rows found in bulletin".to_string()));
    }

    let mut days: Vec<ObservedKpDay> = Vec::with_capacity(header.len());
    for (i, date) in header.iter().enumerate() {
        // BTreeMap iteration keeps the hours numerically sorted
        let mut hourly: Vec<HourlyKp> = Vec::new();
        for (hour, values) in rows.iter() {
            if let Some(kp) = values[i] {
                hourly.push(HourlyKp { hour: format!("{:02}:00", hour), kp });
            }
        }

        days.push(ObservedKpDay { date: *date, declared_max: None, hourly });
    }

    Ok(days)
}

/// Extracts exactly three "Mon D" dates from a header line, or None if
/// the line is anything else
fn header_dates(line: &str, year: i32) -> Option<Vec<NaiveDate>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 6 {
        return None;
    }

    let mut dates: Vec<NaiveDate> = Vec::with_capacity(3);
    for pair in tokens.chunks(2) {
        let month = month_number(pair[0])?;
        let day = pair[1].parse::<u32>().ok()?;
        dates.push(NaiveDate::from_ymd_opt(year, month, day)?);
    }

    Some(dates)
}

fn month_number(token: &str) -> Option<u32> {
    match token {
        "Jan" => Some(1),
        "Feb" => Some(2),
        "Mar" => Some(3),
        "Apr" => Some(4),
        "May" => Some(5),
        "Jun" => Some(6),
        "Jul" => Some(7),
        "Aug" => Some(8),
        "Sep" => Some(9),
        "Oct" => Some(10),
        "Nov" => Some(11),
        "Dec" => Some(12),
        _ => None,
    }
}

/// Splits a "HH-HHUT v0 v1 v2" row into its start hour and the three
/// per-day values, or None if the line is not a data row
fn data_row(line: &str) -> Option<(u32, [Option<f64>; 3])> {
    let trimmed = line.trim_start();
    let (range, rest) = trimmed.split_once(char::is_whitespace)?;
    let hour = hour_range_start(range)?;

    let cleaned = strip_annotations(rest);
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();
    if tokens.len() < 3 {
        return None;
    }

    let mut values: [Option<f64>; 3] = [None; 3];
    for (i, token) in tokens.iter().take(3).enumerate() {
        values[i] = token.parse::<f64>().ok().map(|v| v.clamp(0.0, 9.0));
    }

    Some((hour, values))
}

/// Validates a "HH-HHUT" token and returns its leading hour
fn hour_range_start(token: &str) -> Option<u32> {
    let b = token.as_bytes();
    if b.len() != 7 || b[2] != b'-' || b[5] != b'U' || b[6] != b'T' {
        return None;
    }
    if ![0, 1, 3, 4].iter().all(|i| b[*i].is_ascii_digit()) {
        return None;
    }

    let hour = (b[0] - b'0') as u32 * 10 + (b[1] - b'0') as u32;
    (hour < 24).then_some(hour)
}

/// Removes parenthesized storm-level annotations, e.g. "5.67 (G2)"
fn strip_annotations(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut depth: usize = 0;

    for c in s.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }

    out
}

/// True for lines that terminate the Kp breakdown section: the next
/// lettered section or a blank line
fn is_section_end(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with("B.") || trimmed.starts_with("C.")
}
