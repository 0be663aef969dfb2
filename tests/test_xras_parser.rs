use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use kpwatch::errors::FeedError;
use kpwatch::manager_xras::parse_report;
use serde_json::json;

fn fetch_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap()
}

fn entry(time: &str, max_kp: &str, slots: [&str; 8]) -> serde_json::Value {
    json!({
        "time": time,
        "f10": "155",
        "sn": "120",
        "ap": "8",
        "max_kp": max_kp,
        "h00": slots[0], "h03": slots[1], "h06": slots[2], "h09": slots[3],
        "h12": slots[4], "h15": slots[5], "h18": slots[6], "h21": slots[7],
    })
}

fn report(error: &str, data: Vec<serde_json::Value>) -> String {
    json!({
        "version": "1.1",
        "type": "kp_index",
        "error": error,
        "tzone": "UTC",
        "kp_type": "est",
        "data": data,
    })
    .to_string()
}

#[test]
fn selects_yesterday_today_tomorrow_in_order() {
    // entries deliberately unsorted and with days outside the window
    let json = report("", vec![
        entry("2026-08-08", "3.33", ["2.0", "2.3", "2.7", "3.0", "3.3", "2.7", "2.3", "2.0"]),
        entry("2026-08-04", "1.7", ["1.0", "1.0", "1.3", "1.7", "1.3", "1.0", "1.0", "1.0"]),
        entry("2026-08-06", "4.0", ["2.7", "3.0", "4.0", "3.7", "3.3", "3.0", "2.7", "2.3"]),
        entry("2026-08-07", "2.7", ["2.0", "2.3", "2.7", "2.3", "2.0", "1.7", "1.7", "2.0"]),
    ]);

    let days = parse_report(&json, fetch_time()).unwrap();

    assert_eq!(days.len(), 3);
    assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2026, 8, 6).unwrap());
    assert_eq!(days[1].date, NaiveDate::from_ymd_opt(2026, 8, 7).unwrap());
    assert_eq!(days[2].date, NaiveDate::from_ymd_opt(2026, 8, 8).unwrap());
    assert_eq!(days[0].declared_max, Some(4.0));
    assert_eq!(days[0].hourly.len(), 8);
}

#[test]
fn null_and_garbage_slots_are_omitted() {
    let json = report("", vec![
        entry("2026-08-07", "3.0", ["2.0", "null", "3.0", "null", "n/a", "2.3", "null", "2.0"]),
    ]);

    let days = parse_report(&json, fetch_time()).unwrap();
    let today = &days[1];

    assert_eq!(today.hourly.len(), 4);
    assert!(today.hourly.iter().all(|h| h.hour != "03:00"));
    assert_eq!(today.hourly[0].hour, "00:00");
    assert_eq!(today.hourly[0].kp, 2.0);
}

#[test]
fn missing_target_day_becomes_zero_activity() {
    // only today is covered; yesterday and tomorrow are absent
    let json = report("", vec![
        entry("2026-08-07", "2.3", ["2.0", "2.3", "2.0", "1.7", "1.7", "2.0", "2.3", "2.0"]),
    ]);

    let days = parse_report(&json, fetch_time()).unwrap();

    assert_eq!(days.len(), 3);
    assert_eq!(days[0].declared_max, Some(0.0));
    assert!(days[0].hourly.is_empty());
    assert_eq!(days[2].declared_max, Some(0.0));
    assert!(days[2].hourly.is_empty());
}

#[test]
fn invalid_declared_max_falls_back_to_zero() {
    let json = report("", vec![
        entry("2026-08-07", "n/a", ["null", "null", "null", "null", "null", "null", "null", "null"]),
    ]);

    let days = parse_report(&json, fetch_time()).unwrap();

    assert_eq!(days[1].declared_max, Some(0.0));
    assert!(days[1].hourly.is_empty());
}

#[test]
fn upstream_error_field_is_surfaced() {
    let json = report("maintenance", vec![]);

    let err = parse_report(&json, fetch_time()).unwrap_err();
    match err {
        FeedError::UpstreamReported(msg) => assert_eq!(msg, "maintenance"),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn malformed_document_is_incomplete() {
    let err = parse_report("{ not json", fetch_time()).unwrap_err();
    assert!(matches!(err, FeedError::IncompleteFeed(_)));
}

#[test]
fn out_of_scale_values_are_clamped() {
    let json = report("", vec![
        entry("2026-08-07", "12.0", ["9.9", "-1.0", "2.0", "null", "null", "null", "null", "null"]),
    ]);

    let days = parse_report(&json, fetch_time()).unwrap();
    let today = &days[1];

    assert_eq!(today.declared_max, Some(9.0));
    assert_eq!(today.hourly[0].kp, 9.0);
    assert_eq!(today.hourly[1].kp, 0.0);
}
