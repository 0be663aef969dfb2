use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;
use chrono::{DateTime, TimeDelta, Utc};
use kpwatch::cache::ForecastCache;
use kpwatch::errors::FeedError;
use kpwatch::models::kp::{HourlyKp, ObservedKpDay};
use kpwatch::service::{ForecastService, KpSource};

enum Behavior {
    Healthy,
    Offline,
    Maintenance,
}

struct StubSource {
    calls: Arc<AtomicUsize>,
    behavior: Behavior,
}

impl KpSource for StubSource {
    fn observe(&self, now: DateTime<Utc>) -> Result<Vec<ObservedKpDay>, FeedError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            Behavior::Healthy => {
                let today = now.date_naive();
                let days = (-1i64..=1)
                    .map(|offset| ObservedKpDay {
                        date: today + TimeDelta::days(offset),
                        declared_max: Some(3.33),
                        hourly: vec![
                            HourlyKp { hour: "00:00".to_string(), kp: 2.33 },
                            HourlyKp { hour: "03:00".to_string(), kp: 3.33 },
                        ],
                    })
                    .collect();
                Ok(days)
            }
            Behavior::Offline => Err(FeedError::Transport("connection refused".to_string())),
            Behavior::Maintenance => Err(FeedError::UpstreamReported("maintenance".to_string())),
        }
    }
}

fn service_with(behavior: Behavior, ttl: Duration, window_days: usize) -> (ForecastService, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let source = StubSource { calls: calls.clone(), behavior };
    let service = ForecastService::new(Box::new(source), ForecastCache::new(ttl), window_days);

    (service, calls)
}

#[test]
fn healthy_source_yields_the_full_window() {
    let (service, _) = service_with(Behavior::Healthy, Duration::from_secs(60), 3);

    let days = service.fetch_forecast().unwrap();

    assert_eq!(days.len(), 3);
    for pair in days.windows(2) {
        assert!(pair[0].date < pair[1].date);
    }
    assert!(days.iter().all(|d| d.hourly.len() <= 8));
    assert!(days.iter().all(|d| !d.is_forecast()));
}

#[test]
fn second_fetch_within_ttl_hits_the_cache() {
    let (service, calls) = service_with(Behavior::Healthy, Duration::from_secs(60), 3);

    service.fetch_forecast().unwrap();
    service.fetch_forecast().unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn fetch_after_ttl_expiry_goes_upstream_again() {
    let (service, calls) = service_with(Behavior::Healthy, Duration::from_millis(20), 3);

    service.fetch_forecast().unwrap();
    service.fetch_forecast().unwrap();
    thread::sleep(Duration::from_millis(50));
    service.fetch_forecast().unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn invalidate_forces_a_refresh() {
    let (service, calls) = service_with(Behavior::Healthy, Duration::from_secs(60), 3);

    service.fetch_forecast().unwrap();
    service.invalidate();
    service.fetch_forecast().unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn transport_failure_degrades_to_a_marked_synthetic_window() {
    let (service, _) = service_with(Behavior::Offline, Duration::from_secs(60), 7);

    let days = service.fetch_forecast().unwrap();

    assert_eq!(days.len(), 7);
    assert!(days.iter().all(|d| d.is_forecast()));
    assert!(days.iter().all(|d| d.hourly.len() == 8));
}

#[test]
fn synthetic_windows_are_not_cached() {
    let (service, calls) = service_with(Behavior::Offline, Duration::from_secs(60), 3);

    service.fetch_forecast().unwrap();
    service.fetch_forecast().unwrap();

    // every call retries upstream while it keeps failing
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn upstream_reported_failure_is_surfaced_consistently() {
    let (service, calls) = service_with(Behavior::Maintenance, Duration::from_secs(60), 3);

    for _ in 0..2 {
        match service.fetch_forecast() {
            Err(FeedError::UpstreamReported(msg)) => assert_eq!(msg, "maintenance"),
            other => panic!("unexpected result: {:?}", other.map(|d| d.len())),
        }
    }

    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn concurrent_misses_collapse_into_one_upstream_call() {
    let (service, calls) = service_with(Behavior::Healthy, Duration::from_secs(60), 3);
    let service = Arc::new(service);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let service = service.clone();
            thread::spawn(move || service.fetch_forecast().unwrap().len())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 3);
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
