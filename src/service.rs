use std::sync::{Mutex, PoisonError};
use chrono::{DateTime, TimeDelta, Utc};
use log::{error, warn};
use crate::alignment::align;
use crate::cache::ForecastCache;
use crate::errors::FeedError;
use crate::models::kp::{DailyKp, ObservedKpDay};
use crate::synthetic::synthesize;

/// A source of raw per-day Kp observations, one implementation per
/// upstream feed
pub trait KpSource: Send + Sync {
    fn observe(&self, now: DateTime<Utc>) -> Result<Vec<ObservedKpDay>, FeedError>;
}

/// Orchestrates cache, feed manager, alignment and fallback behind the
/// one public operation consumers call.
pub struct ForecastService {
    source: Box<dyn KpSource>,
    cache: ForecastCache,
    window_days: usize,
    refresh: Mutex<()>,
}

impl ForecastService {
    /// Returns a service over the given source and cache
    ///
    /// # Arguments
    ///
    /// * 'source' - the configured feed manager
    /// * 'cache' - the TTL cache the service owns from here on
    /// * 'window_days' - requested window length (3 or 7)
    pub fn new(source: Box<dyn KpSource>, cache: ForecastCache, window_days: usize) -> ForecastService {
        ForecastService { source, cache, window_days, refresh: Mutex::new(()) }
    }

    /// Returns the canonical forecast window.
    ///
    /// A fresh cached window is returned without touching upstream.
    /// Otherwise one upstream fetch runs; concurrent callers hitting the
    /// same expiry block on the refresh lock and pick up the freshly
    /// stored window instead of fetching again.
    ///
    /// Transport failures and unusable bulletins degrade to a fully
    /// synthetic window covering the same dates, which is not cached so
    /// the next call retries upstream. A failure the upstream itself
    /// reported is returned to the caller unchanged, every time.
    pub fn fetch_forecast(&self) -> Result<Vec<DailyKp>, FeedError> {
        if let Some(payload) = self.cache.get() {
            return Ok(payload);
        }

        let _flight = self.refresh.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(payload) = self.cache.get() {
            return Ok(payload);
        }

        let now = Utc::now();
        match self.source.observe(now) {
            Ok(observed) => {
                let days = align(observed, self.window_days, now);
                self.cache.put(days.clone());
                Ok(days)
            }
            Err(e @ FeedError::UpstreamReported(_)) => {
                error!("{}", e);
                Err(e)
            }
            Err(e) => {
                warn!("{}, serving a synthetic window", e);
                let today = now.date_naive();
                Ok(synthesize(self.window_days, today - TimeDelta::days(1), today))
            }
        }
    }

    /// Drops the cached window so the next call refreshes from upstream
    pub fn invalidate(&self) {
        self.cache.invalidate();
    }
}
