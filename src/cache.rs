use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};
use crate::models::kp::DailyKp;

struct CacheEntry {
    payload: Vec<DailyKp>,
    fetched_at: Instant,
}

/// Single-slot cache for the last successfully aligned window.
///
/// The slot is replaced wholesale on every refresh and never mutated in
/// place. The cache is an explicit object injected into its owner, so
/// its lifetime follows the service rather than the process.
pub struct ForecastCache {
    slot: Mutex<Option<CacheEntry>>,
    ttl: Duration,
}

impl ForecastCache {
    /// Returns an empty cache whose entries live for the given TTL
    ///
    /// # Arguments
    ///
    /// * 'ttl' - maximum entry age before a get turns into a miss
    pub fn new(ttl: Duration) -> ForecastCache {
        ForecastCache { slot: Mutex::new(None), ttl }
    }

    /// Returns the cached window while it is younger than the TTL
    pub fn get(&self) -> Option<Vec<DailyKp>> {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);

        slot.as_ref()
            .filter(|e| e.fetched_at.elapsed() < self.ttl)
            .map(|e| e.payload.clone())
    }

    /// Replaces slot and timestamp with a freshly produced window
    ///
    /// # Arguments
    ///
    /// * 'payload' - the window to cache
    pub fn put(&self, payload: Vec<DailyKp>) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(CacheEntry { payload, fetched_at: Instant::now() });
    }

    /// Clears the slot so the next get is a miss
    pub fn invalidate(&self) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = None;
    }
}
