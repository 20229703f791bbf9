//! Owned, expiring cache for the last known fuel price.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

/// Default cache TTL: 6 hours.
pub const DEFAULT_TTL: Duration = Duration::from_secs(6 * 60 * 60);

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += chrono::Duration::milliseconds(by.as_millis() as i64);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// A fetched price and when it was fetched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CachedPrice {
    pub per_gallon: f64,
    pub fetched_at: DateTime<Utc>,
}

/// Last known price per gallon, shared by every driving estimate.
///
/// Entries expire after the TTL and can be dropped early with
/// [`GasPriceCache::invalidate`].
pub struct GasPriceCache {
    entry: RwLock<Option<CachedPrice>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl GasPriceCache {
    /// Create an empty cache using the system clock.
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Create an empty cache reading time from `clock`.
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entry: RwLock::new(None),
            ttl,
            clock,
        }
    }

    /// The cached price, if present and younger than the TTL.
    pub async fn get(&self) -> Option<f64> {
        let entry = (*self.entry.read().await)?;
        let age = self.clock.now().signed_duration_since(entry.fetched_at);
        let age = age.to_std().unwrap_or(Duration::ZERO);
        (age < self.ttl).then_some(entry.per_gallon)
    }

    /// Remember `per_gallon` as of now.
    pub async fn store(&self, per_gallon: f64) {
        let entry = CachedPrice {
            per_gallon,
            fetched_at: self.clock.now(),
        };
        *self.entry.write().await = Some(entry);
    }

    /// The raw entry, expired or not.
    pub async fn peek(&self) -> Option<CachedPrice> {
        *self.entry.read().await
    }

    /// Forget the cached price so the next estimate refetches.
    pub async fn invalidate(&self) {
        *self.entry.write().await = None;
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl Default for GasPriceCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2019, 6, 1, 8, 0, 0).unwrap(),
        ))
    }

    #[tokio::test]
    async fn empty_cache_misses() {
        let cache = GasPriceCache::default();
        assert_eq!(cache.get().await, None);
        assert_eq!(cache.ttl(), DEFAULT_TTL);
    }

    #[tokio::test]
    async fn fresh_entry_hits() {
        let clock = clock();
        let cache = GasPriceCache::with_clock(Duration::from_secs(3600), clock.clone());
        cache.store(3.59).await;
        clock.advance(Duration::from_secs(3599));
        assert_eq!(cache.get().await, Some(3.59));
    }

    #[tokio::test]
    async fn entry_expires_at_ttl() {
        let clock = clock();
        let cache = GasPriceCache::with_clock(Duration::from_secs(3600), clock.clone());
        cache.store(3.59).await;
        clock.advance(Duration::from_secs(3600));
        assert_eq!(cache.get().await, None);
        assert!(cache.peek().await.is_some());
    }

    #[tokio::test]
    async fn invalidate_clears() {
        let cache = GasPriceCache::with_clock(Duration::from_secs(3600), clock());
        cache.store(4.05).await;
        cache.invalidate().await;
        assert_eq!(cache.get().await, None);
        assert_eq!(cache.peek().await, None);
    }
}
