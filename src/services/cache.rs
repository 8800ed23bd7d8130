use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;

struct CacheEntry<T> {
    value: Arc<T>,
    fetched_at: Instant,
}

/// In-memory cache holding one value for a fixed time after it was loaded.
///
/// - Fresh reads hand out the same `Arc` (no copy, no reload)
/// - Refresh is single-flight: concurrent callers past expiry wait for the
///   refresh in progress instead of starting their own
/// - A failed refresh leaves the previous value in place
pub struct TtlCache<T> {
    ttl: Duration,
    entry: RwLock<Option<CacheEntry<T>>>,
    refresh_lock: Mutex<()>,
}

impl<T> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Cached value if it is younger than the TTL
    pub async fn get_fresh(&self) -> Option<Arc<T>> {
        let entry = self.entry.read().await;
        entry
            .as_ref()
            .filter(|e| e.fetched_at.elapsed() < self.ttl)
            .map(|e| Arc::clone(&e.value))
    }

    /// Last stored value and its age, fresh or not
    pub async fn snapshot(&self) -> Option<(Arc<T>, Duration)> {
        let entry = self.entry.read().await;
        entry
            .as_ref()
            .map(|e| (Arc::clone(&e.value), e.fetched_at.elapsed()))
    }

    /// Return the fresh value, or run `load` once to replace it.
    ///
    /// `load` runs at most once per call, and only while holding the
    /// refresh lock. On error nothing is stored and the error is returned
    /// to this caller only.
    pub async fn get_or_refresh<F, Fut, E>(&self, load: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(value) = self.get_fresh().await {
            tracing::debug!("Serving cached value");
            return Ok(value);
        }

        let _guard = self.refresh_lock.lock().await;

        // Another caller may have refreshed while we waited
        if let Some(value) = self.get_fresh().await {
            tracing::debug!("Serving value refreshed by concurrent caller");
            return Ok(value);
        }

        let value = Arc::new(load().await?);

        let mut entry = self.entry.write().await;
        *entry = Some(CacheEntry {
            value: Arc::clone(&value),
            fetched_at: Instant::now(),
        });

        Ok(value)
    }
}
