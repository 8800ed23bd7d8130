use chrono::Utc;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use crate::config::UpstreamKind;
use crate::error::ShowResult;
use crate::models::NormalizedShow;
use crate::services::cache::TtlCache;
use crate::services::metrics::{CACHE_HITS, SHOWS_EMITTED, UPSTREAM_FAILURES, UPSTREAM_FETCHES};
use crate::services::normalizer::normalize;
use crate::services::upstream::UpstreamSource;

/// Cache state for health reporting
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatus {
    pub populated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_seconds: Option<u64>,
    pub entries: usize,
}

/// Fetch -> normalize -> cache pipeline behind `get_shows`
pub struct ShowAggregator {
    source: Arc<dyn UpstreamSource>,
    cache: TtlCache<Vec<NormalizedShow>>,
}

impl ShowAggregator {
    pub fn new(source: Arc<dyn UpstreamSource>, ttl: Duration) -> Self {
        Self {
            source,
            cache: TtlCache::new(ttl),
        }
    }

    pub fn upstream_kind(&self) -> UpstreamKind {
        self.source.kind()
    }

    /// Current list of upcoming talk shows, in upstream order.
    ///
    /// Served from cache while fresh; otherwise one refresh runs and its
    /// error, if any, is returned to the caller.
    pub async fn get_shows(&self) -> ShowResult<Arc<Vec<NormalizedShow>>> {
        let refreshed = AtomicBool::new(false);
        let shows = self
            .cache
            .get_or_refresh(|| {
                refreshed.store(true, Ordering::Relaxed);
                self.refresh()
            })
            .await?;

        if !refreshed.load(Ordering::Relaxed) {
            CACHE_HITS.inc();
        }
        Ok(shows)
    }

    pub async fn cache_status(&self) -> CacheStatus {
        match self.cache.snapshot().await {
            Some((shows, age)) => CacheStatus {
                populated: true,
                age_seconds: Some(age.as_secs()),
                entries: shows.len(),
            },
            None => CacheStatus {
                populated: false,
                age_seconds: None,
                entries: 0,
            },
        }
    }

    async fn refresh(&self) -> ShowResult<Vec<NormalizedShow>> {
        info!("Fetching fresh shows data from {} upstream", self.source.kind());
        UPSTREAM_FETCHES.inc();

        let result = self
            .source
            .fetch_raw()
            .await
            .and_then(|raw| {
                let raw_count = raw.len();
                normalize(raw, Utc::now()).map(|shows| (raw_count, shows))
            });

        match result {
            Ok((raw_count, shows)) => {
                SHOWS_EMITTED.inc_by(shows.len() as u64);
                info!(raw = raw_count, matched = shows.len(), "Shows refreshed");
                Ok(shows)
            }
            Err(e) => {
                UPSTREAM_FAILURES.inc();
                error!("Error fetching shows: {}", e);
                Err(e)
            }
        }
    }
}
