//! Time-bounded caching of the normalized dataset.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info};

use fii_core::config::CacheConfig;
use fii_core::{Dataset, Result, ScreenerConfig};

use crate::fetch::{HttpFetcher, ListingSource};
use crate::normalize::{normalize, NormalizedBatch};

struct CacheEntry {
    dataset: Arc<Dataset>,
    fetched_at: DateTime<Utc>,
}

impl CacheEntry {
    fn is_fresh(&self, now: DateTime<Utc>, ttl: chrono::Duration) -> bool {
        now.signed_duration_since(self.fetched_at) < ttl
    }
}

/// A listing source with a time-bounded cache of the normalized dataset.
///
/// The entry and the refresh path share one mutex, held across the fetch:
/// concurrent callers of [`get_or_refresh`](Self::get_or_refresh) wait for
/// the in-flight refresh and then serve its result, so at most one request
/// is outstanding per cache window. Invalidation is purely time-based.
pub struct CachedListing<S> {
    source: S,
    ttl: chrono::Duration,
    state: Mutex<Option<CacheEntry>>,
}

impl<S: ListingSource> CachedListing<S> {
    /// Wrap a source with the configured TTL.
    pub fn new(source: S, config: CacheConfig) -> Self {
        Self {
            source,
            ttl: config.ttl(),
            state: Mutex::new(None),
        }
    }

    /// Return the cached dataset if still fresh at `now`, refreshing it
    /// otherwise.
    ///
    /// `now` is injected so callers control the clock and tests can simulate
    /// expiry. Fetch and parse failures propagate as typed errors and leave
    /// any previous entry in place.
    pub async fn get_or_refresh(&self, now: DateTime<Utc>) -> Result<Arc<Dataset>> {
        let mut state = self.state.lock().await;

        if let Some(entry) = state.as_ref() {
            if entry.is_fresh(now, self.ttl) {
                debug!("serving dataset cached at {}", entry.fetched_at);
                return Ok(Arc::clone(&entry.dataset));
            }
        }

        let raw = self.source.fetch_raw().await?;
        let NormalizedBatch { dataset, dropped } = normalize(&raw);
        let dataset = Arc::new(dataset);
        info!(
            "refreshed dataset: {} funds ({} rows excluded)",
            dataset.len(),
            dropped.len()
        );

        *state = Some(CacheEntry {
            dataset: Arc::clone(&dataset),
            fetched_at: now,
        });
        Ok(dataset)
    }
}

impl CachedListing<HttpFetcher> {
    /// Build the production pipeline entry point from configuration.
    pub fn from_config(config: &ScreenerConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(config.source.clone())?;
        Ok(Self::new(fetcher, config.cache.clone()))
    }
}
