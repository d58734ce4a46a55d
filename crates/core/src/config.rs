//! Configuration structures for the FII screening pipeline.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration for the screener.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenerConfig {
    /// Listing source configuration.
    pub source: SourceConfig,
    /// Refresh cache configuration.
    pub cache: CacheConfig,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

/// Listing source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Source URL serving the listing table.
    pub url: String,
    /// User-Agent header sent with the request. The source rejects
    /// non-browser agents.
    pub user_agent: String,
    /// Request timeout in seconds. A timeout surfaces as a fetch error.
    pub timeout_secs: u64,
}

impl SourceConfig {
    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: "https://www.fundamentus.com.br/fii_resultado.php".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
                .to_string(),
            timeout_secs: 15,
        }
    }
}

/// Refresh cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Time-to-live of a fetched dataset in seconds.
    pub ttl_secs: u64,
}

impl CacheConfig {
    /// Cache TTL as a signed [`chrono::Duration`] for timestamp arithmetic.
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.ttl_secs as i64)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_secs: 3600 }
    }
}
