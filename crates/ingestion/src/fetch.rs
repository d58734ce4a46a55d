//! HTTP retrieval of the raw listing.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use fii_core::config::SourceConfig;
use fii_core::{Error, RawTable, Result};

use crate::table::extract_table;

/// A source of the raw listing table.
///
/// The production implementation is [`HttpFetcher`]; tests substitute
/// in-memory sources.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Retrieve the raw listing table.
    async fn fetch_raw(&self) -> Result<RawTable>;
}

/// Fetches the listing over HTTP and extracts the table from the HTML body.
pub struct HttpFetcher {
    client: Client,
    config: SourceConfig,
}

impl HttpFetcher {
    /// Create a fetcher for the configured source.
    pub fn new(config: SourceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Error::fetch(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl ListingSource for HttpFetcher {
    async fn fetch_raw(&self) -> Result<RawTable> {
        debug!("GET {}", self.config.url);

        // Timeouts surface through reqwest's error and map to Fetch.
        let response = self
            .client
            .get(&self.config.url)
            .send()
            .await
            .map_err(|e| Error::fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::fetch(format!(
                "HTTP {} from {}",
                status.as_u16(),
                self.config.url
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::fetch(format!("failed to read response body: {}", e)))?;

        extract_table(&body)
    }
}
