//! HTTP access to the configured upstream

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{ShowError, ShowResult};

/// Single-request HTTP client for the upstream URL
pub struct UpstreamClient {
    http: Client,
    url: Option<String>,
    url_var: &'static str,
}

impl UpstreamClient {
    /// Create a client
    ///
    /// # Arguments
    /// * `url` - Upstream URL; `None` defers the failure to fetch time
    /// * `url_var` - Name of the setting the URL comes from (for errors)
    /// * `user_agent` - Client identifier sent with every request
    /// * `timeout_ms` - Per-request timeout
    pub fn new(
        url: Option<String>,
        url_var: &'static str,
        user_agent: &str,
        timeout_ms: u64,
    ) -> ShowResult<Self> {
        let http = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_millis(timeout_ms))
            .gzip(true)
            .build()?;

        Ok(Self { http, url, url_var })
    }

    /// GET the upstream URL once and return the body. No retries.
    pub async fn fetch_text(&self) -> ShowResult<String> {
        let url = self
            .url
            .as_deref()
            .ok_or(ShowError::ConfigurationMissing(self.url_var))?;

        debug!("Upstream request: {}", url);

        let response = self.http.get(url).send().await.map_err(|e| {
            warn!("Upstream request failed: {}", e);
            ShowError::Network(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Upstream returned HTTP {}", status.as_u16());
        }

        let body = response.error_for_status()?.text().await?;
        debug!("Upstream response: {} bytes", body.len());
        Ok(body)
    }
}
