//! Upstream broadcast sources
//!
//! Two upstream shapes exist, one per deployment:
//!
//! - **API**: a JSON list of channels, each with its broadcasts and Unix
//!   start timestamps ([`BroadcastApiSource`])
//! - **RSS**: a feed whose item titles encode `date | time | channel | show`
//!   ([`RssFeedSource`])
//!
//! Both produce the same [`RawBroadcast`] list, so the rest of the pipeline
//! only depends on [`UpstreamSource`].

pub mod api;
pub mod client;
pub mod feed;
pub mod types;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{Config, UpstreamKind};
use crate::error::ShowResult;
use crate::models::RawBroadcast;

pub use api::BroadcastApiSource;
pub use client::UpstreamClient;
pub use feed::RssFeedSource;

/// One upstream shape able to produce raw broadcasts
#[async_trait]
pub trait UpstreamSource: Send + Sync {
    fn kind(&self) -> UpstreamKind;

    /// Perform exactly one upstream retrieval, in delivery order
    async fn fetch_raw(&self) -> ShowResult<Vec<RawBroadcast>>;
}

/// Build the source selected by configuration
pub fn from_config(config: &Config) -> ShowResult<Arc<dyn UpstreamSource>> {
    let client = UpstreamClient::new(
        config.upstream_url.clone(),
        config.upstream_kind.url_var(),
        &config.user_agent,
        config.fetch_timeout_ms,
    )?;

    let source: Arc<dyn UpstreamSource> = match config.upstream_kind {
        UpstreamKind::Api => Arc::new(BroadcastApiSource::new(client)),
        UpstreamKind::Rss => Arc::new(RssFeedSource::new(client)),
    };
    Ok(source)
}
