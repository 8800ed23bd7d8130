//! Broadcast API source (structured JSON upstream)

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::Value;
use tracing::debug;

use super::client::UpstreamClient;
use super::types::ApiChannel;
use super::UpstreamSource;
use crate::config::UpstreamKind;
use crate::error::{ShowError, ShowResult};
use crate::models::{BroadcastStart, RawBroadcast};

/// Upstream delivering a JSON list of channels with their broadcasts
pub struct BroadcastApiSource {
    client: UpstreamClient,
}

impl BroadcastApiSource {
    pub fn new(client: UpstreamClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UpstreamSource for BroadcastApiSource {
    fn kind(&self) -> UpstreamKind {
        UpstreamKind::Api
    }

    async fn fetch_raw(&self) -> ShowResult<Vec<RawBroadcast>> {
        let body = self.client.fetch_text().await?;
        parse_broadcast_payload(&body)
    }
}

/// Flatten the channel list into raw broadcasts, keeping delivery order
pub fn parse_broadcast_payload(body: &str) -> ShowResult<Vec<RawBroadcast>> {
    let payload: Value = serde_json::from_str(body)
        .map_err(|e| ShowError::malformed(format!("invalid JSON: {}", e)))?;

    let Value::Array(channels) = payload else {
        return Err(ShowError::malformed("expected array response from API"));
    };

    let mut raw = Vec::new();

    for (index, value) in channels.into_iter().enumerate() {
        let channel: ApiChannel = serde_json::from_value(value)
            .map_err(|e| ShowError::malformed(format!("channel #{}: {}", index, e)))?;
        let channel_ref = channel.channel_ref();

        let Some(broadcasts) = channel.broadcasts else {
            debug!("Channel #{} has no broadcasts", index);
            continue;
        };

        for broadcast in broadcasts {
            let title = broadcast.title.unwrap_or_default();
            let start = broadcast
                .start_time
                .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
                .ok_or_else(|| {
                    ShowError::malformed(format!("broadcast '{}' has no valid startTime", title))
                })?;

            raw.push(RawBroadcast {
                title,
                start: BroadcastStart::Instant(start),
                description: broadcast.description,
                duration: broadcast.duration.and_then(|d| u32::try_from(d).ok()),
                image: broadcast.pic,
                channel: channel_ref.clone(),
            });
        }
    }

    Ok(raw)
}
