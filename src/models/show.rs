use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// When a broadcast starts, as delivered by the upstream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BroadcastStart {
    /// Absolute instant (API variant: Unix timestamp)
    Instant(DateTime<Utc>),
    /// Berlin civil date/time tokens still to be resolved (feed variant)
    Local { date: String, time: String },
}

/// Channel reference carried by a raw broadcast
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelRef {
    /// Opaque upstream channel identifier
    pub id: Option<String>,
    /// Name supplied inline by the upstream
    pub name: Option<String>,
}

/// Upstream-agnostic broadcast, before show matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBroadcast {
    pub title: String,
    pub start: BroadcastStart,
    pub description: Option<String>,
    pub duration: Option<u32>,
    pub image: Option<String>,
    pub channel: ChannelRef,
}

/// One matched, upcoming talk show airing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedShow {
    /// Title as delivered upstream, not the canonical show name
    pub title: String,
    pub date: DateTime<Utc>,
    pub description: String,
    pub channel: String,
    pub channel_url: Option<String>,
    /// Canonical name of the matched show
    #[serde(rename = "type")]
    pub show_type: String,
    pub show_url: Option<String>,
    pub duration: u32,
    pub image: String,
}
