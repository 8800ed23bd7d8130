use lazy_static::lazy_static;
use std::collections::HashMap;

use crate::models::ChannelRef;

/// Display information for a known channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelInfo {
    pub name: &'static str,
    pub url: Option<&'static str>,
}

/// Channel fields ready for a normalized show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedChannel {
    pub name: String,
    pub url: Option<String>,
}

impl From<&ChannelInfo> for ResolvedChannel {
    fn from(info: &ChannelInfo) -> Self {
        Self {
            name: info.name.to_string(),
            url: info.url.map(str::to_string),
        }
    }
}

const fn channel(name: &'static str, url: Option<&'static str>) -> ChannelInfo {
    ChannelInfo { name, url }
}

lazy_static! {
    /// Upstream channel id -> display info
    static ref CHANNELS: HashMap<&'static str, ChannelInfo> = HashMap::from([
        ("71", channel("Das Erste", Some("https://www.ardmediathek.de/live"))),
        ("37", channel("ZDF", None)),
        ("38", channel("RTL", None)),
        ("39", channel("SAT.1", None)),
        ("40", channel("ProSieben", None)),
        ("41", channel("VOX", None)),
        ("42", channel("RTL II", None)),
        ("47", channel("NDR", None)),
        ("56", channel("Phoenix", None)),
        ("100", channel("ARD-alpha", None)),
        ("770", channel("WELT", None)),
        ("12046", channel("Sky Sport News", None)),
        ("12178", channel("Sky Sport News", None)),
        ("262", channel("ServusTV", None)),
        ("1192", channel("Deutschlandfunk", None)),
        ("153", channel("BR", None)),
        ("67", channel("BBC World News", None)),
        ("280", channel("ERF", None)),
    ]);
}

/// Look up a channel by upstream identifier
pub fn lookup(id: &str) -> Option<&'static ChannelInfo> {
    CHANNELS.get(id.trim())
}

/// Look up a channel by its display name (case-insensitive)
pub fn lookup_by_name(name: &str) -> Option<&'static ChannelInfo> {
    let name = name.trim();
    CHANNELS.values().find(|info| info.name.eq_ignore_ascii_case(name))
}

/// Resolve display name and URL for a channel reference.
///
/// Order: registry by id, registry by inline name, inline name as-is,
/// then a synthetic `Channel <id>` label. Never returns an empty name.
pub fn resolve(channel: &ChannelRef) -> ResolvedChannel {
    if let Some(info) = channel.id.as_deref().and_then(lookup) {
        return info.into();
    }

    let inline = channel
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());

    if let Some(name) = inline {
        return match lookup_by_name(name) {
            Some(info) => info.into(),
            None => ResolvedChannel {
                name: name.to_string(),
                url: None,
            },
        };
    }

    let id = channel
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .unwrap_or("unknown");

    ResolvedChannel {
        name: format!("Channel {}", id),
        url: None,
    }
}
