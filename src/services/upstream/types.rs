//! Broadcast API payload types
//!
//! The API is loosely typed: ids and timestamps show up both as numbers and
//! as strings, so those fields go through lenient deserializers.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::models::ChannelRef;

/// Channel entry of the top-level array
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiChannel {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub long_name: Option<String>,
    #[serde(default)]
    pub broadcasts: Option<Vec<ApiBroadcast>>,
}

impl ApiChannel {
    /// First inline name that is present and non-empty
    pub fn inline_name(&self) -> Option<&str> {
        [&self.name, &self.display_name, &self.long_name]
            .into_iter()
            .filter_map(|n| n.as_deref())
            .find(|n| !n.trim().is_empty())
    }

    pub fn channel_ref(&self) -> ChannelRef {
        ChannelRef {
            id: self.id.clone(),
            name: self.inline_name().map(str::to_string),
        }
    }
}

/// Single broadcast of a channel
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiBroadcast {
    #[serde(default)]
    pub title: Option<String>,
    /// Unix timestamp in seconds
    #[serde(default, deserialize_with = "lenient_i64")]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub duration: Option<i64>,
    /// Image reference
    #[serde(default)]
    pub pic: Option<String>,
}

/// Accept `71` as well as `"71"`
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    })
}

/// Accept integers, floats and numeric strings
fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
