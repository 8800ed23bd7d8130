use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::error::ShowResult;
use crate::models::{BroadcastStart, NormalizedShow, RawBroadcast};
use crate::services::channels;
use crate::services::date_parser::parse_german_date;
use crate::services::shows::find_matching_show;

lazy_static! {
    /// Anything from `<` to the next `>`
    static ref HTML_TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
}

/// Remove HTML tags and surrounding whitespace. Entities are left alone.
pub fn strip_html(text: &str) -> String {
    HTML_TAG.replace_all(text, "").trim().to_string()
}

/// Match and normalize a whole batch, preserving upstream order.
///
/// Non-matching broadcasts are dropped. Any error fails the batch;
/// there are no partial results.
pub fn normalize(raw: Vec<RawBroadcast>, now: DateTime<Utc>) -> ShowResult<Vec<NormalizedShow>> {
    let mut shows = Vec::with_capacity(raw.len());
    for broadcast in raw {
        if let Some(show) = normalize_one(broadcast, now)? {
            shows.push(show);
        }
    }
    Ok(shows)
}

/// Normalize a single broadcast; `Ok(None)` when no known show matches
pub fn normalize_one(raw: RawBroadcast, now: DateTime<Utc>) -> ShowResult<Option<NormalizedShow>> {
    let Some(show) = find_matching_show(&raw.title) else {
        debug!("No show match for '{}'", raw.title);
        return Ok(None);
    };

    let date = match &raw.start {
        BroadcastStart::Instant(instant) => *instant,
        BroadcastStart::Local { date, time } => {
            parse_german_date(&format!("{} | {}", date, time), now)?
        }
    };

    let channel = channels::resolve(&raw.channel);

    Ok(Some(NormalizedShow {
        date,
        description: raw.description.as_deref().map(strip_html).unwrap_or_default(),
        channel: channel.name,
        channel_url: channel.url,
        show_type: show.name.to_string(),
        show_url: show.url.map(str::to_string),
        duration: raw.duration.unwrap_or(0),
        image: raw.image.unwrap_or_default(),
        title: raw.title,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShowError;
    use crate::models::ChannelRef;
    use chrono::TimeZone;

    fn api_broadcast(title: &str, channel_id: &str) -> RawBroadcast {
        RawBroadcast {
            title: title.to_string(),
            start: BroadcastStart::Instant(Utc.timestamp_opt(1_700_000_000, 0).unwrap()),
            description: None,
            duration: None,
            image: None,
            channel: ChannelRef {
                id: Some(channel_id.to_string()),
                name: None,
            },
        }
    }

    fn feed_broadcast(date: &str, time: &str, channel: &str, title: &str) -> RawBroadcast {
        RawBroadcast {
            title: title.to_string(),
            start: BroadcastStart::Local {
                date: date.to_string(),
                time: time.to_string(),
            },
            description: Some("<p>Talk</p>".to_string()),
            duration: None,
            image: None,
            channel: ChannelRef {
                id: None,
                name: Some(channel.to_string()),
            },
        }
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<p>Talk</p>"), "Talk");
        assert_eq!(strip_html(" <b>Gäste:</b> <i>A</i>, B "), "Gäste: A, B");
        assert_eq!(strip_html("kein HTML"), "kein HTML");
        assert_eq!(strip_html("a &amp; b"), "a &amp; b");
    }

    #[test]
    fn test_api_example() {
        let show = normalize_one(api_broadcast("Hart aber fair", "71"), Utc::now())
            .unwrap()
            .unwrap();

        assert_eq!(show.title, "Hart aber fair");
        assert_eq!(show.channel, "Das Erste");
        assert_eq!(show.channel_url.as_deref(), Some("https://www.ardmediathek.de/live"));
        assert_eq!(show.show_type, "hart aber fair");
        assert_eq!(show.date, Utc.timestamp_opt(1_700_000_000, 0).unwrap());
        assert_eq!(show.duration, 0);
        assert_eq!(show.image, "");
        assert_eq!(show.description, "");
    }

    #[test]
    fn test_feed_example() {
        let now = Utc.with_ymd_and_hms(2025, 12, 1, 12, 0, 0).unwrap();
        let show = normalize_one(feed_broadcast("25.12", "20:15", "Das Erste", "Maischberger"), now)
            .unwrap()
            .unwrap();

        assert_eq!(show.title, "Maischberger");
        assert_eq!(show.channel, "Das Erste");
        assert_eq!(show.show_type, "maischberger");
        assert_eq!(show.description, "Talk");
        assert_eq!(show.date, Utc.with_ymd_and_hms(2025, 12, 25, 19, 15, 0).unwrap());
    }

    #[test]
    fn test_keeps_raw_title_and_registry_priority() {
        let show = normalize_one(api_broadcast("NDR Talk Show", "47"), Utc::now())
            .unwrap()
            .unwrap();
        assert_eq!(show.title, "NDR Talk Show");
        assert_eq!(show.show_type, "talk");
    }

    #[test]
    fn test_unmatched_dropped_order_kept() {
        let raw = vec![
            api_broadcast("Tagesschau", "71"),
            api_broadcast("Markus Lanz", "37"),
            api_broadcast("Wetter", "37"),
            api_broadcast("maischberger", "71"),
        ];
        let shows = normalize(raw, Utc::now()).unwrap();
        let titles: Vec<&str> = shows.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Markus Lanz", "maischberger"]);
    }

    #[test]
    fn test_unknown_channel_gets_synthetic_name() {
        let show = normalize_one(api_broadcast("Markus Lanz", "424242"), Utc::now())
            .unwrap()
            .unwrap();
        assert_eq!(show.channel, "Channel 424242");
        assert!(show.channel_url.is_none());
    }

    #[test]
    fn test_bad_date_fails_batch() {
        let raw = vec![
            api_broadcast("Markus Lanz", "37"),
            feed_broadcast("übermorgen", "20:15", "ZDF", "Markus Lanz"),
        ];
        assert!(matches!(
            normalize(raw, Utc::now()),
            Err(ShowError::InvalidDateFormat { .. })
        ));
    }

    #[test]
    fn test_bad_date_on_unmatched_item_ignored() {
        let raw = vec![feed_broadcast("übermorgen", "20:15", "ZDF", "Wetter")];
        assert!(normalize(raw, Utc::now()).unwrap().is_empty());
    }
}
