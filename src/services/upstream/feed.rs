//! RSS feed source
//!
//! Item titles carry four pipe-separated fields:
//!
//! ```text
//! 25.12 | 20:15 | Das Erste | Maischberger
//! ```
//!
//! The date/time tokens are left unresolved here; the normalizer turns them
//! into instants.

use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::Reader;

use super::client::UpstreamClient;
use super::UpstreamSource;
use crate::config::UpstreamKind;
use crate::error::{ShowError, ShowResult};
use crate::models::{BroadcastStart, ChannelRef, RawBroadcast};

/// Upstream delivering an RSS document
pub struct RssFeedSource {
    client: UpstreamClient,
}

impl RssFeedSource {
    pub fn new(client: UpstreamClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UpstreamSource for RssFeedSource {
    fn kind(&self) -> UpstreamKind {
        UpstreamKind::Rss
    }

    async fn fetch_raw(&self) -> ShowResult<Vec<RawBroadcast>> {
        let body = self.client.fetch_text().await?;
        parse_feed(&body)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Description,
}

#[derive(Default)]
struct FeedItem {
    title: String,
    description: String,
}

impl FeedItem {
    fn push(&mut self, field: Field, text: &str) {
        match field {
            Field::Title => self.title.push_str(text),
            Field::Description => self.description.push_str(text),
        }
    }

    fn into_raw(self) -> ShowResult<RawBroadcast> {
        let fields: Vec<&str> = self.title.split('|').map(str::trim).collect();
        let [date, time, channel, show] = &fields[..] else {
            return Err(ShowError::malformed(format!(
                "feed item title '{}' does not have exactly four '|' fields",
                self.title.trim()
            )));
        };

        let description = self.description.trim();

        Ok(RawBroadcast {
            title: show.to_string(),
            start: BroadcastStart::Local {
                date: date.to_string(),
                time: time.to_string(),
            },
            description: (!description.is_empty()).then(|| description.to_string()),
            duration: None,
            image: None,
            channel: ChannelRef {
                id: None,
                name: (!channel.is_empty()).then(|| channel.to_string()),
            },
        })
    }
}

/// Parse an RSS document into raw broadcasts, in item order
pub fn parse_feed(xml: &str) -> ShowResult<Vec<RawBroadcast>> {
    // No trim_text: entity references split text events and trimming
    // each piece would eat the spaces around them.
    let mut reader = Reader::from_str(xml);

    let mut items = Vec::new();
    let mut has_container = false;
    let mut current_item: Option<FeedItem> = None;
    let mut current_field: Option<Field> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"rss" | b"channel" => has_container = true,
                b"item" => current_item = Some(FeedItem::default()),
                b"title" if current_item.is_some() => current_field = Some(Field::Title),
                b"description" if current_item.is_some() => {
                    current_field = Some(Field::Description)
                }
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"item" => {
                    if let Some(item) = current_item.take() {
                        items.push(item.into_raw()?);
                    }
                    current_field = None;
                }
                b"title" | b"description" => current_field = None,
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if let (Some(item), Some(field)) = (current_item.as_mut(), current_field) {
                    item.push(field, &String::from_utf8_lossy(&e));
                }
            }
            Ok(Event::CData(e)) => {
                if let (Some(item), Some(field)) = (current_item.as_mut(), current_field) {
                    item.push(field, &String::from_utf8_lossy(&e));
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if let (Some(item), Some(field)) = (current_item.as_mut(), current_field) {
                    let name = String::from_utf8_lossy(&e);
                    item.push(field, &decode_entity(&name));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ShowError::malformed(format!(
                    "feed XML error at position {}: {}",
                    reader.error_position(),
                    e
                )));
            }
            _ => {}
        }
    }

    if !has_container {
        return Err(ShowError::malformed("missing <rss>/<channel> container"));
    }

    Ok(items)
}

/// Resolve an entity reference name (`amp`, `#228`, `#xE4`)
fn decode_entity(name: &str) -> String {
    let decoded = match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => name.strip_prefix('#').and_then(|num| {
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok(),
                None => num.parse().ok(),
            };
            code.and_then(char::from_u32)
        }),
    };

    match decoded {
        Some(c) => c.to_string(),
        None => format!("&{};", name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>TV-Programm Talkshows</title>
    <item>
      <title>25.12 | 20:15 | Das Erste | Maischberger</title>
      <description>&lt;p&gt;Talk&lt;/p&gt;</description>
    </item>
    <item>
      <title>heute | 23:15 | ZDF | Markus Lanz</title>
      <description><![CDATA[<p>Gäste &amp; Themen</p>]]></description>
    </item>
    <item>
      <title>morgen | 22:00 | Phoenix | Unter den Linden</title>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_parse_feed_items() {
        let raw = parse_feed(FEED).unwrap();
        assert_eq!(raw.len(), 3);

        let first = &raw[0];
        assert_eq!(first.title, "Maischberger");
        assert_eq!(first.channel.name.as_deref(), Some("Das Erste"));
        assert!(first.channel.id.is_none());
        assert_eq!(
            first.start,
            BroadcastStart::Local {
                date: "25.12".to_string(),
                time: "20:15".to_string()
            }
        );
        assert_eq!(first.description.as_deref(), Some("<p>Talk</p>"));
        assert!(first.duration.is_none());
        assert!(first.image.is_none());
    }

    #[test]
    fn test_cdata_kept_verbatim() {
        let raw = parse_feed(FEED).unwrap();
        assert_eq!(raw[1].description.as_deref(), Some("<p>Gäste &amp; Themen</p>"));
        assert!(raw[2].description.is_none());
    }

    #[test]
    fn test_entities_in_title() {
        let xml = "<rss><channel><item><title>heute | 20:15 | ARD &amp; ZDF | Talk &#228;</title></item></channel></rss>";
        let raw = parse_feed(xml).unwrap();
        assert_eq!(raw[0].channel.name.as_deref(), Some("ARD & ZDF"));
        assert_eq!(raw[0].title, "Talk ä");
    }

    #[test]
    fn test_title_with_too_few_fields_is_malformed() {
        let xml = "<rss><channel><item><title>25.12 | Maischberger</title></item></channel></rss>";
        assert!(matches!(parse_feed(xml), Err(ShowError::MalformedUpstream(_))));
    }

    #[test]
    fn test_title_with_extra_fields_is_malformed() {
        let xml = "<rss><channel><item><title>25.12 | 20:15 | ZDF | Markus Lanz | Extra</title></item></channel></rss>";
        assert!(matches!(parse_feed(xml), Err(ShowError::MalformedUpstream(_))));
    }

    #[test]
    fn test_missing_container_is_malformed() {
        let xml = "<feed><entry><title>x</title></entry></feed>";
        assert!(matches!(parse_feed(xml), Err(ShowError::MalformedUpstream(_))));
        assert!(matches!(parse_feed(""), Err(ShowError::MalformedUpstream(_))));
    }

    #[test]
    fn test_empty_channel() {
        let xml = "<rss><channel><title>leer</title></channel></rss>";
        assert!(parse_feed(xml).unwrap().is_empty());
    }

    #[test]
    fn test_decode_entity() {
        assert_eq!(decode_entity("amp"), "&");
        assert_eq!(decode_entity("#xE4"), "ä");
        assert_eq!(decode_entity("unknown"), "&unknown;");
    }
}
