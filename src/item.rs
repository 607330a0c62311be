use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::Serialize;
use tracing::debug;

use crate::config::MarkerConfig;
use crate::document::Element;

/// One blog post read from a feed.
///
/// Only items with a parseable `pubDate` are ever constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub title: String,
    pub url: String,
    pub description: String,
    pub categories: Vec<String>,
    pub image_url: String,
    pub published: DateTime<FixedOffset>,
    /// Identifier recorded when the item was announced, if any
    pub announcement_marker: Option<String>,
}

/// JSON shape printed by the command-line tools.
#[derive(Debug, Serialize, PartialEq)]
pub struct ItemRecord<'a> {
    pub title: &'a str,
    pub url: &'a str,
    pub description: &'a str,
    pub categories: &'a [String],
    pub hashtags: String,
    pub image_url: &'a str,
    pub pub_date: String,
}

impl FeedItem {
    /// Normalize an `<item>` element. Returns `None` when the item has no
    /// usable publication timestamp.
    pub fn from_element(item: &Element, marker: &MarkerConfig) -> Option<Self> {
        let Some(raw_date) = item.child("pubDate").map(|e| e.text.as_str()) else {
            debug!("Skipping item without pubDate: {:?}", child_text(item, "title"));
            return None;
        };
        let Some(published) = parse_pub_date(raw_date) else {
            debug!("Skipping item with unparseable pubDate {:?}", raw_date);
            return None;
        };

        let categories = item
            .children_named("category")
            .filter(|c| !c.text.is_empty())
            .map(|c| c.text.clone())
            .collect();

        Some(Self {
            title: child_text(item, "title"),
            url: child_text(item, "link"),
            description: child_text(item, "description"),
            categories,
            image_url: item
                .child("enclosure")
                .and_then(|e| e.attribute("url"))
                .unwrap_or_default()
                .to_string(),
            published,
            announcement_marker: item
                .child_ns(&marker.namespace, &marker.element)
                .map(|e| e.text.clone()),
        })
    }

    pub fn hashtags(&self) -> String {
        hashtags(&self.categories)
    }

    /// Publication day in UTC.
    pub fn pub_date(&self) -> NaiveDate {
        self.published.with_timezone(&Utc).date_naive()
    }

    pub fn is_announced(&self) -> bool {
        self.announcement_marker
            .as_deref()
            .is_some_and(|marker| !marker.is_empty())
    }

    pub fn record(&self) -> ItemRecord<'_> {
        ItemRecord {
            title: &self.title,
            url: &self.url,
            description: &self.description,
            categories: &self.categories,
            hashtags: self.hashtags(),
            image_url: &self.image_url,
            pub_date: self.pub_date().format("%Y-%m-%d").to_string(),
        }
    }
}

/// `["Rust", "Open Source"]` becomes `"#Rust #OpenSource"`.
pub fn hashtags(categories: &[String]) -> String {
    categories
        .iter()
        .map(|category| format!("#{}", category.replace(' ', "")))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse an RSS `pubDate` (RFC 2822, obsolete zone names included).
///
/// The day-of-week is ignored, so a wrong weekday does not drop the post.
pub fn parse_pub_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc2822(strip_weekday(raw.trim())).ok()
}

fn strip_weekday(raw: &str) -> &str {
    match raw.split_once(',') {
        Some((day, rest)) if day.trim().chars().all(|c| c.is_ascii_alphabetic()) => rest.trim_start(),
        _ => raw,
    }
}

fn child_text(item: &Element, name: &str) -> String {
    item.child(name).map(|e| e.text.clone()).unwrap_or_default()
}
