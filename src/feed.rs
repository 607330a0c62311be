use std::path::Path;

use tracing::{debug, warn};

use crate::config::MarkerConfig;
use crate::document::{Document, FeedError};
use crate::item::FeedItem;

/// Normalize every dated `<item>` of the document's channel, in document order.
pub fn items_from_document(
    doc: &Document,
    marker: &MarkerConfig,
) -> Result<Vec<FeedItem>, FeedError> {
    let channel = doc.channel()?;
    let items: Vec<FeedItem> = channel
        .children_named("item")
        .filter_map(|item| FeedItem::from_element(item, marker))
        .collect();

    debug!("Normalized {} items", items.len());
    Ok(items)
}

/// Load the items of the feed at `path`.
///
/// A document that cannot be read or parsed, or that has no `<channel>`,
/// yields no items. The cause is logged and never returned.
pub fn load_items<P: AsRef<Path>>(path: P, marker: &MarkerConfig) -> Vec<FeedItem> {
    let path = path.as_ref();
    let result = Document::open(path).and_then(|doc| items_from_document(&doc, marker));
    match result {
        Ok(items) => items,
        Err(e) => {
            warn!("Ignoring feed {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Same as [`load_items`] for a feed already held in memory.
pub fn parse_items(xml: &str, marker: &MarkerConfig) -> Vec<FeedItem> {
    match Document::parse(xml).and_then(|doc| items_from_document(&doc, marker)) {
        Ok(items) => items,
        Err(e) => {
            warn!("Ignoring feed: {}", e);
            Vec::new()
        }
    }
}
