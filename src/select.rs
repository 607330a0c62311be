//! Post selection: every unannounced post of a given day, or one random
//! post old enough to be worth re-sharing.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::item::FeedItem;

/// Parse a `YYYY-MM-DD` target date. Non-canonical spellings such as
/// `2024-1-5` are rejected.
pub fn parse_target_date(raw: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    (date.format("%Y-%m-%d").to_string() == raw).then_some(date)
}

/// Items published on `target` (UTC day) that have not been announced yet.
pub fn select_by_date(items: &[FeedItem], target: NaiveDate) -> Vec<&FeedItem> {
    items
        .iter()
        .filter(|item| item.pub_date() == target && !item.is_announced())
        .collect()
}

/// `now - exclude_days`, saturating at the representable range.
pub fn cutoff_instant(now: DateTime<Utc>, exclude_days: i64) -> DateTime<Utc> {
    TimeDelta::try_days(exclude_days)
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(if exclude_days > 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        })
}

/// Items published at or before `cutoff`.
pub fn age_eligible(items: &[FeedItem], cutoff: DateTime<Utc>) -> Vec<&FeedItem> {
    items.iter().filter(|item| item.published <= cutoff).collect()
}

/// Drop excluded URLs, unless that would leave nothing to choose from.
pub fn apply_exclusions<'a>(
    eligible: Vec<&'a FeedItem>,
    excluded: &HashSet<String>,
) -> Vec<&'a FeedItem> {
    if excluded.is_empty() {
        return eligible;
    }

    let remaining: Vec<&FeedItem> = eligible
        .iter()
        .copied()
        .filter(|item| !excluded.contains(&item.url))
        .collect();

    if remaining.is_empty() {
        debug!(
            "All {} eligible posts are excluded, using the full list",
            eligible.len()
        );
        eligible
    } else {
        debug!("{} of {} eligible posts remain after exclusion", remaining.len(), eligible.len());
        remaining
    }
}

/// Pick one post older than `exclude_days`, avoiding `excluded` URLs when
/// possible. `None` means no post is old enough.
pub fn select_random<'a, R: Rng + ?Sized>(
    items: &'a [FeedItem],
    exclude_days: i64,
    excluded: &HashSet<String>,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Option<&'a FeedItem> {
    let cutoff = cutoff_instant(now, exclude_days);
    let eligible = age_eligible(items, cutoff);
    if eligible.is_empty() {
        debug!("No posts published before {}", cutoff);
        return None;
    }

    apply_exclusions(eligible, excluded).choose(rng).copied()
}

/// Parse the JSON array of URLs passed on the command line. Anything else
/// is reported and treated as "no exclusions".
pub fn parse_exclusions(raw: &str) -> HashSet<String> {
    if raw.is_empty() {
        return HashSet::new();
    }

    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(urls) => urls.into_iter().collect(),
        Err(e) => {
            warn!("Could not parse exclude-urls JSON: {}", e);
            HashSet::new()
        }
    }
}
