use chrono::{DateTime, Utc};

use super::types::RecentChange;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Whether a document is behind any of its matched changes.
///
/// A document with no known last update is always treated as stale so it
/// gets surfaced for review. Otherwise at least one change must be strictly
/// newer than the document; equal timestamps are not stale.
pub fn is_stale(last_doc_update: Option<DateTime<Utc>>, matches: &[&RecentChange]) -> bool {
    match last_doc_update {
        None => true,
        Some(updated) => matches.iter().any(|change| change.date > updated),
    }
}

/// Whole days (rounded up) between the doc's last update and its newest
/// matched change, never negative.
///
/// Returns 0 when the last update is unknown or nothing matched, so a doc
/// can be flagged by [`is_stale`] and still report zero days.
pub fn staleness_days(last_doc_update: Option<DateTime<Utc>>, matches: &[&RecentChange]) -> u64 {
    let Some(updated) = last_doc_update else {
        return 0;
    };
    let Some(newest) = matches.iter().map(|change| change.date).max() else {
        return 0;
    };

    let millis = (newest - updated).num_milliseconds();
    if millis <= 0 {
        return 0;
    }

    // ceil for positive values
    ((millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY) as u64
}
