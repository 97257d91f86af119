use std::collections::HashSet;

use super::glob::ReferenceMatcher;
use super::index::ChangeIndex;
use super::types::RecentChange;

/// Find every distinct change whose file path satisfies `reference_path`.
pub fn find_matches<'a>(reference_path: &str, index: &ChangeIndex<'a>) -> Vec<&'a RecentChange> {
    find_matches_with(&ReferenceMatcher::new(reference_path), index)
}

/// Like [`find_matches`], reusing an already compiled matcher.
///
/// Results are deduplicated by `sha`, keeping the first occurrence in index
/// order.
pub fn find_matches_with<'a>(
    matcher: &ReferenceMatcher,
    index: &ChangeIndex<'a>,
) -> Vec<&'a RecentChange> {
    let mut seen: HashSet<&'a str> = HashSet::new();
    let mut found = Vec::new();

    for (path, changes) in index.iter() {
        if !matcher.matches(path) {
            continue;
        }
        for change in changes {
            if seen.insert(change.sha.as_str()) {
                found.push(*change);
            }
        }
    }

    found
}
