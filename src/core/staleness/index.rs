use std::collections::BTreeMap;

use super::types::RecentChange;

/// Lookup from a changed file path to every change that touched it.
///
/// Keys are the raw `ChangedFile::filename` values; the index borrows the
/// changes it was built from.
#[derive(Debug, Default)]
pub struct ChangeIndex<'a> {
    by_file: BTreeMap<&'a str, Vec<&'a RecentChange>>,
}

impl<'a> ChangeIndex<'a> {
    pub fn build(changes: &'a [RecentChange]) -> Self {
        let mut by_file: BTreeMap<&'a str, Vec<&'a RecentChange>> = BTreeMap::new();

        for change in changes {
            for file in &change.files {
                let entry = by_file.entry(file.filename.as_str()).or_default();
                // A commit listing the same file twice still counts once.
                // Changes are visited in order, so a repeat is always the last entry.
                if !entry.last().is_some_and(|last| std::ptr::eq(*last, change)) {
                    entry.push(change);
                }
            }
        }

        Self { by_file }
    }

    pub fn get(&self, path: &str) -> Option<&[&'a RecentChange]> {
        self.by_file.get(path).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &[&'a RecentChange])> + '_ {
        self.by_file.iter().map(|(path, changes)| (*path, changes.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.by_file.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_file.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::staleness::types::ChangedFile;
    use chrono::{TimeZone, Utc};

    fn change(sha: &str, files: &[&str]) -> RecentChange {
        RecentChange::new(
            sha,
            Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
            files.iter().map(|f| ChangedFile::new(*f)).collect(),
        )
    }

    #[test]
    fn indexes_every_file_of_every_change() {
        let changes = vec![
            change("c1", &["src/a.rs", "src/b.rs"]),
            change("c2", &["src/b.rs"]),
        ];
        let index = ChangeIndex::build(&changes);

        assert_eq!(index.len(), 2);
        assert_eq!(index.get("src/a.rs").unwrap().len(), 1);

        let b: Vec<&str> = index
            .get("src/b.rs")
            .unwrap()
            .iter()
            .map(|c| c.sha.as_str())
            .collect();
        assert_eq!(b, vec!["c1", "c2"]);
    }

    #[test]
    fn same_change_listed_once_per_key() {
        let changes = vec![change("c1", &["src/a.rs", "src/a.rs"])];
        let index = ChangeIndex::build(&changes);

        assert_eq!(index.get("src/a.rs").unwrap().len(), 1);
    }

    #[test]
    fn repeated_file_between_other_files_counts_once() {
        let changes = vec![
            change("c1", &["src/a.rs", "src/b.rs", "src/a.rs"]),
            change("c2", &["src/a.rs"]),
            change("c3", &["src/a.rs", "src/a.rs"]),
        ];
        let index = ChangeIndex::build(&changes);

        let a: Vec<&str> = index
            .get("src/a.rs")
            .unwrap()
            .iter()
            .map(|c| c.sha.as_str())
            .collect();
        assert_eq!(a, vec!["c1", "c2", "c3"]);
    }

    #[test]
    fn keys_are_not_normalized() {
        let changes = vec![change("c1", &["/src//a.rs"])];
        let index = ChangeIndex::build(&changes);

        assert!(index.get("src/a.rs").is_none());
        assert!(index.get("/src//a.rs").is_some());
    }

    #[test]
    fn empty_input_builds_empty_index() {
        let index = ChangeIndex::build(&[]);
        assert!(index.is_empty());
        assert_eq!(index.iter().count(), 0);
    }
}
