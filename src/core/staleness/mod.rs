//! Stale documentation detection.
//!
//! Given the documents that declare source references and the commits in a
//! lookback window, decide which documents fell behind:
//!
//! 1. Index every commit by the files it touched
//! 2. Match each declared reference against the index (exact, glob,
//!    directory prefix, suffix)
//! 3. Flag the reference when a matched commit is newer than the document
//! 4. Keep the most-stale finding per document, most stale first
//!
//! Everything here is pure: no I/O, no shared state between runs.

mod aggregate;
mod evaluate;
mod glob;
mod index;
mod matcher;
mod path;
pub mod timestamp;
mod types;

use std::collections::HashMap;

pub use aggregate::{dedupe_by_doc, sort_by_staleness};
pub use evaluate::{is_stale, staleness_days};
pub use glob::{matches, GlobPattern, MatchKind, ReferenceMatcher};
pub use index::ChangeIndex;
pub use matcher::{find_matches, find_matches_with};
pub use path::normalize;
pub use types::{
    parse_changes, parse_doc_references, AnalysisResult, ChangedFile, DocReference,
    DocReferenceRecord, RecentChange, RecentChangeRecord, StaleReference,
};

/// Run a full analysis over already-fetched inputs.
///
/// `scan_period_days` is the caller's lookback window, reported back as-is.
pub fn analyze(
    docs: &[DocReference],
    changes: &[RecentChange],
    scan_period_days: u32,
) -> AnalysisResult {
    let index = ChangeIndex::build(changes);
    // Compiled matchers live for this run only.
    let mut matchers: HashMap<&str, ReferenceMatcher> = HashMap::new();
    let mut total_references_checked = 0usize;
    let mut found = Vec::new();

    for doc in docs {
        for reference in &doc.references {
            total_references_checked += 1;

            let matcher = matchers
                .entry(reference.as_str())
                .or_insert_with(|| ReferenceMatcher::new(reference));
            let matched = find_matches_with(matcher, &index);

            if matched.is_empty() || !is_stale(doc.last_modified, &matched) {
                continue;
            }

            found.push(StaleReference {
                doc_path: doc.doc_path.clone(),
                source_file: reference.clone(),
                last_doc_update: doc.last_modified,
                staleness_days: staleness_days(doc.last_modified, &matched),
                recent_source_changes: matched.into_iter().cloned().collect(),
            });
        }
    }

    let mut stale_references = dedupe_by_doc(found);
    sort_by_staleness(&mut stale_references);

    AnalysisResult {
        stale_references,
        total_docs_analyzed: docs.len(),
        total_references_checked,
        scan_period_days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn date(value: &str) -> DateTime<Utc> {
        timestamp::parse(value).unwrap()
    }

    fn doc(path: &str, refs: &[&str], last_modified: Option<&str>) -> DocReference {
        DocReference::new(
            path,
            refs.iter().map(|r| r.to_string()).collect(),
            last_modified.map(date),
        )
    }

    fn change(sha: &str, when: &str, files: &[&str]) -> RecentChange {
        RecentChange::new(
            sha,
            date(when),
            files.iter().map(|f| ChangedFile::new(*f)).collect(),
        )
    }

    #[test]
    fn counts_every_reference_even_without_matches() {
        let docs = vec![
            doc("docs/a.md", &["src/x.ts", "src/nothing.ts"], Some("2024-01-01")),
            doc("docs/b.md", &["lib"], None),
        ];
        let changes = vec![change("c1", "2024-02-01", &["src/x.ts"])];

        let result = analyze(&docs, &changes, 30);

        assert_eq!(result.total_docs_analyzed, 2);
        assert_eq!(result.total_references_checked, 3);
        assert_eq!(result.scan_period_days, 30);
        assert_eq!(result.stale_references.len(), 1);
    }

    #[test]
    fn source_file_is_the_declared_reference() {
        let docs = vec![doc("docs/a.md", &["/utils//foo.ts"], Some("2024-01-01"))];
        let changes = vec![change("c1", "2024-01-03", &["packages/a/utils/foo.ts"])];

        let result = analyze(&docs, &changes, 7);

        assert_eq!(result.stale_references[0].source_file, "/utils//foo.ts");
        assert_eq!(result.stale_references[0].staleness_days, 2);
    }

    #[test]
    fn keeps_one_finding_per_doc_sorted_by_days() {
        let docs = vec![
            doc("docs/a.md", &["src/x.ts", "src/y.ts"], Some("2024-01-01")),
            doc("docs/b.md", &["src"], Some("2024-01-20")),
        ];
        let changes = vec![
            change("c1", "2024-01-05", &["src/x.ts"]),
            change("c2", "2024-02-01", &["src/y.ts"]),
        ];

        let result = analyze(&docs, &changes, 60);
        let refs = &result.stale_references;

        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].doc_path, "docs/a.md");
        assert_eq!(refs[0].source_file, "src/y.ts");
        assert_eq!(refs[0].staleness_days, 31);
        assert_eq!(refs[1].doc_path, "docs/b.md");
        assert_eq!(refs[1].staleness_days, 12);
        assert!(refs.windows(2).all(|w| w[0].staleness_days >= w[1].staleness_days));
    }

    #[test]
    fn recent_source_changes_are_unique_by_sha() {
        let docs = vec![doc("docs/a.md", &["src"], Some("2024-01-01"))];
        let changes = vec![
            change("c1", "2024-01-02", &["src/a.ts", "src/b.ts"]),
            change("c2", "2024-01-03", &["src/b.ts"]),
        ];

        let result = analyze(&docs, &changes, 30);
        let mut shas: Vec<&str> = result.stale_references[0]
            .recent_source_changes
            .iter()
            .map(|c| c.sha.as_str())
            .collect();
        shas.sort();

        assert_eq!(shas, vec!["c1", "c2"]);
    }

    #[test]
    fn empty_inputs_are_valid() {
        let result = analyze(&[], &[], 14);
        assert!(result.stale_references.is_empty());
        assert_eq!(result.total_docs_analyzed, 0);
        assert_eq!(result.total_references_checked, 0);

        let docs = vec![doc("docs/a.md", &["src/x.ts"], None)];
        let result = analyze(&docs, &[], 14);
        assert!(result.stale_references.is_empty());
        assert_eq!(result.total_references_checked, 1);
    }
}
