use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;
use crate::error::{Error, Result};

/// One file touched by a single commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedFile {
    pub filename: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub additions: u32,
    #[serde(default)]
    pub deletions: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<String>,
}

fn default_status() -> String {
    "modified".to_string()
}

impl ChangedFile {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            status: default_status(),
            additions: 0,
            deletions: 0,
            patch: None,
        }
    }
}

/// One commit inside the lookback window, optionally linked to a pull request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentChange {
    pub sha: String,
    pub date: DateTime<Utc>,
    pub author: String,
    pub message: String,
    pub files: Vec<ChangedFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pr_number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pr_title: Option<String>,
}

/// Wire shape of a [`RecentChange`] before its date is validated.
#[derive(Debug, Clone, Deserialize)]
pub struct RecentChangeRecord {
    pub sha: String,
    pub date: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub files: Vec<ChangedFile>,
    #[serde(default, alias = "prNumber")]
    pub pr_number: Option<u64>,
    #[serde(default, alias = "prTitle")]
    pub pr_title: Option<String>,
}

impl RecentChange {
    pub fn new(sha: impl Into<String>, date: DateTime<Utc>, files: Vec<ChangedFile>) -> Self {
        Self {
            sha: sha.into(),
            date,
            author: String::new(),
            message: String::new(),
            files,
            pr_number: None,
            pr_title: None,
        }
    }

    pub fn from_record(record: RecentChangeRecord) -> Result<Self> {
        let date = timestamp::parse_field("date", &record.date, Some(&record.sha))?;
        Ok(Self {
            sha: record.sha,
            date,
            author: record.author,
            message: record.message,
            files: record.files,
            pr_number: record.pr_number,
            pr_title: record.pr_title,
        })
    }
}

/// A documentation file and the source paths it declares a dependency on.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocReference {
    pub doc_path: String,
    pub references: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

/// Wire shape of a [`DocReference`] before its date is validated.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocReferenceRecord {
    pub doc_path: String,
    #[serde(default)]
    pub references: Vec<String>,
    #[serde(default)]
    pub last_modified: Option<String>,
}

impl DocReference {
    pub fn new(
        doc_path: impl Into<String>,
        references: Vec<String>,
        last_modified: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            doc_path: doc_path.into(),
            references,
            last_modified,
        }
    }

    pub fn from_record(record: DocReferenceRecord) -> Result<Self> {
        let last_modified = match record.last_modified.as_deref() {
            Some(raw) => Some(timestamp::parse_field(
                "lastModified",
                raw,
                Some(&record.doc_path),
            )?),
            None => None,
        };

        Ok(Self {
            doc_path: record.doc_path,
            references: record.references,
            last_modified,
        })
    }
}

/// A reference inside a document that fell behind the changes it matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaleReference {
    pub doc_path: String,
    /// The reference string exactly as the document declared it.
    pub source_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_doc_update: Option<DateTime<Utc>>,
    pub recent_source_changes: Vec<RecentChange>,
    pub staleness_days: u64,
}

/// Final, deduplicated and sorted output of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub stale_references: Vec<StaleReference>,
    pub total_docs_analyzed: usize,
    pub total_references_checked: usize,
    pub scan_period_days: u32,
}

/// Parse a JSON array of commits, rejecting the batch on the first bad date.
pub fn parse_changes(json: &str) -> Result<Vec<RecentChange>> {
    let records: Vec<RecentChangeRecord> = serde_json::from_str(json)
        .map_err(|e| Error::validation_invalid_json(e, Some("parse changes".to_string())))?;

    records.into_iter().map(RecentChange::from_record).collect()
}

/// Parse a JSON array of doc references, rejecting the batch on the first bad date.
pub fn parse_doc_references(json: &str) -> Result<Vec<DocReference>> {
    let records: Vec<DocReferenceRecord> = serde_json::from_str(json).map_err(|e| {
        Error::validation_invalid_json(e, Some("parse doc references".to_string()))
    })?;

    records.into_iter().map(DocReference::from_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_changes_accepts_minimal_records() {
        let json = r#"[
            {"sha": "c1", "date": "2024-02-01", "files": [{"filename": "src/x.ts"}]},
            {"sha": "c2", "date": "2024-02-02T10:00:00Z", "prNumber": 12, "pr_title": "Fix x"}
        ]"#;

        let changes = parse_changes(json).unwrap();

        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].files[0].status, "modified");
        assert_eq!(changes[0].files[0].additions, 0);
        assert_eq!(changes[1].pr_number, Some(12));
        assert_eq!(changes[1].pr_title.as_deref(), Some("Fix x"));
    }

    #[test]
    fn parse_changes_rejects_bad_date() {
        let json = r#"[{"sha": "c9", "date": "not a date", "files": []}]"#;
        let err = parse_changes(json).unwrap_err();

        assert_eq!(err.code.as_str(), "validation.invalid_timestamp");
        assert_eq!(err.details["record"], "c9");
    }

    #[test]
    fn parse_changes_reports_malformed_json() {
        let err = parse_changes("{").unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_json");
    }

    #[test]
    fn parse_doc_references_keeps_missing_last_modified() {
        let json = r#"[
            {"docPath": "docs/a.md", "references": ["src/x.ts"], "lastModified": "2024-01-01"},
            {"docPath": "docs/b.md", "references": ["src"]}
        ]"#;

        let docs = parse_doc_references(json).unwrap();

        assert!(docs[0].last_modified.is_some());
        assert!(docs[1].last_modified.is_none());
    }

    #[test]
    fn parse_doc_references_rejects_bad_last_modified() {
        let json = r#"[{"docPath": "docs/a.md", "references": [], "lastModified": "2024-99-01"}]"#;
        let err = parse_doc_references(json).unwrap_err();

        assert_eq!(err.details["field"], "lastModified");
        assert_eq!(err.details["record"], "docs/a.md");
    }

    #[test]
    fn stale_reference_serializes_camel_case() {
        let stale = StaleReference {
            doc_path: "docs/a.md".to_string(),
            source_file: "src/x.ts".to_string(),
            last_doc_update: None,
            recent_source_changes: Vec::new(),
            staleness_days: 0,
        };

        let value = serde_json::to_value(&stale).unwrap();

        assert_eq!(value["docPath"], "docs/a.md");
        assert_eq!(value["sourceFile"], "src/x.ts");
        assert_eq!(value["stalenessDays"], 0);
        assert!(value.get("lastDocUpdate").is_none());
    }
}
