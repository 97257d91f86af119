//! Documentation files that declare source references.
//!
//! Without a branch, docs come from the working tree (tracked and unignored
//! files) and their dates from `HEAD`. With a branch, both come from that
//! branch's tree and history.

use std::path::Path;

use super::{front_matter, git, git_raw, ScanOptions};
use crate::error::Result;
use crate::staleness::{timestamp, DocReference};
use crate::utils::{command, io};

/// Every documentation file with a non-empty `references` list in its front
/// matter, sorted by path.
pub fn doc_references(repo: &Path, options: &ScanOptions) -> Result<Vec<DocReference>> {
    let branch = options.branch.as_deref();
    if let Some(branch) = branch {
        super::validate_branch(branch)?;
    }

    let candidates = list_doc_files(repo, branch, &options.doc_patterns)?;
    let mut docs = Vec::new();

    for doc_path in candidates {
        let content = read_doc(repo, branch, &doc_path)?;
        let references = match front_matter::parse_references(&content) {
            Ok(refs) => refs,
            Err(err) => {
                log_status!("scan", "Skipping {}: invalid front matter ({})", doc_path, err);
                continue;
            }
        };
        if references.is_empty() {
            continue;
        }

        let last_modified = last_commit_date(repo, branch, &doc_path)?;
        docs.push(DocReference {
            doc_path,
            references,
            last_modified,
        });
    }

    log_status!("scan", "{} docs declare references", docs.len());
    Ok(docs)
}

fn list_doc_files(repo: &Path, branch: Option<&str>, patterns: &[String]) -> Result<Vec<String>> {
    let stdout = match branch {
        Some(rev) => git(
            repo,
            &["ls-tree", "-r", "--name-only", "--end-of-options", rev],
            "git ls-tree",
        )?,
        None => git(
            repo,
            &["ls-files", "--cached", "--others", "--exclude-standard"],
            "git ls-files",
        )?,
    };

    let mut files: Vec<String> = stdout
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .filter(|path| patterns.iter().any(|p| super::glob_matches(p, path)))
        .map(String::from)
        .collect();
    files.sort();
    files.dedup();
    Ok(files)
}

fn read_doc(repo: &Path, branch: Option<&str>, doc_path: &str) -> Result<String> {
    match branch {
        Some(rev) => {
            let object = format!("{}:{}", rev, doc_path);
            git_raw(repo, &["show", &object], "git show")
        }
        None => io::read_file(&repo.join(doc_path), "read doc"),
    }
}

/// Committer date of the newest commit touching `doc_path`; `None` when the
/// file has never been committed.
fn last_commit_date(
    repo: &Path,
    branch: Option<&str>,
    doc_path: &str,
) -> Result<Option<chrono::DateTime<chrono::Utc>>> {
    let rev = branch.unwrap_or("HEAD");
    let Some(raw) = command::run_in_optional(
        &repo.to_string_lossy(),
        "git",
        &["log", "-1", "--format=%cI", "--end-of-options", rev, "--", doc_path],
    ) else {
        return Ok(None);
    };

    timestamp::parse_field("lastModified", &raw, Some(doc_path)).map(Some)
}
