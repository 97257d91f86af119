//! Local git scanner producing analysis inputs.
//!
//! Reads a checkout with the `git` binary:
//! 1. Recent commits on a branch, with per-file stats and PR linkage
//! 2. Documentation files whose front matter declares `references`
//!
//! and feeds both into [`crate::staleness::analyze`].

mod changes;
mod docs;
pub mod front_matter;
pub mod pull_request;

use glob_match::glob_match;
use serde::Serialize;
use std::path::Path;
use std::process::Command;

pub use changes::recent_changes;
pub use docs::doc_references;

use crate::config::DocdriftConfig;
use crate::error::{Error, Result};
use crate::staleness::{self, AnalysisResult, DocReference, RecentChange};
use crate::utils::command;

/// What to scan and how far back.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOptions {
    pub since_days: u32,
    pub branch: Option<String>,
    pub doc_patterns: Vec<String>,
    pub ignore_patterns: Vec<String>,
    pub include_patches: bool,
}

impl From<&DocdriftConfig> for ScanOptions {
    fn from(config: &DocdriftConfig) -> Self {
        Self {
            since_days: config.scan_period_days,
            branch: config.branch.clone(),
            doc_patterns: config.doc_patterns.clone(),
            ignore_patterns: config.ignore_patterns.clone(),
            include_patches: config.include_patches,
        }
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::from(&DocdriftConfig::default())
    }
}

/// Raw scanner output, before analysis.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanInputs {
    pub changes: Vec<RecentChange>,
    pub docs: Vec<DocReference>,
}

/// Collect both analysis inputs from the repository at `repo`.
pub fn scan(repo: &Path, options: &ScanOptions) -> Result<ScanInputs> {
    ensure_git_repo(repo)?;
    if let Some(branch) = options.branch.as_deref() {
        validate_branch(branch)?;
    }

    log_status!("scan", "Scanning {}", repo.display());
    let changes = recent_changes(repo, options)?;
    let docs = doc_references(repo, options)?;

    Ok(ScanInputs { changes, docs })
}

/// Scan the repository and run the staleness analysis on the result.
pub fn analyze_repo(repo: &Path, options: &ScanOptions) -> Result<AnalysisResult> {
    let inputs = scan(repo, options)?;
    let result = staleness::analyze(&inputs.docs, &inputs.changes, options.since_days);
    log_summary(&result);
    Ok(result)
}

/// One-line stderr summary of a finished analysis.
pub fn log_summary(result: &AnalysisResult) {
    log_status!(
        "analyze",
        "{} stale of {} docs ({} references checked, {} day window)",
        result.stale_references.len(),
        result.total_docs_analyzed,
        result.total_references_checked,
        result.scan_period_days
    );
}

/// Reject a branch that git would read as an option.
pub fn validate_branch(branch: &str) -> Result<()> {
    if branch.trim().is_empty() {
        return Err(Error::validation_invalid_argument(
            "branch",
            "Branch must not be empty",
            None,
            None,
        ));
    }

    if branch.starts_with('-') {
        return Err(Error::validation_invalid_argument(
            "branch",
            format!("Branch must not start with '-': {}", branch),
            Some(branch.to_string()),
            None,
        ));
    }

    Ok(())
}

fn ensure_git_repo(repo: &Path) -> Result<()> {
    if !repo.is_dir() {
        return Err(Error::validation_invalid_argument(
            "path",
            format!("Not a directory: {}", repo.display()),
            None,
            None,
        ));
    }

    if !command::succeeded_in(&repo.to_string_lossy(), "git", &["rev-parse", "--git-dir"]) {
        return Err(Error::validation_invalid_argument(
            "path",
            format!("Not a git repository: {}", repo.display()),
            None,
            None,
        )
        .with_hint("Run docdrift inside a git checkout or pass its path"));
    }

    Ok(())
}

/// Run git in `repo`, returning trimmed stdout or a `git.command_failed` error.
fn git(repo: &Path, args: &[&str], context: &str) -> Result<String> {
    git_raw(repo, args, context).map(|stdout| stdout.trim().to_string())
}

/// Like [`git`], but stdout is returned untouched.
fn git_raw(repo: &Path, args: &[&str], context: &str) -> Result<String> {
    let output = Command::new("git")
        .args(["-c", "core.quotepath=false"])
        .args(args)
        .current_dir(repo)
        .output()
        .map_err(|e| {
            Error::git_command_failed(context, Some(repo.display().to_string()), e.to_string())
        })?;

    if !output.status.success() {
        return Err(Error::git_command_failed(
            context,
            Some(repo.display().to_string()),
            command::error_text(&output),
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// `glob_match` where a leading `**/` also matches files at the root.
fn glob_matches(pattern: &str, path: &str) -> bool {
    glob_match(pattern, path)
        || pattern
            .strip_prefix("**/")
            .is_some_and(|rest| glob_match(rest, path))
}
