//! Recent commits with their per-file diff stats.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use std::collections::HashMap;
use std::path::Path;

use super::pull_request::{self, PullRequestRef};
use super::{git, ScanOptions};
use crate::error::Result;
use crate::staleness::{timestamp, ChangedFile, RecentChange};

const FIELD_SEP: char = '\u{1f}';
const RECORD_SEP: char = '\u{1e}';
const LOG_FORMAT: &str = "--format=%H%x1f%cI%x1f%an%x1f%s%x1f%b%x1e";

/// One parsed `git log` record, before file stats are attached.
#[derive(Debug, Clone, PartialEq)]
struct LogEntry {
    sha: String,
    date: DateTime<Utc>,
    author: String,
    subject: String,
    body: String,
}

/// Commits on the configured branch inside the lookback window, newest first.
///
/// Merge commits are skipped, ignored paths are removed from each commit,
/// and commits left with no files are dropped. A commit brought in by a pull
/// request merge inherits that pull request's number and title.
pub fn recent_changes(repo: &Path, options: &ScanOptions) -> Result<Vec<RecentChange>> {
    let rev = options.branch.as_deref().unwrap_or("HEAD");
    super::validate_branch(rev)?;

    let since = cutoff(Utc::now(), options.since_days);
    let since_arg = format!("--since={}", since.to_rfc3339_opts(SecondsFormat::Secs, true));

    let stdout = git(
        repo,
        &["log", "--no-merges", &since_arg, LOG_FORMAT, "--end-of-options", rev, "--"],
        "git log",
    )?;
    let entries = parse_log(&stdout)?;
    let merged = merged_pull_requests(repo, rev, &since_arg)?;

    log_status!("scan", "{} commits in the last {} days", entries.len(), options.since_days);

    let mut changes = Vec::with_capacity(entries.len());
    for entry in entries {
        let mut files = commit_files(repo, &entry.sha)?;
        files.retain(|f| !is_ignored(&f.filename, &options.ignore_patterns));
        if files.is_empty() {
            continue;
        }

        if options.include_patches {
            for file in &mut files {
                file.patch = file_patch(repo, &entry.sha, &file.filename);
            }
        }

        let pr = pull_request::detect(&entry.subject, &entry.body)
            .or_else(|| merged.get(&entry.sha).cloned());
        changes.push(RecentChange {
            sha: entry.sha,
            date: entry.date,
            author: entry.author,
            message: full_message(&entry.subject, &entry.body),
            files,
            pr_number: pr.as_ref().map(|p| p.number),
            pr_title: pr.and_then(|p| p.title),
        });
    }

    Ok(changes)
}

/// Map each commit brought in by a pull request merge inside the window to
/// that pull request. The newest merge wins when a commit was merged twice.
fn merged_pull_requests(
    repo: &Path,
    rev: &str,
    since_arg: &str,
) -> Result<HashMap<String, PullRequestRef>> {
    let stdout = git(
        repo,
        &["log", "--merges", since_arg, LOG_FORMAT, "--end-of-options", rev, "--"],
        "git log --merges",
    )?;

    let mut linked = HashMap::new();
    for merge in parse_log(&stdout)? {
        let Some(pr) = pull_request::detect(&merge.subject, &merge.body) else {
            continue;
        };

        let range = format!("{sha}^1..{sha}^2", sha = merge.sha);
        let shas = git(repo, &["rev-list", &range], "git rev-list")?;
        for sha in shas.lines().map(str::trim).filter(|l| !l.is_empty()) {
            linked.entry(sha.to_string()).or_insert_with(|| pr.clone());
        }
    }

    Ok(linked)
}

fn cutoff(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    now - Duration::days(i64::from(days))
}

fn is_ignored(path: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|pattern| super::glob_matches(pattern, path))
}

fn full_message(subject: &str, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        subject.to_string()
    } else {
        format!("{}\n\n{}", subject, body)
    }
}

fn parse_log(stdout: &str) -> Result<Vec<LogEntry>> {
    let mut entries = Vec::new();

    for record in stdout.split(RECORD_SEP) {
        let record = record.trim_start_matches(['\n', '\r']);
        if record.trim().is_empty() {
            continue;
        }

        let mut fields = record.splitn(5, FIELD_SEP);
        let sha = fields.next().unwrap_or_default().trim().to_string();
        let raw_date = fields.next().unwrap_or_default().trim();
        let author = fields.next().unwrap_or_default().to_string();
        let subject = fields.next().unwrap_or_default().to_string();
        let body = fields.next().unwrap_or_default().trim_end().to_string();

        let date = timestamp::parse_field("date", raw_date, Some(&sha))?;
        entries.push(LogEntry {
            sha,
            date,
            author,
            subject,
            body,
        });
    }

    Ok(entries)
}

fn commit_files(repo: &Path, sha: &str) -> Result<Vec<ChangedFile>> {
    let numstat = git(
        repo,
        &["show", "--format=", "--numstat", "--no-renames", sha],
        "git show --numstat",
    )?;
    let name_status = git(
        repo,
        &["show", "--format=", "--name-status", "--no-renames", sha],
        "git show --name-status",
    )?;

    Ok(merge_file_stats(&numstat, &name_status))
}

/// Combine `--numstat` counts with `--name-status` letters, in numstat order.
fn merge_file_stats(numstat: &str, name_status: &str) -> Vec<ChangedFile> {
    let statuses: HashMap<&str, &str> = name_status
        .lines()
        .filter_map(|line| {
            let (letter, path) = line.split_once('\t')?;
            Some((path.trim(), status_label(letter)))
        })
        .collect();

    numstat
        .lines()
        .filter_map(|line| {
            let mut parts = line.splitn(3, '\t');
            let additions = parts.next()?;
            let deletions = parts.next()?;
            let filename = parts.next()?.trim();
            if filename.is_empty() {
                return None;
            }

            Some(ChangedFile {
                filename: filename.to_string(),
                status: statuses.get(filename).copied().unwrap_or("modified").to_string(),
                // binary files report "-"
                additions: additions.parse().unwrap_or(0),
                deletions: deletions.parse().unwrap_or(0),
                patch: None,
            })
        })
        .collect()
}

fn status_label(letter: &str) -> &'static str {
    match letter.chars().next() {
        Some('A') => "added",
        Some('M') => "modified",
        Some('D') => "removed",
        Some('R') => "renamed",
        Some('C') => "copied",
        _ => "changed",
    }
}

fn file_patch(repo: &Path, sha: &str, filename: &str) -> Option<String> {
    crate::utils::command::run_in_optional(
        &repo.to_string_lossy(),
        "git",
        &["show", "--format=", "--patch", "--no-renames", sha, "--", filename],
    )
}
