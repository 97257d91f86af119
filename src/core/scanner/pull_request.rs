use regex::Regex;
use std::sync::LazyLock;

// "Add retry budget (#123)" as produced by squash merges
static SQUASH_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)\s*\(#(\d+)\)\s*$").expect("valid squash regex"));

// "Merge pull request #123 from owner/branch"
static MERGE_SUBJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^merge pull request #(\d+) from \S+").expect("valid merge regex")
});

/// Pull request a commit came from, recovered from its message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRef {
    pub number: u64,
    pub title: Option<String>,
}

/// Detect the pull request linked to a commit from its subject and body.
pub fn detect(subject: &str, body: &str) -> Option<PullRequestRef> {
    if let Some(caps) = MERGE_SUBJECT.captures(subject) {
        let number = caps[1].parse().ok()?;
        let title = body
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string);
        return Some(PullRequestRef { number, title });
    }

    let caps = SQUASH_SUFFIX.captures(subject)?;
    let number = caps[2].parse().ok()?;
    let title = caps[1].trim();
    Some(PullRequestRef {
        number,
        title: (!title.is_empty()).then(|| title.to_string()),
    })
}
