//! Reference-to-path matching.
//!
//! A reference accepts a changed path through four checks, tried in order:
//! exact, glob, directory prefix, suffix. Later checks are more permissive,
//! so the order is part of the contract.

use regex::Regex;
use serde::Serialize;

use super::path::normalize;

/// Which check accepted a changed path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    Glob,
    DirectoryPrefix,
    Suffix,
}

/// A compiled `*` / `**` pattern.
///
/// `**` matches across separators, a single `*` stays inside one segment,
/// every other character is literal. The pattern is anchored at both ends.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    regex: Regex,
}

impl GlobPattern {
    pub fn compile(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(&glob_to_regex(pattern)).map(|regex| Self { regex })
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    pub fn as_regex(&self) -> &str {
        self.regex.as_str()
    }
}

fn glob_to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut literal = String::new();
    let mut chars = pattern.chars().peekable();

    out.push('^');
    while let Some(c) = chars.next() {
        if c != '*' {
            literal.push(c);
            continue;
        }

        out.push_str(&regex::escape(&literal));
        literal.clear();

        if chars.peek() == Some(&'*') {
            chars.next();
            out.push_str(".*");
        } else {
            out.push_str("[^/]*");
        }
    }
    out.push_str(&regex::escape(&literal));
    out.push('$');

    out
}

/// One declared reference, normalized and (when it has wildcards) compiled.
#[derive(Debug, Clone)]
pub struct ReferenceMatcher {
    reference: String,
    glob: Option<GlobPattern>,
}

impl ReferenceMatcher {
    pub fn new(reference: &str) -> Self {
        let reference = normalize(reference);
        // An uncompilable pattern only disables the glob check.
        let glob = if reference.contains('*') {
            GlobPattern::compile(&reference).ok()
        } else {
            None
        };

        Self { reference, glob }
    }

    /// The normalized reference.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn glob(&self) -> Option<&GlobPattern> {
        self.glob.as_ref()
    }

    /// Return the first check that accepts `changed_path`.
    pub fn check(&self, changed_path: &str) -> Option<MatchKind> {
        if self.reference == changed_path {
            return Some(MatchKind::Exact);
        }

        if let Some(glob) = &self.glob {
            if glob.is_match(changed_path) {
                return Some(MatchKind::Glob);
            }
        }

        if changed_path
            .strip_prefix(self.reference.as_str())
            .is_some_and(|rest| rest.starts_with('/'))
        {
            return Some(MatchKind::DirectoryPrefix);
        }

        if changed_path.ends_with(self.reference.as_str()) {
            return Some(MatchKind::Suffix);
        }

        None
    }

    pub fn matches(&self, changed_path: &str) -> bool {
        self.check(changed_path).is_some()
    }
}

/// Whether `changed_path` satisfies `reference_path`.
pub fn matches(reference_path: &str, changed_path: &str) -> bool {
    ReferenceMatcher::new(reference_path).matches(changed_path)
}
