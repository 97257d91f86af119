use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const CONFIG_FILE: &str = "docdrift.json";

/// Repository-level configuration read from `docdrift.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocdriftConfig {
    /// Lookback window in days for "recent" commits.
    #[serde(default = "default_scan_period_days")]
    pub scan_period_days: u32,

    /// Branch or ref to scan. `None` scans `HEAD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    /// Globs selecting which tracked files are documentation.
    #[serde(default = "default_doc_patterns")]
    pub doc_patterns: Vec<String>,

    /// Globs for changed files that never make a doc stale (lockfiles, fixtures).
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    #[serde(default)]
    pub include_patches: bool,

    /// Exit non-zero when stale docs are found.
    #[serde(default = "default_fail_on_stale")]
    pub fail_on_stale: bool,
}

impl Default for DocdriftConfig {
    fn default() -> Self {
        Self {
            scan_period_days: default_scan_period_days(),
            branch: None,
            doc_patterns: default_doc_patterns(),
            ignore_patterns: Vec::new(),
            include_patches: false,
            fail_on_stale: default_fail_on_stale(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_scan_period_days() -> u32 {
    30
}

fn default_doc_patterns() -> Vec<String> {
    vec!["**/*.md".to_string()]
}

fn default_fail_on_stale() -> bool {
    true
}

// =============================================================================
// Loading functions
// =============================================================================

pub fn config_path(repo: &Path) -> PathBuf {
    repo.join(CONFIG_FILE)
}

/// Load `docdrift.json` from the repository root.
///
/// `None` when the file is missing or invalid; an invalid file is logged and
/// otherwise ignored.
pub fn load_config(repo: &Path) -> Option<DocdriftConfig> {
    let path = config_path(repo);
    if !path.exists() {
        return None;
    }

    match load_config_from_file(&path) {
        Ok(config) => Some(config),
        Err(err) => {
            log_status!("config", "Ignoring {}: {}", path.display(), err);
            None
        }
    }
}

/// Load a config file that was explicitly requested; errors are reported.
pub fn load_config_from_file(path: &Path) -> Result<DocdriftConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("read {}", path.display())))
    })?;

    let config: DocdriftConfig = serde_json::from_str(&content)
        .map_err(|e| Error::config_invalid_json(path.display().to_string(), e))?;

    validate(&config)?;
    Ok(config)
}

fn validate(config: &DocdriftConfig) -> Result<()> {
    if config.scan_period_days == 0 {
        return Err(Error::config_invalid_value(
            "scan_period_days",
            Some("0".to_string()),
            "Lookback window must be at least one day",
        ));
    }

    if let Some(branch) = config.branch.as_deref() {
        if branch.trim().is_empty() || branch.starts_with('-') {
            return Err(Error::config_invalid_value(
                "branch",
                Some(branch.to_string()),
                "Branch must be a non-empty ref that does not start with '-'",
            ));
        }
    }

    if config.doc_patterns.is_empty() {
        return Err(Error::config_invalid_value(
            "doc_patterns",
            None,
            "At least one documentation glob is required",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_nothing() {
        let dir = tempdir().unwrap();
        assert!(load_config(dir.path()).is_none());

        let config = DocdriftConfig::default();
        assert_eq!(config.scan_period_days, 30);
        assert_eq!(config.doc_patterns, vec!["**/*.md"]);
        assert!(config.fail_on_stale);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        fs::write(
            config_path(dir.path()),
            r#"{"scan_period_days": 7, "ignore_patterns": ["**/*.lock"]}"#,
        )
        .unwrap();

        let config = load_config(dir.path()).unwrap();

        assert_eq!(config.scan_period_days, 7);
        assert_eq!(config.ignore_patterns, vec!["**/*.lock"]);
        assert_eq!(config.doc_patterns, vec!["**/*.md"]);
        assert!(config.branch.is_none());
    }

    #[test]
    fn invalid_json_is_ignored_unless_explicit() {
        let dir = tempdir().unwrap();
        let path = config_path(dir.path());
        fs::write(&path, "{ not json").unwrap();

        assert!(load_config(dir.path()).is_none());

        let err = load_config_from_file(&path).unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_json");
    }

    #[test]
    fn zero_day_window_is_rejected() {
        let dir = tempdir().unwrap();
        let path = config_path(dir.path());
        fs::write(&path, r#"{"scan_period_days": 0}"#).unwrap();

        let err = load_config_from_file(&path).unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_value");
        assert_eq!(err.details["key"], "scan_period_days");
    }

    #[test]
    fn option_like_branch_is_rejected() {
        let dir = tempdir().unwrap();
        let path = config_path(dir.path());
        fs::write(&path, r#"{"branch": "--output=/tmp/owned.txt"}"#).unwrap();

        let err = load_config_from_file(&path).unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_value");
        assert_eq!(err.details["key"], "branch");

        assert!(load_config(dir.path()).is_none());
    }
}
