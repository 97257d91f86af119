use serde::Serialize;
use std::path::{Path, PathBuf};

use docdrift::config::DocdriftConfig;

pub type CmdResult<T> = docdrift::Result<(T, i32)>;

pub(crate) struct GlobalArgs {}

/// Where the effective configuration came from.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ConfigSource {
    Defaults,
    File { path: String },
}

/// Resolve the configuration for a repository.
///
/// An explicit `--config` file must load cleanly; otherwise `docdrift.json`
/// at the repository root is used when present and valid.
pub(crate) fn effective_config(
    repo: &Path,
    explicit: Option<&str>,
) -> docdrift::Result<(DocdriftConfig, ConfigSource)> {
    if let Some(raw) = explicit {
        let path = PathBuf::from(shellexpand::tilde(raw).as_ref());
        let loaded = docdrift::config::load_config_from_file(&path)?;
        return Ok((
            loaded,
            ConfigSource::File {
                path: path.display().to_string(),
            },
        ));
    }

    if let Some(loaded) = docdrift::config::load_config(repo) {
        let path = docdrift::config::config_path(repo);
        return Ok((
            loaded,
            ConfigSource::File {
                path: path.display().to_string(),
            },
        ));
    }

    Ok((DocdriftConfig::default(), ConfigSource::Defaults))
}

/// Reject a zero-day lookback window from `--days`.
pub(crate) fn validate_days(days: u32) -> docdrift::Result<u32> {
    if days == 0 {
        return Err(docdrift::Error::validation_invalid_argument(
            "days",
            "Lookback window must be at least one day",
            None,
            None,
        ));
    }
    Ok(days)
}

/// Exit code for a finished analysis: 1 when stale docs were found and the
/// run is configured to fail on them.
pub(crate) fn analysis_exit_code(stale_count: usize, fail_on_stale: bool) -> i32 {
    if fail_on_stale && stale_count > 0 {
        1
    } else {
        0
    }
}

pub mod check;
pub mod config;
pub mod matches;
pub mod scan;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (docdrift::Result<serde_json::Value>, i32) {
    crate::tty::status("docdrift is working...");

    match command {
        crate::Commands::Scan(args) => dispatch!(args, global, scan),
        crate::Commands::Check(args) => dispatch!(args, global, check),
        crate::Commands::Config(args) => dispatch!(args, global, config),
        crate::Commands::Match(args) => dispatch!(args, global, matches),
    }
}
