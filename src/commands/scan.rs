use clap::Args;
use serde::Serialize;

use docdrift::scanner::{self, ScanInputs, ScanOptions};
use docdrift::utils::resolve;
use docdrift::AnalysisResult;

use super::{analysis_exit_code, effective_config, validate_days, CmdResult, ConfigSource};

#[derive(Args)]
pub struct ScanArgs {
    /// Repository path (defaults to the current directory)
    pub path: Option<String>,

    /// Lookback window in days (overrides config)
    #[arg(long)]
    pub days: Option<u32>,

    /// Branch or ref to scan (defaults to HEAD)
    #[arg(long)]
    pub branch: Option<String>,

    /// Explicit config file instead of <path>/docdrift.json
    #[arg(long, value_name = "FILE")]
    pub config: Option<String>,

    /// Attach per-file patches to every change
    #[arg(long)]
    pub patches: bool,

    /// Print the collected changes and docs without analyzing them
    #[arg(long)]
    pub inputs_only: bool,

    /// Exit 0 even when stale docs are found
    #[arg(long)]
    pub no_fail: bool,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum ScanOutput {
    #[serde(rename = "scan")]
    Analysis {
        path: String,
        config: ConfigSource,
        #[serde(flatten)]
        result: AnalysisResult,
    },

    #[serde(rename = "scan.inputs")]
    Inputs {
        path: String,
        config: ConfigSource,
        #[serde(flatten)]
        inputs: ScanInputs,
    },
}

pub fn run(args: ScanArgs, _global: &super::GlobalArgs) -> CmdResult<ScanOutput> {
    let repo = resolve::resolve_repo_path(args.path.as_deref())?;
    let (mut config, source) = effective_config(&repo, args.config.as_deref())?;

    if let Some(days) = args.days {
        config.scan_period_days = validate_days(days)?;
    }
    if let Some(branch) = args.branch {
        scanner::validate_branch(&branch)?;
        config.branch = Some(branch);
    }
    if args.patches {
        config.include_patches = true;
    }

    let options = ScanOptions::from(&config);
    let path = repo.display().to_string();

    if args.inputs_only {
        let inputs = scanner::scan(&repo, &options)?;
        return Ok((
            ScanOutput::Inputs {
                path,
                config: source,
                inputs,
            },
            0,
        ));
    }

    let result = scanner::analyze_repo(&repo, &options)?;
    let exit_code = analysis_exit_code(
        result.stale_references.len(),
        config.fail_on_stale && !args.no_fail,
    );

    Ok((
        ScanOutput::Analysis {
            path,
            config: source,
            result,
        },
        exit_code,
    ))
}
