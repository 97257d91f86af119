use clap::Args;

use docdrift::scanner;
use docdrift::staleness::{self, parse_changes, parse_doc_references};
use docdrift::utils::resolve;
use docdrift::AnalysisResult;

use super::{analysis_exit_code, effective_config, validate_days, CmdResult};

#[derive(Args)]
pub struct CheckArgs {
    /// JSON array of recent changes (file path, or - for stdin)
    #[arg(long, value_name = "FILE")]
    pub changes: String,

    /// JSON array of doc references (file path, or - for stdin)
    #[arg(long, value_name = "FILE")]
    pub docs: String,

    /// Lookback window the changes were collected over (overrides config)
    #[arg(long)]
    pub days: Option<u32>,

    /// Explicit config file instead of ./docdrift.json
    #[arg(long, value_name = "FILE")]
    pub config: Option<String>,

    /// Exit 0 even when stale docs are found
    #[arg(long)]
    pub no_fail: bool,
}

pub fn run(args: CheckArgs, _global: &super::GlobalArgs) -> CmdResult<AnalysisResult> {
    if args.changes == "-" && args.docs == "-" {
        return Err(docdrift::Error::validation_invalid_argument(
            "input",
            "Only one of --changes and --docs can read from stdin",
            None,
            None,
        ));
    }

    let cwd = resolve::resolve_repo_path(None)?;
    let (config, _source) = effective_config(&cwd, args.config.as_deref())?;
    let scan_period_days = match args.days {
        Some(days) => validate_days(days)?,
        None => config.scan_period_days,
    };

    let changes = parse_changes(&resolve::read_input(&args.changes, "read changes")?)?;
    let docs = parse_doc_references(&resolve::read_input(&args.docs, "read docs")?)?;

    let result = staleness::analyze(&docs, &changes, scan_period_days);
    scanner::log_summary(&result);

    let exit_code = analysis_exit_code(
        result.stale_references.len(),
        config.fail_on_stale && !args.no_fail,
    );

    Ok((result, exit_code))
}
