use clap::Args;
use serde::Serialize;

use docdrift::config::DocdriftConfig;
use docdrift::utils::resolve;

use super::{effective_config, CmdResult, ConfigSource};

#[derive(Args)]
pub struct ConfigArgs {
    /// Repository path (defaults to the current directory)
    pub path: Option<String>,

    /// Explicit config file instead of <path>/docdrift.json
    #[arg(long, value_name = "FILE")]
    pub config: Option<String>,
}

#[derive(Serialize)]
pub struct ConfigOutput {
    pub command: &'static str,
    pub source: ConfigSource,
    pub config: DocdriftConfig,
}

pub fn run(args: ConfigArgs, _global: &super::GlobalArgs) -> CmdResult<ConfigOutput> {
    let repo = resolve::resolve_repo_path(args.path.as_deref())?;
    let (config, source) = effective_config(&repo, args.config.as_deref())?;

    Ok((
        ConfigOutput {
            command: "config.show",
            source,
            config,
        },
        0,
    ))
}
