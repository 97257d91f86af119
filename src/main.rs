use clap::{Parser, Subcommand};

use commands::GlobalArgs;

mod commands;
mod output;
mod tty;

use commands::{check, config, matches, scan};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "docdrift")]
#[command(version = VERSION)]
#[command(about = "Find documentation that fell behind the code it references")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a git checkout for stale documentation
    Scan(scan::ScanArgs),
    /// Analyze pre-collected changes and doc references from JSON
    Check(check::CheckArgs),
    /// Show the effective configuration
    Config(config::ConfigArgs),
    /// Test how a reference matches changed file paths
    Match(matches::MatchArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let global = GlobalArgs {};

    let (json_result, exit_code) = commands::run_json(cli.command, &global);

    if let Err(err) = output::print_json_result(json_result) {
        docdrift::log_status!("output", "{}", err.message);
        return std::process::ExitCode::from(exit_code_to_u8(1));
    }

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
