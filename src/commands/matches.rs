use clap::Args;
use serde::Serialize;

use docdrift::staleness::{MatchKind, ReferenceMatcher};

use super::CmdResult;

#[derive(Args)]
pub struct MatchArgs {
    /// Reference as declared in a doc's front matter
    pub reference: String,

    /// Changed file paths to test against the reference
    #[arg(required = true)]
    pub paths: Vec<String>,
}

#[derive(Serialize)]
pub struct PathMatch {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_by: Option<MatchKind>,
}

#[derive(Serialize)]
pub struct MatchOutput {
    pub command: &'static str,
    pub reference: String,
    pub normalized: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    pub results: Vec<PathMatch>,
}

pub fn run(args: MatchArgs, _global: &super::GlobalArgs) -> CmdResult<MatchOutput> {
    let matcher = ReferenceMatcher::new(&args.reference);

    let results: Vec<PathMatch> = args
        .paths
        .into_iter()
        .map(|path| PathMatch {
            matched_by: matcher.check(&path),
            path,
        })
        .collect();
    let exit_code = if results.iter().any(|r| r.matched_by.is_some()) {
        0
    } else {
        1
    };

    Ok((
        MatchOutput {
            command: "match",
            normalized: matcher.reference().to_string(),
            pattern: matcher.glob().map(|g| g.as_regex().to_string()),
            reference: args.reference,
            results,
        },
        exit_code,
    ))
}
