use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use rowgate_cli::error::PipelineError;
use rowgate_cli::pipeline::{RunConfig, run};
use rowgate_ingest::{LoadOptions, Source};
use rowgate_model::{RuleSet, RunStats};
use rowgate_sink::Destination;

use crate::cli::{RulesArgs, RunArgs};

/// Source argument that selects stdin.
const STDIN_SOURCE: &str = "-";

pub fn run_load(args: &RunArgs) -> Result<(RunStats, Destination)> {
    let rules = load_rules(args.rules.as_deref())?;
    let source = read_source(&args.source)?;
    let destination = Destination::new(&args.database, &args.table);
    let config = RunConfig::new(source, destination.clone())
        .with_rules(rules)
        .with_load_options(LoadOptions::default().with_max_file_size(args.max_file_size))
        .with_dry_run(args.dry_run);
    let stats = run(&config)?;
    Ok((stats, destination))
}

pub fn run_rules(args: &RulesArgs) -> Result<RuleSet> {
    load_rules(args.rules.as_deref())
}

fn load_rules(path: Option<&Path>) -> Result<RuleSet> {
    match path {
        Some(path) => Ok(RuleSet::from_json_path(path).map_err(PipelineError::from)?),
        None => Ok(RuleSet::default()),
    }
}

fn read_source(path: &Path) -> Result<Source> {
    if path.as_os_str() != STDIN_SOURCE {
        return Ok(Source::Path(path.to_path_buf()));
    }
    let mut bytes = Vec::new();
    std::io::stdin()
        .lock()
        .read_to_end(&mut bytes)
        .context("read input from stdin")?;
    Ok(Source::Bytes(bytes))
}
