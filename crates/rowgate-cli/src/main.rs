//! rowgate command-line interface.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use rowgate_cli::error::PipelineError;
use rowgate_cli::logging::{LogConfig, init_logging};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, OutputArg};
use crate::commands::{run_load, run_rules};
use crate::summary::{print_rules, print_summary};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let result = match &cli.command {
        Command::Run(args) => run_load(args).and_then(|(stats, destination)| {
            match args.output {
                OutputArg::Table => print_summary(&stats, &destination),
                OutputArg::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
            }
            Ok(())
        }),
        Command::Rules(args) => run_rules(args).and_then(|rules| {
            match args.output {
                OutputArg::Table => print_rules(&rules),
                OutputArg::Json => println!("{}", serde_json::to_string_pretty(&rules)?),
            }
            Ok(())
        }),
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error}");
            error
                .downcast_ref::<PipelineError>()
                .map_or(1, PipelineError::exit_code)
        }
    };
    std::process::exit(exit_code);
}

/// Logging config from CLI flags. An explicit `--log-level` or `-v/-q`
/// takes precedence over `RUST_LOG`.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig {
        level_filter: cli
            .log_level
            .map_or_else(|| cli.verbosity.tracing_level_filter(), LevelFilter::from),
        use_env_filter: !(cli.verbosity.is_present() || cli.log_level.is_some()),
        with_ansi,
        format: cli.log_format.into(),
        log_file: cli.log_file.clone(),
        log_data: cli.log_data,
        ..LogConfig::default()
    }
}
