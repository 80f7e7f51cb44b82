//! Command implementations for the WikiRaider CLI.

use std::sync::Arc;

use log::debug;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::dump::{HttpDumpClient, list_dumps};
use crate::error::Result;
use crate::pipeline::{PipelineConfig, PipelineDriver};

/// Execute a CLI command.
pub fn execute_command(args: WikiRaiderArgs) -> Result<()> {
    let config = load_config(&args)?;
    match &args.command {
        Command::List(list_args) => list(list_args, config, &args),
        Command::Parse(parse_args) => parse(parse_args, config, &args),
    }
}

/// The configuration file if one was given, otherwise the defaults.
fn load_config(args: &WikiRaiderArgs) -> Result<PipelineConfig> {
    match &args.config {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            PipelineConfig::from_file(path)
        }
        None => Ok(PipelineConfig::default()),
    }
}

/// Apply command line overrides on top of the loaded configuration.
fn apply_overrides(mut config: PipelineConfig, args: &ParseArgs) -> PipelineConfig {
    if let Some(consumers) = args.consumers {
        config = config.with_consumer_amount(consumers);
    }
    if let Some(tmp_dir) = &args.tmp_dir {
        config = config.with_tmp_dir(tmp_dir);
    }
    if let Some(output_dir) = &args.output_dir {
        config = config.with_output_dir(output_dir);
    }
    if args.no_progress {
        config = config.with_progress(false);
    }
    config
}

/// List completed dumps.
fn list(args: &ListArgs, config: PipelineConfig, cli_args: &WikiRaiderArgs) -> Result<()> {
    let client = HttpDumpClient::new()?;
    let dumps = list_dumps(&client, &config.cdn_url, args.search.as_deref())?;

    output_result(
        "Completed dumps",
        &DumpListResult {
            search: args.search.clone(),
            dumps,
        },
        cli_args,
    )
}

/// Build the wordlist of one dump.
fn parse(args: &ParseArgs, config: PipelineConfig, cli_args: &WikiRaiderArgs) -> Result<()> {
    let config = apply_overrides(config, args);
    let client = Arc::new(HttpDumpClient::new()?);
    let summary = PipelineDriver::new(config, client).run(&args.url)?;

    output_result("Wordlist finished", &summary, cli_args)
}
