//! Command line argument parsing for the WikiRaider CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// WikiRaider - Build wordlists from Wikipedia database dumps
#[derive(Parser, Debug, Clone)]
#[command(name = "wikiraider")]
#[command(about = "Build password-cracking wordlists from Wikipedia database dumps")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct WikiRaiderArgs {
    /// Verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode, only errors are logged (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pipeline configuration file (JSON)
    #[arg(long, value_name = "CONFIG_FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl WikiRaiderArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet { 0 } else { self.verbose + 1 }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List the wikis with a completed dump
    List(ListArgs),

    /// Download a dump and build its wordlist
    Parse(ParseArgs),
}

/// Arguments for listing dumps
#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    /// Only show the wiki with this name (e.g. "nl" or "en")
    #[arg(short, long, value_name = "NAME")]
    pub search: Option<String>,
}

/// Arguments for parsing a dump
#[derive(Parser, Debug, Clone)]
pub struct ParseArgs {
    /// Dump URL (e.g. https://dumps.wikimedia.org/nlwiki/20200301)
    #[arg(short, long, value_name = "URL")]
    pub url: String,

    /// Number of page consumer threads
    #[arg(short, long, value_name = "N")]
    pub consumers: Option<usize>,

    /// Directory for downloaded and extracted archives
    #[arg(long, value_name = "PATH")]
    pub tmp_dir: Option<PathBuf>,

    /// Root directory of the written wordlists
    #[arg(long, value_name = "PATH")]
    pub output_dir: Option<PathBuf>,

    /// Don't draw progress bars
    #[arg(long)]
    pub no_progress: bool,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_command() {
        let args = WikiRaiderArgs::try_parse_from([
            "wikiraider",
            "parse",
            "-u",
            "https://dumps.wikimedia.org/nlwiki/20200301",
            "--consumers",
            "8",
            "--tmp-dir",
            "/tmp/wiki",
            "--no-progress",
        ])
        .unwrap();

        if let Command::Parse(parse_args) = args.command {
            assert_eq!(parse_args.url, "https://dumps.wikimedia.org/nlwiki/20200301");
            assert_eq!(parse_args.consumers, Some(8));
            assert_eq!(parse_args.tmp_dir, Some(PathBuf::from("/tmp/wiki")));
            assert_eq!(parse_args.output_dir, None);
            assert!(parse_args.no_progress);
        } else {
            panic!("Expected Parse command");
        }
    }

    #[test]
    fn test_parse_requires_url() {
        assert!(WikiRaiderArgs::try_parse_from(["wikiraider", "parse"]).is_err());
    }

    #[test]
    fn test_list_command() {
        let args = WikiRaiderArgs::try_parse_from(["wikiraider", "list", "-s", "nl"]).unwrap();

        if let Command::List(list_args) = args.command {
            assert_eq!(list_args.search.as_deref(), Some("nl"));
        } else {
            panic!("Expected List command");
        }
    }

    #[test]
    fn test_verbosity_levels() {
        let args = WikiRaiderArgs::try_parse_from(["wikiraider", "list"]).unwrap();
        assert_eq!(args.verbosity(), 1);
        assert_eq!(args.output_format, OutputFormat::Human);

        let args = WikiRaiderArgs::try_parse_from(["wikiraider", "-vv", "list"]).unwrap();
        assert_eq!(args.verbosity(), 3);

        let args = WikiRaiderArgs::try_parse_from(["wikiraider", "list", "-q", "-v"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_global_options() {
        let args = WikiRaiderArgs::try_parse_from([
            "wikiraider",
            "--config",
            "wikiraider.json",
            "list",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(args.config, Some(PathBuf::from("wikiraider.json")));
        assert_eq!(args.output_format, OutputFormat::Json);
    }
}
