//! WikiRaider CLI binary.

use std::io::Write;
use std::process;

use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

use wikiraider::cli::args::*;
use wikiraider::cli::commands::*;

fn main() {
    let args = WikiRaiderArgs::parse();

    let log_level = match args.verbosity() {
        0 => LevelFilter::Error, // Quiet mode
        1 => LevelFilter::Info,  // Default
        2 => LevelFilter::Debug, // Verbose
        _ => LevelFilter::Trace, // Very verbose (-vv)
    };

    Builder::new()
        .filter_level(log_level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
