mod args;
mod cli;
#[cfg(feature = "tui")]
mod tui;

use args::Args;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::process;

fn main() {
    let args = Args::parse().unwrap_or_else(|e| e.exit());

    let level = match args.verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(e) = SimpleLogger::new().with_level(level).init() {
        eprintln!("Failed to set up logging: {}", e);
    }

    if let Err(e) = cli::run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
