//! Logging setup for the terminal app.
//!
//! Logs go to `./offer_search.log` unless `--log` or `--log-file` say otherwise.

use log::LevelFilter;
use search_logging::LogDestination;

use super::cli::{Args, LogTarget};

pub fn initialize(args: &Args) {
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    search_logging::initialize_at(destination(args.log), level, &args.log_file);
}

fn destination(target: LogTarget) -> LogDestination {
    match target {
        LogTarget::Terminal => LogDestination::Terminal,
        LogTarget::File => LogDestination::File,
        LogTarget::Both => LogDestination::Both,
    }
}
