use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use offer_search_core::JobType;

pub const DEFAULT_CONFIG_PATH: &str = "offer_search.ron";

#[derive(Debug, Parser)]
#[command(name = "offer-search")]
#[command(about = "Browse job and internship offers from the terminal")]
pub struct Args {
    /// Base URL of the offers API; overrides the config file and OFFER_SEARCH_API_HOST.
    #[arg(long)]
    pub api_host: Option<String>,
    /// RON config file; a missing file means defaults.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
    /// Offers per page.
    #[arg(long)]
    pub limit: Option<u64>,
    /// Initial free-text search.
    #[arg(long, default_value = "")]
    pub value: String,
    #[arg(long)]
    pub job_type: Option<JobType>,
    /// Minimum job duration in months.
    #[arg(long)]
    pub min_duration: Option<u32>,
    /// Maximum job duration in months.
    #[arg(long)]
    pub max_duration: Option<u32>,
    #[arg(long = "field")]
    pub fields: Vec<String>,
    #[arg(long = "tech")]
    pub technologies: Vec<String>,
    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    pub log: LogTarget,
    /// Log file used by `--log file` and `--log both`.
    #[arg(long, default_value = search_logging::LOG_FILENAME)]
    pub log_file: PathBuf,
    /// Log debug output.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
}
