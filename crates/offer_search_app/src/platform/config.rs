use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use offer_search_core::{FilterSet, DEFAULT_PAGE_LIMIT};
use offer_search_engine::FetchSettings;
use search_logging::search_info;
use serde::Deserialize;

use super::cli::Args;

pub const API_HOST_ENV: &str = "OFFER_SEARCH_API_HOST";

/// Optional settings read from the RON config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
struct FileConfig {
    api_host: Option<String>,
    page_limit: Option<u64>,
    connect_timeout_secs: Option<u64>,
    request_timeout_secs: Option<u64>,
    max_body_bytes: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub fetch: FetchSettings,
    pub initial_filters: FilterSet,
}

/// Resolves settings with precedence: flag, then environment, then file, then defaults.
pub fn resolve(args: &Args, env_api_host: Option<String>) -> Result<AppConfig> {
    let file = load_file_config(&args.config)?;

    let mut fetch = FetchSettings::default();
    if let Some(api_host) = args.api_host.clone().or(env_api_host).or(file.api_host) {
        fetch.api_host = api_host;
    }
    if let Some(secs) = file.connect_timeout_secs {
        fetch.connect_timeout = Duration::from_secs(secs);
    }
    if let Some(secs) = file.request_timeout_secs {
        fetch.request_timeout = Duration::from_secs(secs);
    }
    if let Some(max_bytes) = file.max_body_bytes {
        fetch.max_bytes = max_bytes;
    }

    let limit = args
        .limit
        .or(file.page_limit)
        .unwrap_or(DEFAULT_PAGE_LIMIT);
    let mut initial_filters = FilterSet::new(args.value.clone())
        .with_duration(args.min_duration, args.max_duration)?
        .with_fields(args.fields.iter().cloned())
        .with_technologies(args.technologies.iter().cloned())
        .with_limit(limit)?;
    initial_filters.job_type = args.job_type;

    Ok(AppConfig {
        fetch,
        initial_filters,
    })
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(FileConfig::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read config {}", path.display()));
        }
    };
    let config = ron::from_str(&content)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    search_info!("Loaded config from {:?}", path);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn args(extra: &[&str], config: &Path) -> Args {
        let mut argv = vec!["offer-search", "--config", config.to_str().unwrap()];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    fn config_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = resolve(&args(&[], &dir.path().join("absent.ron")), None).unwrap();

        assert_eq!(config.fetch.api_host, FetchSettings::default().api_host);
        assert_eq!(config.initial_filters, FilterSet::default());
    }

    #[test]
    fn file_values_apply_and_flags_win() {
        let file = config_file(
            r#"(
                api_host: Some("http://file.example"),
                page_limit: Some(10),
                request_timeout_secs: Some(3),
            )"#,
        );

        let from_file = resolve(&args(&[], file.path()), None).unwrap();
        assert_eq!(from_file.fetch.api_host, "http://file.example");
        assert_eq!(from_file.fetch.request_timeout, Duration::from_secs(3));
        assert_eq!(from_file.initial_filters.limit(), 10);

        let from_env = resolve(
            &args(&[], file.path()),
            Some("http://env.example".to_string()),
        )
        .unwrap();
        assert_eq!(from_env.fetch.api_host, "http://env.example");

        let from_flags = resolve(
            &args(&["--api-host", "http://flag.example", "--limit", "2"], file.path()),
            Some("http://env.example".to_string()),
        )
        .unwrap();
        assert_eq!(from_flags.fetch.api_host, "http://flag.example");
        assert_eq!(from_flags.initial_filters.limit(), 2);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let file = config_file("api_host: ");
        assert!(resolve(&args(&[], file.path()), None).is_err());
    }

    #[test]
    fn invalid_duration_flags_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let argv = args(
            &["--min-duration", "6", "--max-duration", "2"],
            &dir.path().join("absent.ron"),
        );
        assert!(resolve(&argv, None).is_err());
    }
}
