//! Runtime configuration resolved from CLI flags and the environment

use std::path::PathBuf;

use crate::api::DEFAULT_BASE_URL;

pub const API_KEY_ENV: &str = "WEATHER_API_KEY";
pub const BASE_URL_ENV: &str = "WEATHER_API_BASE_URL";
const APP_DIR: &str = "weather-screen";
const LOG_FILE: &str = "weather-screen.log";

#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub api_key: String,
    pub base_url: String,
    pub default_city: String,
    pub loading_timeout_ms: u64,
    pub data_dir: PathBuf,
    pub log_file: PathBuf,
    pub clear_stale_results: bool,
}

/// `--data-dir` if given, else the platform's local data dir, else the working directory.
pub fn resolve_data_dir(explicit: Option<&str>) -> PathBuf {
    explicit
        .map(PathBuf::from)
        .or_else(|| dirs_next::data_local_dir().map(|dir| dir.join(APP_DIR)))
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn default_log_file(data_dir: &std::path::Path) -> PathBuf {
    data_dir.join(LOG_FILE)
}

/// Explicit flag first, then the environment. Blank keys count as missing.
pub fn resolve_api_key(explicit: Option<String>) -> Option<String> {
    explicit
        .or_else(|| std::env::var(API_KEY_ENV).ok())
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
}

pub fn resolve_base_url() -> String {
    std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_data_dir_wins() {
        assert_eq!(resolve_data_dir(Some("/tmp/wx")), PathBuf::from("/tmp/wx"));
        assert_eq!(
            default_log_file(&PathBuf::from("/tmp/wx")),
            PathBuf::from("/tmp/wx/weather-screen.log")
        );
    }

    #[test]
    fn test_explicit_api_key_is_trimmed() {
        assert_eq!(resolve_api_key(Some(" abc ".into())).as_deref(), Some("abc"));
    }
}
