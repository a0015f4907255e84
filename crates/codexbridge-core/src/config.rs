//! Environment-sourced configuration
//!
//! Every knob has a default; `Config::from_env()` never fails. Unparseable
//! values fall back to the default rather than aborting startup.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "o4-mini";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_BACKOFF_BASE_MS: u64 = 500;
pub const DEFAULT_BACKOFF_FACTOR: f64 = 2.0;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct Config {
    /// Model used when a tool call doesn't name one.
    pub default_model: String,
    /// Explicit path to the codex binary; otherwise PATH is searched.
    pub codex_path: Option<PathBuf>,
    /// Prefer the CLI transport when the binary is resolvable.
    pub prefer_cli: bool,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub cache_enabled: bool,
    pub cache_ttl: Duration,
    /// Total backend attempts per request (first call included).
    pub max_retries: u32,
    pub backoff_base: Duration,
    pub backoff_factor: f64,
    /// Deadline for a single backend attempt.
    pub request_timeout: Duration,
    /// tracing filter directive, e.g. "codexbridge=debug".
    pub log_filter: String,
    /// Log directory override; defaults to ~/.codexbridge/logs.
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_model: DEFAULT_MODEL.to_string(),
            codex_path: None,
            prefer_cli: true,
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            cache_enabled: true,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_base: Duration::from_millis(DEFAULT_BACKOFF_BASE_MS),
            backoff_factor: DEFAULT_BACKOFF_FACTOR,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            log_filter: "codexbridge=info".to_string(),
            log_dir: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_model: env_string("CODEXBRIDGE_DEFAULT_MODEL", &defaults.default_model),
            codex_path: std::env::var("CODEX_PATH").ok().map(PathBuf::from),
            prefer_cli: env_bool("CODEXBRIDGE_PREFER_CLI", defaults.prefer_cli),
            openai_api_key: std::env::var("OPENAI_API_KEY").ok(),
            openai_base_url: env_string("OPENAI_BASE_URL", &defaults.openai_base_url),
            cache_enabled: env_bool("CODEXBRIDGE_CACHE_ENABLED", defaults.cache_enabled),
            cache_ttl: Duration::from_secs(env_u64(
                "CODEXBRIDGE_CACHE_TTL_SECS",
                DEFAULT_CACHE_TTL_SECS,
            )),
            max_retries: env_u64("CODEXBRIDGE_MAX_RETRIES", DEFAULT_MAX_RETRIES as u64).max(1)
                as u32,
            backoff_base: Duration::from_millis(env_u64(
                "CODEXBRIDGE_BACKOFF_BASE_MS",
                DEFAULT_BACKOFF_BASE_MS,
            )),
            backoff_factor: env_f64("CODEXBRIDGE_BACKOFF_FACTOR", DEFAULT_BACKOFF_FACTOR),
            request_timeout: Duration::from_secs(env_u64(
                "CODEXBRIDGE_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )),
            log_filter: env_string("CODEXBRIDGE_LOG", &defaults.log_filter),
            log_dir: std::env::var("CODEXBRIDGE_LOG_DIR").ok().map(PathBuf::from),
        }
    }
}

fn env_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(v) => matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_f64(key: &str, default: f64) -> f64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
