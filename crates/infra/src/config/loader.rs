//! Configuration loader
//!
//! Loads dashboard configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `SALESDESK_API_BASE_URL` is not set, falls back to a config file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `SALESDESK_API_BASE_URL`: Backend base URL (required)
//! - `SALESDESK_API_TIMEOUT_SECS`: Per-call timeout in seconds
//! - `SALESDESK_API_MAX_ATTEMPTS`: Attempts for idempotent requests
//! - `SALESDESK_HISTORY_LIMIT`: Client history page size
//! - `SALESDESK_SESSION_STORE`: `keychain`, `file` or `memory`
//! - `SALESDESK_SESSION_FILE`: Credentials file for the `file` store
//! - `SALESDESK_LOG_LEVEL`: Default tracing filter
//! - `SALESDESK_LOG_JSON`: Emit JSON log lines (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.{json,toml}` and `./salesdesk.{json,toml}`
//! 2. `./config/salesdesk.{json,toml}`
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;

use salesdesk_domain::{Config, CredentialStoreKind, Result, SalesDeskError};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables, then from a config
/// file. The result is validated before it is returned.
///
/// # Errors
/// Returns `SalesDeskError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - A value fails validation
pub fn load() -> Result<Config> {
    let config = match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            config
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)?
        }
    };

    config.validate()?;
    Ok(config)
}

/// Load configuration from environment variables
///
/// Only `SALESDESK_API_BASE_URL` is required; everything else falls back to
/// [`Config::default`].
///
/// # Errors
/// Returns `SalesDeskError::Config` if the base URL is missing or a value
/// cannot be parsed.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();

    config.api.base_url = env_var("SALESDESK_API_BASE_URL")?;
    if let Some(timeout) = env_parse::<u64>("SALESDESK_API_TIMEOUT_SECS")? {
        config.api.timeout_seconds = timeout;
    }
    if let Some(attempts) = env_parse::<usize>("SALESDESK_API_MAX_ATTEMPTS")? {
        config.api.max_attempts = attempts;
    }
    if let Some(limit) = env_parse::<usize>("SALESDESK_HISTORY_LIMIT")? {
        config.api.history_limit = limit;
    }

    if let Some(store) = env_parse::<CredentialStoreKind>("SALESDESK_SESSION_STORE")? {
        config.session.store = store;
    }
    if let Ok(path) = std::env::var("SALESDESK_SESSION_FILE") {
        config.session.file_path = Some(path);
    }

    if let Ok(level) = std::env::var("SALESDESK_LOG_LEVEL") {
        config.logging.level = level;
    }
    config.logging.json = env_bool("SALESDESK_LOG_JSON", config.logging.json);

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `SalesDeskError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(SalesDeskError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            SalesDeskError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| SalesDeskError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| SalesDeskError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| SalesDeskError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(SalesDeskError::Config(format!("Unsupported config format: {}", extension))),
    }
}

const CONFIG_FILE_NAMES: [&str; 6] = [
    "config.json",
    "config.toml",
    "salesdesk.json",
    "salesdesk.toml",
    "config/salesdesk.json",
    "config/salesdesk.toml",
];

/// Probe multiple paths for configuration files
///
/// Searches the current working directory first, then the directory of the
/// running executable.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
        }
    }

    roots
        .iter()
        .flat_map(|root| CONFIG_FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `SalesDeskError::Config` if the variable is not set or blank.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| {
            SalesDeskError::Config(format!("Missing required environment variable: {}", key))
        })
}

/// Parse an optional environment variable.
///
/// # Errors
/// Returns `SalesDeskError::Config` if the variable is set but invalid.
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| SalesDeskError::Config(format!("Invalid value for {}: {}", key, e))),
        Err(_) => Ok(None),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
