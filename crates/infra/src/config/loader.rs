//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `SLOTWISE_DB_PATH`: Database file path (required)
//! - `SLOTWISE_DB_POOL_SIZE`: Connection pool size
//! - `SLOTWISE_WEBHOOK_URL`: Booking notification endpoint (unset disables
//!   delivery)
//! - `SLOTWISE_NOTIFY_TIMEOUT_SECS`: Notification delivery timeout
//! - `SLOTWISE_FATIGUE_INCLUDE_CANDIDATE`: Count the proposed interval in the
//!   back-to-back chain (true/false)
//!
//! ## File Locations
//! The loader probes `config.{json,toml}` and `slotwise.{json,toml}` in the
//! working directory, its two parents, and next to the executable.

use std::path::{Path, PathBuf};

use slotwise_domain::{
    Config, DatabaseConfig, EngineConfig, NotificationConfig, Result, SlotwiseError,
};
use slotwise_domain::constants::{DEFAULT_DB_POOL_SIZE, DEFAULT_NOTIFY_TIMEOUT_SECS};

/// Load configuration with automatic fallback strategy
///
/// Reads a `.env` file if one exists, then attempts to load from environment
/// variables. If any required variables are missing, falls back to loading
/// from a config file.
///
/// # Errors
/// Returns `SlotwiseError::Config` if configuration cannot be loaded from
/// either source, or if a file is malformed.
pub fn load() -> Result<Config> {
    dotenvy::dotenv().ok();

    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// `SLOTWISE_DB_PATH` is required; everything else falls back to defaults.
///
/// # Errors
/// Returns `SlotwiseError::Config` if the database path is missing or any
/// value fails to parse.
pub fn load_from_env() -> Result<Config> {
    let db_path = env_var("SLOTWISE_DB_PATH")?;
    let db_pool_size = match std::env::var("SLOTWISE_DB_POOL_SIZE") {
        Ok(s) => s
            .parse::<u32>()
            .map_err(|e| SlotwiseError::Config(format!("Invalid pool size: {}", e)))?,
        Err(_) => DEFAULT_DB_POOL_SIZE,
    };

    let webhook_url = std::env::var("SLOTWISE_WEBHOOK_URL").ok().filter(|s| !s.is_empty());
    let timeout_secs = match std::env::var("SLOTWISE_NOTIFY_TIMEOUT_SECS") {
        Ok(s) => s
            .parse::<u64>()
            .map_err(|e| SlotwiseError::Config(format!("Invalid notify timeout: {}", e)))?,
        Err(_) => DEFAULT_NOTIFY_TIMEOUT_SECS,
    };

    let include_candidate = env_bool("SLOTWISE_FATIGUE_INCLUDE_CANDIDATE", false);

    Ok(Config {
        database: DatabaseConfig { path: db_path, pool_size: db_pool_size },
        notifications: NotificationConfig { webhook_url, timeout_secs },
        engine: EngineConfig { include_candidate_in_fatigue_chain: include_candidate },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `SlotwiseError::Config` if no file is found or parsing fails.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(SlotwiseError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            SlotwiseError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| SlotwiseError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content, detecting format by extension.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| SlotwiseError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| SlotwiseError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(SlotwiseError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("config.json"),
            cwd.join("config.toml"),
            cwd.join("slotwise.json"),
            cwd.join("slotwise.toml"),
            cwd.join("../config.json"),
            cwd.join("../config.toml"),
            cwd.join("../../config.json"),
            cwd.join("../../config.toml"),
        ]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![
                exe_dir.join("config.json"),
                exe_dir.join("config.toml"),
                exe_dir.join("slotwise.json"),
                exe_dir.join("slotwise.toml"),
            ]);
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        SlotwiseError::Config(format!("Missing required environment variable: {}", key))
    })
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
