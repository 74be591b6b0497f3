//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DB_POOL_SIZE, DEFAULT_NOTIFY_TIMEOUT_SECS};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub notifications: NotificationConfig,
    pub engine: EngineConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    pub pool_size: u32,
}

/// Outbound booking notification configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Webhook endpoint for booking notifications. `None` disables delivery.
    pub webhook_url: Option<String>,
    pub timeout_secs: u64,
}

/// Scheduling engine tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// When true, the back-to-back fatigue check counts the proposed interval
    /// as part of the chain instead of only pre-existing appointments. The
    /// legacy behaviour (false) only catches fatigue that already exists.
    pub include_candidate_in_fatigue_chain: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                path: "slotwise.db".to_string(),
                pool_size: DEFAULT_DB_POOL_SIZE,
            },
            notifications: NotificationConfig {
                webhook_url: None,
                timeout_secs: DEFAULT_NOTIFY_TIMEOUT_SECS,
            },
            engine: EngineConfig { include_candidate_in_fatigue_chain: false },
        }
    }
}
