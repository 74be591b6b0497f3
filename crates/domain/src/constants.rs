//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Slot generation
pub const SLOT_LENGTH_MINUTES: i64 = 30;

// Back-to-back fatigue policy: reject once this many consecutive gaps of at
// most BACK_TO_BACK_MAX_GAP_MINUTES have been chained.
pub const BACK_TO_BACK_MAX_GAP_MINUTES: i64 = 5;
pub const BACK_TO_BACK_CHAIN_LIMIT: u32 = 2;

// Outbound notification configuration
pub const DEFAULT_NOTIFY_TIMEOUT_SECS: u64 = 3;

// Database configuration
pub const DEFAULT_DB_POOL_SIZE: u32 = 4;
