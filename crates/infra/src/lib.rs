//! # Slotwise Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - SQLite implementations of the appointment, availability, and waitlist
//!   stores
//! - The webhook notification sink (reqwest)
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `slotwise-core`
//! - Depends on `slotwise-domain` and `slotwise-core`
//! - Contains all "impure" code (I/O, HTTP)

pub mod config;
pub mod database;
pub mod errors;
pub mod http;
pub mod notify;

// Re-export commonly used items
pub use database::*;
pub use http::*;
pub use notify::*;
