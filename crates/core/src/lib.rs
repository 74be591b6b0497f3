//! # Slotwise Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The availability & booking engine (slot generation, conflict checks,
//!   waitlist reconciliation)
//! - Port/adapter interfaces (traits) for the stores and the notification sink
//! - The booking facade with per-host serialization
//!
//! ## Architecture Principles
//! - Only depends on `slotwise-domain`
//! - No database or HTTP code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod scheduling;

// Re-export specific items to avoid ambiguity
pub use scheduling::booking::BookingService;
pub use scheduling::conflicts::ConflictChecker;
pub use scheduling::host_lock::HostLocks;
pub use scheduling::ports::{
    AppointmentRepository, AvailabilityRepository, NotificationSink, WaitlistRepository,
};
pub use scheduling::slots::SlotGenerator;
pub use scheduling::waitlist::WaitlistMatcher;
