//! Shared test helpers for `slotwise-core` integration tests.
//!
//! Provides in-memory store mocks, a recording notification sink, and
//! fixture builders so the engine tests can focus on behaviour instead of
//! boilerplate.

pub mod notify;
pub mod repositories;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use slotwise_domain::{
    Appointment, AppointmentKind, AppointmentStatus, AvailabilityRule, WaitlistEntry,
    WaitlistStatus,
};
use uuid::Uuid;

/// Parse a `YYYY-MM-DDTHH:MM:SS` timestamp.
pub fn dt(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").expect("valid test timestamp")
}

/// Parse a `YYYY-MM-DD` date.
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

/// Parse a `HH:MM` time of day.
pub fn time(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").expect("valid test time")
}

/// Bookable availability rule fixture.
pub fn rule(
    host_id: Uuid,
    day_of_week: u8,
    start: &str,
    end: &str,
    buffer_minutes: u32,
) -> AvailabilityRule {
    AvailabilityRule {
        id: Uuid::new_v4(),
        host_id,
        day_of_week,
        start_time: time(start),
        end_time: time(end),
        buffer_minutes,
        is_bookable: true,
    }
}

/// Confirmed appointment fixture.
pub fn confirmed(
    host_id: Uuid,
    start: &str,
    end: &str,
    kind: AppointmentKind,
) -> Appointment {
    Appointment {
        id: Uuid::new_v4(),
        host_id,
        workspace_id: None,
        guest_name: None,
        guest_email: None,
        title: "Fixture".to_string(),
        reason: None,
        start_time: dt(start),
        end_time: dt(end),
        kind,
        status: AppointmentStatus::Confirmed,
        created_at: dt(start),
    }
}

/// Waiting waitlist entry fixture. `created_at` drives FIFO ordering.
pub fn waiting(
    host_id: Uuid,
    guest_name: &str,
    preferred_start: &str,
    preferred_end: &str,
    created_at: &str,
) -> WaitlistEntry {
    WaitlistEntry {
        id: Uuid::new_v4(),
        host_id,
        guest_name: guest_name.to_string(),
        guest_email: format!("{}@example.com", guest_name.to_lowercase()),
        guest_reason: None,
        preferred_start: dt(preferred_start),
        preferred_end: dt(preferred_end),
        status: WaitlistStatus::Waiting,
        created_at: dt(created_at),
    }
}
