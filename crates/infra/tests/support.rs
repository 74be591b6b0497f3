use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use slotwise_domain::{
    Appointment, AppointmentKind, AppointmentStatus, AvailabilityRule, WaitlistEntry,
    WaitlistStatus,
};
use slotwise_infra::DbManager;
use tempfile::TempDir;
use uuid::Uuid;

/// Temporary database wrapper that keeps the underlying file alive for the
/// duration of a test run.
pub struct TestDatabase {
    pub manager: Arc<DbManager>,
    _temp_dir: TempDir,
}

impl TestDatabase {
    /// Create a new temporary database with the schema applied.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let db_path = temp_dir.path().join("test.db");

        let manager = DbManager::new(&db_path, 4).expect("db manager should be created");
        manager.run_migrations().expect("migrations should apply");

        Self { manager: Arc::new(manager), _temp_dir: temp_dir }
    }
}

impl Default for TestDatabase {
    fn default() -> Self {
        Self::new()
    }
}

pub fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .expect("valid date")
        .and_hms_opt(h, mi, 0)
        .expect("valid time")
}

pub fn time(h: u32, mi: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, mi, 0).expect("valid time")
}

pub fn confirmed(host_id: Uuid, start: NaiveDateTime, end: NaiveDateTime) -> Appointment {
    Appointment {
        id: Uuid::new_v4(),
        host_id,
        workspace_id: None,
        guest_name: None,
        guest_email: None,
        title: "Sync".to_string(),
        reason: None,
        start_time: start,
        end_time: end,
        kind: AppointmentKind::Meeting,
        status: AppointmentStatus::Confirmed,
        created_at: start,
    }
}

pub fn rule(
    host_id: Uuid,
    day_of_week: u8,
    start: NaiveTime,
    end: NaiveTime,
    buffer_minutes: u32,
) -> AvailabilityRule {
    AvailabilityRule {
        id: Uuid::new_v4(),
        host_id,
        day_of_week,
        start_time: start,
        end_time: end,
        buffer_minutes,
        is_bookable: true,
    }
}

pub fn waiting(
    host_id: Uuid,
    guest_name: &str,
    window: (NaiveDateTime, NaiveDateTime),
    created_at: NaiveDateTime,
) -> WaitlistEntry {
    WaitlistEntry {
        id: Uuid::new_v4(),
        host_id,
        guest_name: guest_name.to_string(),
        guest_email: format!("{}@example.com", guest_name.to_lowercase()),
        guest_reason: None,
        preferred_start: window.0,
        preferred_end: window.1,
        status: WaitlistStatus::Waiting,
        created_at,
    }
}
