//! Mock repository implementations for testing
//!
//! In-memory mocks for the engine's store ports, enabling deterministic
//! tests without database dependencies. Ordering contracts match the SQLite
//! implementations: appointments by start time, waitlist FIFO by creation
//! time, rules by start time.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use slotwise_domain::{
    Appointment, AppointmentStatus, AvailabilityRule, Result as DomainResult, SlotwiseError,
    WaitlistEntry, WaitlistStatus,
};
use slotwise_core::scheduling::ports::{
    AppointmentRepository, AvailabilityRepository, WaitlistRepository,
};
use uuid::Uuid;

/// In-memory mock for `AppointmentRepository`.
#[derive(Default, Clone)]
pub struct InMemoryAppointmentRepository {
    appointments: Arc<Mutex<Vec<Appointment>>>,
}

impl InMemoryAppointmentRepository {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience helper for seeding a single appointment.
    pub fn with_appointment(self, appointment: Appointment) -> Self {
        self.appointments.lock().expect("mock lock").push(appointment);
        self
    }

    /// Snapshot of every stored appointment, cancelled included.
    pub fn all(&self) -> Vec<Appointment> {
        self.appointments.lock().expect("mock lock").clone()
    }
}

#[async_trait]
impl AppointmentRepository for InMemoryAppointmentRepository {
    async fn list_confirmed_between(
        &self,
        host_id: Uuid,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> DomainResult<Vec<Appointment>> {
        let mut found: Vec<Appointment> = self
            .appointments
            .lock()
            .expect("mock lock")
            .iter()
            .filter(|a| {
                a.host_id == host_id
                    && a.status == AppointmentStatus::Confirmed
                    && a.start_time >= start
                    && a.start_time < end
            })
            .cloned()
            .collect();
        found.sort_by_key(|a| (a.start_time, a.id));
        Ok(found)
    }

    async fn list_confirmed_overlapping(
        &self,
        host_id: Uuid,
        start: NaiveDateTime,
        end: NaiveDateTime,
        exclude: Option<Uuid>,
    ) -> DomainResult<Vec<Appointment>> {
        let mut found: Vec<Appointment> = self
            .appointments
            .lock()
            .expect("mock lock")
            .iter()
            .filter(|a| {
                a.host_id == host_id
                    && a.status == AppointmentStatus::Confirmed
                    && a.overlaps(start, end)
                    && exclude != Some(a.id)
            })
            .cloned()
            .collect();
        found.sort_by_key(|a| (a.start_time, a.id));
        Ok(found)
    }

    async fn insert(&self, appointment: &Appointment) -> DomainResult<()> {
        self.appointments.lock().expect("mock lock").push(appointment.clone());
        Ok(())
    }

    async fn update_times(
        &self,
        id: Uuid,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> DomainResult<()> {
        let mut appointments = self.appointments.lock().expect("mock lock");
        let appointment = appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| SlotwiseError::NotFound(format!("appointment {id}")))?;
        appointment.start_time = start;
        appointment.end_time = end;
        Ok(())
    }

    async fn set_status(&self, id: Uuid, status: AppointmentStatus) -> DomainResult<()> {
        let mut appointments = self.appointments.lock().expect("mock lock");
        let appointment = appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| SlotwiseError::NotFound(format!("appointment {id}")))?;
        appointment.status = status;
        Ok(())
    }

    async fn find(&self, id: Uuid) -> DomainResult<Option<Appointment>> {
        Ok(self.appointments.lock().expect("mock lock").iter().find(|a| a.id == id).cloned())
    }
}

/// In-memory mock for `AvailabilityRepository`.
#[derive(Default, Clone)]
pub struct InMemoryAvailabilityRepository {
    rules: Arc<Mutex<Vec<AvailabilityRule>>>,
}

impl InMemoryAvailabilityRepository {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience helper for seeding a single rule.
    pub fn with_rule(self, rule: AvailabilityRule) -> Self {
        self.rules.lock().expect("mock lock").push(rule);
        self
    }
}

#[async_trait]
impl AvailabilityRepository for InMemoryAvailabilityRepository {
    async fn list_bookable(
        &self,
        host_id: Uuid,
        day_of_week: u8,
    ) -> DomainResult<Vec<AvailabilityRule>> {
        let mut found: Vec<AvailabilityRule> = self
            .rules
            .lock()
            .expect("mock lock")
            .iter()
            .filter(|r| r.host_id == host_id && r.day_of_week == day_of_week && r.is_bookable)
            .cloned()
            .collect();
        found.sort_by_key(|r| (r.start_time, r.id));
        Ok(found)
    }

    async fn list_for_host(&self, host_id: Uuid) -> DomainResult<Vec<AvailabilityRule>> {
        Ok(self
            .rules
            .lock()
            .expect("mock lock")
            .iter()
            .filter(|r| r.host_id == host_id)
            .cloned()
            .collect())
    }

    async fn replace_for_host(
        &self,
        host_id: Uuid,
        rules: Vec<AvailabilityRule>,
    ) -> DomainResult<()> {
        let mut stored = self.rules.lock().expect("mock lock");
        stored.retain(|r| r.host_id != host_id);
        stored.extend(rules);
        Ok(())
    }
}

/// In-memory mock for `WaitlistRepository`.
#[derive(Default, Clone)]
pub struct InMemoryWaitlistRepository {
    entries: Arc<Mutex<Vec<WaitlistEntry>>>,
}

impl InMemoryWaitlistRepository {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience helper for seeding a single entry.
    pub fn with_entry(self, entry: WaitlistEntry) -> Self {
        self.entries.lock().expect("mock lock").push(entry);
        self
    }

    /// Snapshot of every stored entry.
    pub fn all(&self) -> Vec<WaitlistEntry> {
        self.entries.lock().expect("mock lock").clone()
    }
}

#[async_trait]
impl WaitlistRepository for InMemoryWaitlistRepository {
    async fn list_waiting(&self, host_id: Uuid) -> DomainResult<Vec<WaitlistEntry>> {
        let mut found: Vec<WaitlistEntry> = self
            .entries
            .lock()
            .expect("mock lock")
            .iter()
            .filter(|e| e.host_id == host_id && e.status == WaitlistStatus::Waiting)
            .cloned()
            .collect();
        found.sort_by_key(|e| (e.created_at, e.id));
        Ok(found)
    }

    async fn insert(&self, entry: &WaitlistEntry) -> DomainResult<()> {
        self.entries.lock().expect("mock lock").push(entry.clone());
        Ok(())
    }

    async fn set_status(&self, id: Uuid, status: WaitlistStatus) -> DomainResult<()> {
        let mut entries = self.entries.lock().expect("mock lock");
        let entry = entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| SlotwiseError::NotFound(format!("waitlist entry {id}")))?;
        entry.status = status;
        Ok(())
    }
}
