//! Booking facade - the engine surface consumed by the HTTP layer.

use std::sync::Arc;

use chrono::{Local, NaiveDate, NaiveDateTime};
use slotwise_domain::{
    Appointment, AppointmentStatus, BookingOutcome, ConflictDecision, EngineConfig,
    NewAppointment, Result, Slot, SlotwiseError,
};
use tracing::instrument;
use uuid::Uuid;

use super::conflicts::ConflictChecker;
use super::host_lock::HostLocks;
use super::ports::{
    AppointmentRepository, AvailabilityRepository, NotificationSink, WaitlistRepository,
};
use super::slots::SlotGenerator;
use super::waitlist::WaitlistMatcher;

/// Ties the three engine services together behind per-host serialization.
///
/// Every mutating operation (book, reschedule, cancel, reconcile) holds the
/// host's lock across its whole read-check-write sequence. Cancellation and
/// rescheduling trigger a waitlist pass before releasing the lock, so the
/// freed time is either re-booked or genuinely free by the time anyone else
/// observes it.
pub struct BookingService {
    appointments: Arc<dyn AppointmentRepository>,
    slots: Arc<SlotGenerator>,
    conflicts: ConflictChecker,
    waitlist: WaitlistMatcher,
    locks: HostLocks,
}

impl BookingService {
    /// Wire up the engine over the given stores and notification sink.
    pub fn new(
        appointments: Arc<dyn AppointmentRepository>,
        availability: Arc<dyn AvailabilityRepository>,
        waitlist: Arc<dyn WaitlistRepository>,
        notifier: Arc<dyn NotificationSink>,
        engine: &EngineConfig,
    ) -> Self {
        let slots = Arc::new(SlotGenerator::new(availability, Arc::clone(&appointments)));
        let conflicts = ConflictChecker::new(Arc::clone(&appointments))
            .with_candidate_in_fatigue_chain(engine.include_candidate_in_fatigue_chain);
        let matcher = WaitlistMatcher::new(
            waitlist,
            Arc::clone(&appointments),
            Arc::clone(&slots),
            notifier,
        );

        Self { appointments, slots, conflicts, waitlist: matcher, locks: HostLocks::new() }
    }

    /// Free bookable slots for a host on a date. Pure read; results are
    /// immediately stale once anything is written.
    pub async fn generate_slots(&self, host_id: Uuid, date: NaiveDate) -> Result<Vec<Slot>> {
        self.slots.generate(host_id, date).await
    }

    /// Advisory conflict check, without taking the host lock. Booking paths
    /// re-run the check under the lock before committing.
    pub async fn check_conflicts(
        &self,
        host_id: Uuid,
        start: NaiveDateTime,
        end: NaiveDateTime,
        exclude: Option<Uuid>,
    ) -> Result<ConflictDecision> {
        self.conflicts.check(host_id, start, end, exclude).await
    }

    /// Place a new appointment if scheduling policy admits it.
    #[instrument(skip(self, new), fields(host_id = %new.host_id))]
    pub async fn book(&self, new: NewAppointment) -> Result<BookingOutcome> {
        validate_interval(new.start_time, new.end_time)?;

        let _guard = self.locks.acquire(new.host_id).await;
        match self.conflicts.check(new.host_id, new.start_time, new.end_time, None).await? {
            ConflictDecision::Reject(kind) => Ok(BookingOutcome::Rejected(kind)),
            ConflictDecision::Admit => {
                let appointment = confirm(new);
                self.appointments.insert(&appointment).await?;
                Ok(BookingOutcome::Booked(appointment))
            }
        }
    }

    /// Move an existing appointment to a new interval, re-checking policy
    /// with the appointment's own id excluded. A successful move frees the
    /// old window, so a waitlist pass runs before the lock is released.
    #[instrument(skip(self))]
    pub async fn reschedule(
        &self,
        id: Uuid,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<BookingOutcome> {
        validate_interval(start, end)?;

        let mut appointment = self
            .appointments
            .find(id)
            .await?
            .ok_or_else(|| SlotwiseError::NotFound(format!("appointment {id}")))?;

        let _guard = self.locks.acquire(appointment.host_id).await;
        match self.conflicts.check(appointment.host_id, start, end, Some(id)).await? {
            ConflictDecision::Reject(kind) => Ok(BookingOutcome::Rejected(kind)),
            ConflictDecision::Admit => {
                self.appointments.update_times(id, start, end).await?;
                appointment.start_time = start;
                appointment.end_time = end;
                self.waitlist.reconcile(appointment.host_id).await?;
                Ok(BookingOutcome::Booked(appointment))
            }
        }
    }

    /// Soft-cancel an appointment and fill the freed time from the waitlist.
    /// Returns the guest names booked by the reconciliation pass.
    #[instrument(skip(self))]
    pub async fn cancel(&self, id: Uuid) -> Result<Vec<String>> {
        let appointment = self
            .appointments
            .find(id)
            .await?
            .ok_or_else(|| SlotwiseError::NotFound(format!("appointment {id}")))?;

        let _guard = self.locks.acquire(appointment.host_id).await;
        self.appointments.set_status(id, AppointmentStatus::Cancelled).await?;
        self.waitlist.reconcile(appointment.host_id).await
    }

    /// Run a waitlist pass for a host under its lock.
    pub async fn reconcile_waitlist(&self, host_id: Uuid) -> Result<Vec<String>> {
        let _guard = self.locks.acquire(host_id).await;
        self.waitlist.reconcile(host_id).await
    }
}

fn validate_interval(start: NaiveDateTime, end: NaiveDateTime) -> Result<()> {
    if start >= end {
        return Err(SlotwiseError::InvalidInput(
            "appointment start must precede its end".to_string(),
        ));
    }
    Ok(())
}

fn confirm(new: NewAppointment) -> Appointment {
    Appointment {
        id: Uuid::new_v4(),
        host_id: new.host_id,
        workspace_id: new.workspace_id,
        guest_name: new.guest_name,
        guest_email: new.guest_email,
        title: new.title,
        reason: new.reason,
        start_time: new.start_time,
        end_time: new.end_time,
        kind: new.kind,
        status: AppointmentStatus::Confirmed,
        created_at: Local::now().naive_local(),
    }
}
