//! Port interfaces for the booking engine
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations. All reads are filtered to
//! `confirmed` appointments unless stated otherwise; cancelled rows are
//! soft-deleted and must never surface through these methods.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use slotwise_domain::{
    Appointment, AppointmentStatus, AvailabilityRule, BookingNotification, Result, WaitlistEntry,
    WaitlistStatus,
};
use uuid::Uuid;

/// Trait for reading and writing appointment records.
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Confirmed appointments for a host whose start falls within
    /// `[start, end)`, ordered by start time ascending (id as tiebreak).
    async fn list_confirmed_between(
        &self,
        host_id: Uuid,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Appointment>>;

    /// Confirmed appointments for a host overlapping `[start, end)` by the
    /// open-interval test (`existing.start < end AND existing.end > start`).
    /// `exclude` skips one appointment id, used when re-checking an
    /// appointment that is being rescheduled in place.
    async fn list_confirmed_overlapping(
        &self,
        host_id: Uuid,
        start: NaiveDateTime,
        end: NaiveDateTime,
        exclude: Option<Uuid>,
    ) -> Result<Vec<Appointment>>;

    /// Insert a new appointment record.
    async fn insert(&self, appointment: &Appointment) -> Result<()>;

    /// Move an appointment to a new interval.
    async fn update_times(
        &self,
        id: Uuid,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<()>;

    /// Flip an appointment's status. Cancellation goes through here; rows are
    /// never deleted.
    async fn set_status(&self, id: Uuid, status: AppointmentStatus) -> Result<()>;

    /// Look up a single appointment regardless of status.
    async fn find(&self, id: Uuid) -> Result<Option<Appointment>>;
}

/// Trait for reading and replacing availability rules.
#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    /// Bookable rules for a host on a given day-of-week (0 = Monday),
    /// ordered by start time ascending (id as tiebreak) so slot output is
    /// deterministic across runs.
    async fn list_bookable(&self, host_id: Uuid, day_of_week: u8)
        -> Result<Vec<AvailabilityRule>>;

    /// All rules for a host, bookable or not.
    async fn list_for_host(&self, host_id: Uuid) -> Result<Vec<AvailabilityRule>>;

    /// Replace every rule the host owns with the provided set. The swap is
    /// atomic: readers see either the old set or the new one.
    async fn replace_for_host(&self, host_id: Uuid, rules: Vec<AvailabilityRule>) -> Result<()>;
}

/// Trait for reading and updating waitlist entries.
#[async_trait]
pub trait WaitlistRepository: Send + Sync {
    /// Waiting entries for a host, ordered by creation time ascending (id as
    /// tiebreak). First-come-first-served is a contract of this method, not
    /// an accident of store iteration.
    async fn list_waiting(&self, host_id: Uuid) -> Result<Vec<WaitlistEntry>>;

    /// Add a guest to the waitlist.
    async fn insert(&self, entry: &WaitlistEntry) -> Result<()>;

    /// Transition an entry's status.
    async fn set_status(&self, id: Uuid, status: WaitlistStatus) -> Result<()>;
}

/// Trait for the outbound booking notification sink.
///
/// Implementations must bound the delivery attempt with a short timeout.
/// Callers treat delivery as best-effort: errors are logged and dropped,
/// never retried, and never abort the booking they follow.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver a booked-slot notification.
    async fn notify_booked(&self, notification: BookingNotification) -> Result<()>;
}
