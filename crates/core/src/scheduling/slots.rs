//! Slot generator - turns availability rules plus booked appointments into
//! concrete bookable windows.

use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use slotwise_domain::constants::SLOT_LENGTH_MINUTES;
use slotwise_domain::{Appointment, Result, Slot};
use tracing::instrument;
use uuid::Uuid;

use super::ports::{AppointmentRepository, AvailabilityRepository};

/// Generates the ordered list of free, bookable 30-minute windows for a host
/// on a given calendar date.
///
/// This is a pure function of current store state: results are immediately
/// stale once anything is written elsewhere, and nothing is cached.
pub struct SlotGenerator {
    availability: Arc<dyn AvailabilityRepository>,
    appointments: Arc<dyn AppointmentRepository>,
}

impl SlotGenerator {
    /// Create a new slot generator over the given stores.
    pub fn new(
        availability: Arc<dyn AvailabilityRepository>,
        appointments: Arc<dyn AppointmentRepository>,
    ) -> Self {
        Self { availability, appointments }
    }

    /// Produce every free slot for `host_id` on `date`, in rule order and
    /// chronological within each rule.
    ///
    /// Rules are evaluated independently and never merged: overlapping rules
    /// can yield duplicate or overlapping slots, which is accepted behaviour.
    /// A host with no bookable rules for the weekday gets an empty list, not
    /// an error.
    #[instrument(skip(self), fields(%host_id, %date))]
    pub async fn generate(&self, host_id: Uuid, date: NaiveDate) -> Result<Vec<Slot>> {
        let day_of_week = date.weekday().num_days_from_monday() as u8;
        let rules = self.availability.list_bookable(host_id, day_of_week).await?;
        if rules.is_empty() {
            return Ok(Vec::new());
        }

        let day_start = date.and_time(NaiveTime::MIN);
        let day_end = day_start + Duration::days(1);
        let existing =
            self.appointments.list_confirmed_between(host_id, day_start, day_end).await?;

        let slot_len = Duration::minutes(SLOT_LENGTH_MINUTES);
        let mut slots = Vec::new();

        for rule in &rules {
            // An inverted or zero-length rule window yields nothing here.
            let window_end = date.and_time(rule.end_time);
            let buffer = Duration::minutes(i64::from(rule.buffer_minutes));
            let mut current = date.and_time(rule.start_time);

            // No partial trailing slot: the window must hold the full 30 minutes.
            while current + slot_len <= window_end {
                let slot_end = current + slot_len;
                if is_free(&existing, current, slot_end, buffer) {
                    slots.push(Slot { start: current, end: slot_end });
                }
                current += slot_len;
            }
        }

        Ok(slots)
    }
}

/// A candidate window is free iff, against every appointment, it either ends
/// at or before the appointment starts, or begins at or after the appointment
/// ends plus the rule's buffer. The buffer applies only after an
/// appointment's end, never before its start.
fn is_free(
    existing: &[Appointment],
    start: chrono::NaiveDateTime,
    end: chrono::NaiveDateTime,
    buffer: Duration,
) -> bool {
    existing.iter().all(|a| end <= a.start_time || start >= a.end_time + buffer)
}
