//! Waitlist matcher - opportunistically fills freed time from the waitlist.

use std::sync::Arc;

use chrono::Local;
use slotwise_domain::{
    Appointment, AppointmentKind, AppointmentStatus, BookingNotification, Result, WaitlistEntry,
    WaitlistStatus,
};
use tracing::{instrument, warn};
use uuid::Uuid;

use super::ports::{AppointmentRepository, NotificationSink, WaitlistRepository};
use super::slots::SlotGenerator;

/// Matches pending waitlist entries against freshly available slots,
/// typically after a cancellation or reschedule freed time.
///
/// Entries are processed first-come-first-served and slots are regenerated
/// per entry, so a booking made earlier in a pass is visible to every later
/// entry: processing order decides who wins a contested slot.
pub struct WaitlistMatcher {
    waitlist: Arc<dyn WaitlistRepository>,
    appointments: Arc<dyn AppointmentRepository>,
    slots: Arc<SlotGenerator>,
    notifier: Arc<dyn NotificationSink>,
}

impl WaitlistMatcher {
    /// Create a matcher over the given stores and notification sink.
    pub fn new(
        waitlist: Arc<dyn WaitlistRepository>,
        appointments: Arc<dyn AppointmentRepository>,
        slots: Arc<SlotGenerator>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self { waitlist, appointments, slots, notifier }
    }

    /// Run one reconciliation pass for a host, returning the guest names that
    /// were booked.
    ///
    /// Each waiting entry gets a fresh slot computation for its preferred
    /// date; the first slot fully contained in the preferred window is booked
    /// as a confirmed external appointment and the entry becomes `Booked`,
    /// never to be re-examined. Entries without a fitting slot stay waiting.
    #[instrument(skip(self), fields(%host_id))]
    pub async fn reconcile(&self, host_id: Uuid) -> Result<Vec<String>> {
        let waiting = self.waitlist.list_waiting(host_id).await?;
        let mut booked = Vec::new();

        for entry in waiting {
            let slots = self.slots.generate(host_id, entry.preferred_start.date()).await?;
            let fitting = slots
                .into_iter()
                .find(|s| s.start >= entry.preferred_start && s.end <= entry.preferred_end);
            let Some(slot) = fitting else {
                continue;
            };

            let appointment = appointment_for(&entry, slot.start, slot.end);
            self.appointments.insert(&appointment).await?;
            self.waitlist.set_status(entry.id, WaitlistStatus::Booked).await?;

            // Best-effort delivery: the booking is already committed, so a
            // failed or slow webhook is logged and dropped, never retried.
            let notification = BookingNotification {
                guest_name: entry.guest_name.clone(),
                guest_email: entry.guest_email.clone(),
                start_time: slot.start,
                end_time: slot.end,
            };
            if let Err(err) = self.notifier.notify_booked(notification).await {
                warn!(error = %err, guest = %entry.guest_name, "booking notification failed");
            }

            booked.push(entry.guest_name);
        }

        Ok(booked)
    }
}

fn appointment_for(
    entry: &WaitlistEntry,
    start: chrono::NaiveDateTime,
    end: chrono::NaiveDateTime,
) -> Appointment {
    Appointment {
        id: Uuid::new_v4(),
        host_id: entry.host_id,
        workspace_id: None,
        guest_name: Some(entry.guest_name.clone()),
        guest_email: Some(entry.guest_email.clone()),
        title: format!("Meeting with {}", entry.guest_name),
        reason: entry.guest_reason.clone(),
        start_time: start,
        end_time: end,
        kind: AppointmentKind::External,
        status: AppointmentStatus::Confirmed,
        created_at: Local::now().naive_local(),
    }
}
