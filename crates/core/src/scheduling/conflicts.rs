//! Conflict checker - admits or rejects a proposed appointment interval.

use std::sync::Arc;

use chrono::{Duration, NaiveDateTime, NaiveTime};
use slotwise_domain::constants::{BACK_TO_BACK_CHAIN_LIMIT, BACK_TO_BACK_MAX_GAP_MINUTES};
use slotwise_domain::{AppointmentKind, ConflictDecision, ConflictKind, Result};
use tracing::instrument;
use uuid::Uuid;

use super::ports::AppointmentRepository;

/// Decides whether a proposed interval may be placed on a host's calendar.
///
/// Checks run in fixed precedence order and the first match wins: double
/// booking, then back-to-back fatigue, then focus-block protection. The check
/// is advisory at the boundary of rescheduling: update paths pass the
/// appointment's own id as `exclude` so moving an appointment does not
/// double-book against itself.
pub struct ConflictChecker {
    appointments: Arc<dyn AppointmentRepository>,
    include_candidate_in_fatigue_chain: bool,
}

impl ConflictChecker {
    /// Create a checker with the legacy fatigue behaviour (candidate interval
    /// excluded from the chain).
    pub fn new(appointments: Arc<dyn AppointmentRepository>) -> Self {
        Self { appointments, include_candidate_in_fatigue_chain: false }
    }

    /// Opt into counting the proposed interval as part of the fatigue chain.
    ///
    /// The legacy check only sees appointments that already exist, so it
    /// catches pre-existing density but not fatigue newly introduced by the
    /// candidate itself.
    pub fn with_candidate_in_fatigue_chain(mut self, enabled: bool) -> Self {
        self.include_candidate_in_fatigue_chain = enabled;
        self
    }

    /// Check `[start, end)` for `host_id`, classifying the first violation.
    #[instrument(skip(self), fields(%host_id))]
    pub async fn check(
        &self,
        host_id: Uuid,
        start: NaiveDateTime,
        end: NaiveDateTime,
        exclude: Option<Uuid>,
    ) -> Result<ConflictDecision> {
        // 1. Double booking: any confirmed open-interval overlap. Back to
        //    back with zero gap is not an overlap by this test.
        let overlapping =
            self.appointments.list_confirmed_overlapping(host_id, start, end, exclude).await?;
        if !overlapping.is_empty() {
            return Ok(ConflictDecision::Reject(ConflictKind::DoubleBooking));
        }

        // 2. Back-to-back fatigue on the candidate's calendar day.
        let day_start = start.date().and_time(NaiveTime::MIN);
        let day_end = day_start + Duration::days(1);
        let day_appointments =
            self.appointments.list_confirmed_between(host_id, day_start, day_end).await?;

        let mut intervals: Vec<(NaiveDateTime, NaiveDateTime)> = day_appointments
            .iter()
            .filter(|a| {
                !(self.include_candidate_in_fatigue_chain && exclude == Some(a.id))
            })
            .map(|a| (a.start_time, a.end_time))
            .collect();
        if self.include_candidate_in_fatigue_chain {
            let at = intervals.partition_point(|(s, _)| *s < start);
            intervals.insert(at, (start, end));
        }
        if chain_reaches_limit(&intervals) {
            return Ok(ConflictDecision::Reject(ConflictKind::BackToBack));
        }

        // 3. Focus-block protection. The legacy check runs without the
        //    exclusion, so the clash is reachable exactly when the excluded
        //    appointment is itself the overlapping focus block.
        let focus_overlaps =
            self.appointments.list_confirmed_overlapping(host_id, start, end, None).await?;
        if focus_overlaps.iter().any(|a| a.kind == AppointmentKind::Focus) {
            return Ok(ConflictDecision::Reject(ConflictKind::FocusClash));
        }

        Ok(ConflictDecision::Admit)
    }
}

/// Walk consecutive pairs of same-day intervals (sorted by start) counting
/// gaps of at most five minutes. Three appointments chained that tightly
/// (counter hits 2) trip the fatigue policy; a wider gap resets the counter.
fn chain_reaches_limit(intervals: &[(NaiveDateTime, NaiveDateTime)]) -> bool {
    let max_gap = Duration::minutes(BACK_TO_BACK_MAX_GAP_MINUTES);
    let mut chained = 0u32;

    for pair in intervals.windows(2) {
        let gap = pair[1].0 - pair[0].1;
        if gap <= max_gap {
            chained += 1;
            if chained >= BACK_TO_BACK_CHAIN_LIMIT {
                return true;
            }
        } else {
            chained = 0;
        }
    }

    false
}
