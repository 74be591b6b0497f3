//! Domain types and models for the scheduling engine.
//!
//! All timestamps are naive local time by contract: the engine performs no
//! timezone conversion, matching the product's single-timezone model.

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::SlotwiseError;

// ============================================================================
// Appointments
// ============================================================================

/// Appointment type: what kind of calendar entry this is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentKind {
    /// Regular meeting booked by the host.
    Meeting,
    /// Protected solo work time; blocks overlapping bookings.
    Focus,
    /// Guest-initiated booking (public page or waitlist).
    External,
}

impl AppointmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Meeting => "meeting",
            Self::Focus => "focus",
            Self::External => "external",
        }
    }
}

impl std::str::FromStr for AppointmentKind {
    type Err = SlotwiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "meeting" => Ok(Self::Meeting),
            "focus" => Ok(Self::Focus),
            "external" => Ok(Self::External),
            other => {
                Err(SlotwiseError::InvalidInput(format!("unknown appointment kind: {other}")))
            }
        }
    }
}

/// Appointment lifecycle status. Cancellation is a soft delete: cancelled
/// rows stay in the store but are invisible to every engine computation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Confirmed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for AppointmentStatus {
    type Err = SlotwiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            other => {
                Err(SlotwiseError::InvalidInput(format!("unknown appointment status: {other}")))
            }
        }
    }
}

/// A booked calendar entry.
///
/// Invariant: `start_time < end_time`; `end_time` is exclusive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub host_id: Uuid,
    pub workspace_id: Option<Uuid>,
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub title: String,
    pub reason: Option<String>,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub kind: AppointmentKind,
    pub status: AppointmentStatus,
    pub created_at: NaiveDateTime,
}

impl Appointment {
    /// Open-interval overlap test: back-to-back with zero gap does not count.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.start_time < end && self.end_time > start
    }
}

/// Insert parameters for a proposed appointment. The engine assigns the id,
/// the confirmed status, and the creation timestamp on acceptance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAppointment {
    pub host_id: Uuid,
    pub workspace_id: Option<Uuid>,
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub title: String,
    pub reason: Option<String>,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub kind: AppointmentKind,
}

// ============================================================================
// Availability
// ============================================================================

/// A recurring weekly availability window for a host.
///
/// Multiple rules may exist per host per day-of-week; each is evaluated
/// independently when generating slots. Rules are replaced wholesale
/// (delete-all-then-insert) whenever a host saves availability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityRule {
    pub id: Uuid,
    pub host_id: Uuid,
    /// 0 = Monday .. 6 = Sunday.
    pub day_of_week: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// Minimum gap required after a booked appointment's end before the next
    /// slot may open. Never applied before an appointment's start.
    pub buffer_minutes: u32,
    pub is_bookable: bool,
}

/// A derived, never-persisted 30-minute candidate booking window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Slot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

// ============================================================================
// Waitlist
// ============================================================================

/// Waitlist entry lifecycle. `Expired` exists as a stored value but nothing
/// in the engine transitions an entry to it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WaitlistStatus {
    Waiting,
    Booked,
    Expired,
}

impl WaitlistStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Booked => "booked",
            Self::Expired => "expired",
        }
    }
}

impl std::str::FromStr for WaitlistStatus {
    type Err = SlotwiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "waiting" => Ok(Self::Waiting),
            "booked" => Ok(Self::Booked),
            "expired" => Ok(Self::Expired),
            other => {
                Err(SlotwiseError::InvalidInput(format!("unknown waitlist status: {other}")))
            }
        }
    }
}

/// A guest waiting for a slot inside a preferred window. Once `Booked` the
/// entry is immutable and never re-examined.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitlistEntry {
    pub id: Uuid,
    pub host_id: Uuid,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_reason: Option<String>,
    pub preferred_start: NaiveDateTime,
    pub preferred_end: NaiveDateTime,
    pub status: WaitlistStatus,
    pub created_at: NaiveDateTime,
}

// ============================================================================
// Conflict decisions
// ============================================================================

/// Rejection reasons, in check precedence order (first match wins).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    DoubleBooking,
    BackToBack,
    FocusClash,
}

impl ConflictKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DoubleBooking => "double_booking",
            Self::BackToBack => "back_to_back",
            Self::FocusClash => "focus_clash",
        }
    }
}

/// Outcome of a conflict check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictDecision {
    Admit,
    Reject(ConflictKind),
}

impl ConflictDecision {
    pub fn is_admit(&self) -> bool {
        matches!(self, Self::Admit)
    }
}

/// Wire-shaped conflict report: `{"conflict": bool, "type": "..."}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConflictReport {
    pub conflict: bool,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ConflictKind>,
}

impl From<ConflictDecision> for ConflictReport {
    fn from(decision: ConflictDecision) -> Self {
        match decision {
            ConflictDecision::Admit => Self { conflict: false, kind: None },
            ConflictDecision::Reject(kind) => Self { conflict: true, kind: Some(kind) },
        }
    }
}

/// Outcome of a booking attempt made through the booking facade.
#[derive(Debug, Clone)]
pub enum BookingOutcome {
    Booked(Appointment),
    Rejected(ConflictKind),
}

// ============================================================================
// Notifications
// ============================================================================

/// Payload delivered to the outbound webhook when a waitlist entry is booked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingNotification {
    pub guest_name: String,
    pub guest_email: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}
