//! Availability & booking engine.
//!
//! Three cooperating services, layered by dependency: the slot generator
//! (leaf), the conflict checker (appointment store), and the waitlist matcher
//! (slot generator + appointment store). `BookingService` ties them together
//! behind a per-host lock so check-then-insert sequences cannot race.

pub mod booking;
pub mod conflicts;
pub mod host_lock;
pub mod ports;
pub mod slots;
pub mod waitlist;
