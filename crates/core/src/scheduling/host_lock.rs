//! Per-host lock registry.
//!
//! The stores serialize nothing beyond single statements, so a conflict check
//! followed by an insert is a classic check-then-act gap. Holding a per-host
//! async mutex across the whole sequence closes the race without changing any
//! outward decision semantics. Waitlist passes take the same lock so two
//! concurrent cancellations cannot hand one freed slot to two guests.
//!
//! Entries are evicted when the last holder releases, so the registry stays
//! proportional to in-flight hosts rather than every host ever seen.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

type LockMap = DashMap<Uuid, Arc<Mutex<()>>>;

/// Lazily-populated map of host id to its serialization lock.
#[derive(Default)]
pub struct HostLocks {
    locks: Arc<LockMap>,
}

impl HostLocks {
    /// Create an empty lock registry.
    pub fn new() -> Self {
        Self { locks: Arc::new(DashMap::new()) }
    }

    /// Acquire the lock for a host, creating it on first use. The guard is
    /// owned so it can be held across await points; dropping it releases the
    /// lock and evicts the entry if nobody else holds or awaits it.
    pub async fn acquire(&self, host_id: Uuid) -> HostLockGuard {
        let lock = Arc::clone(&self.locks.entry(host_id).or_default());
        let guard = lock.lock_owned().await;
        HostLockGuard { guard: Some(guard), locks: Arc::clone(&self.locks), host_id }
    }
}

/// Guard for a held host lock. Releases on drop.
pub struct HostLockGuard {
    guard: Option<OwnedMutexGuard<()>>,
    locks: Arc<LockMap>,
    host_id: Uuid,
}

impl Drop for HostLockGuard {
    fn drop(&mut self) {
        // Release before the eviction check: a strong count of 1 then means
        // the map holds the only reference, so there is no other holder and
        // no waiter parked on this mutex.
        self.guard.take();
        self.locks.remove_if(&self.host_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}
