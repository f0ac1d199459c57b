/*!
 * Lock-Free Store Statistics
 * Atomic counters updated on every store operation, readable without touching the table lock
 */

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time copy of the store counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StatsSnapshot {
    pub admitted: u64,
    pub rejected: u64,
    pub evicted: u64,
    pub lock_timeouts: u64,
    pub killed: u64,
}

/// Atomic store statistics
///
/// # Performance
/// - Cache-line aligned to prevent false sharing
/// - Relaxed ordering, counters are independent of each other
#[repr(C, align(64))]
#[derive(Debug, Default)]
pub struct StoreStats {
    admitted: AtomicU64,
    rejected: AtomicU64,
    evicted: AtomicU64,
    lock_timeouts: AtomicU64,
    killed: AtomicU64,
}

impl StoreStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn inc_admitted(&self) {
        self.admitted.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_evicted(&self) {
        self.evicted.fetch_add(1, Ordering::Relaxed);
    }

    /// Lock timeouts also count as rejections
    #[inline(always)]
    pub fn inc_lock_timeouts(&self) {
        self.lock_timeouts.fetch_add(1, Ordering::Relaxed);
        self.inc_rejected();
    }

    #[inline(always)]
    pub fn add_killed(&self, count: usize) {
        self.killed.fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Get snapshot of current stats
    ///
    /// # Note
    /// Values may not be perfectly consistent with each other under concurrent updates,
    /// but each individual value is accurate.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            admitted: self.admitted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            evicted: self.evicted.load(Ordering::Relaxed),
            lock_timeouts: self.lock_timeouts.load(Ordering::Relaxed),
            killed: self.killed.load(Ordering::Relaxed),
        }
    }
}
