/*!
 * Admission Policies
 * Decide whether a full table admits a new process, and what it evicts first
 */

use super::types::{AddMethod, ProcessMap};
use crate::core::errors::StoreError;
use crate::core::types::{Process, ProcessId};
use std::cmp::Reverse;

/// Outcome of evaluating a policy against the current table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Room available, insert directly
    Insert,
    /// Remove this process, then insert
    EvictThenInsert(ProcessId),
    /// Do not touch the table
    Reject(StoreError),
}

/// Pure admission rule
///
/// Implementations only read the table. The store applies the returned
/// [`Decision`] while it still holds exclusive access.
pub trait AdmissionPolicy: Send + Sync {
    fn method(&self) -> AddMethod;

    fn decide(&self, table: &ProcessMap, capacity: usize, incoming: &Process) -> Decision;
}

/// Reject when full, never evict
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPolicy;

/// Evict the oldest process when full
#[derive(Debug, Clone, Copy, Default)]
pub struct FifoPolicy;

/// Evict the least-bad strictly lower priority process when full
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityPolicy;

static DEFAULT_POLICY: DefaultPolicy = DefaultPolicy;
static FIFO_POLICY: FifoPolicy = FifoPolicy;
static PRIORITY_POLICY: PriorityPolicy = PriorityPolicy;

/// Policy implementing the given add method
pub fn policy_for(method: AddMethod) -> &'static dyn AdmissionPolicy {
    match method {
        AddMethod::Default => &DEFAULT_POLICY,
        AddMethod::Fifo => &FIFO_POLICY,
        AddMethod::Priority => &PRIORITY_POLICY,
    }
}

#[inline]
fn is_full(table: &ProcessMap, capacity: usize) -> bool {
    table.len() >= capacity
}

impl AdmissionPolicy for DefaultPolicy {
    fn method(&self) -> AddMethod {
        AddMethod::Default
    }

    fn decide(&self, table: &ProcessMap, capacity: usize, _incoming: &Process) -> Decision {
        if is_full(table, capacity) {
            Decision::Reject(StoreError::CapacityReached { capacity })
        } else {
            Decision::Insert
        }
    }
}

impl AdmissionPolicy for FifoPolicy {
    fn method(&self) -> AddMethod {
        AddMethod::Fifo
    }

    fn decide(&self, table: &ProcessMap, capacity: usize, _incoming: &Process) -> Decision {
        if !is_full(table, capacity) {
            return Decision::Insert;
        }

        match oldest(table) {
            Some(victim) => Decision::EvictThenInsert(victim.id),
            // Full but empty only happens with a zero capacity
            None => Decision::Reject(StoreError::CapacityReached { capacity }),
        }
    }
}

impl AdmissionPolicy for PriorityPolicy {
    fn method(&self) -> AddMethod {
        AddMethod::Priority
    }

    fn decide(&self, table: &ProcessMap, capacity: usize, incoming: &Process) -> Decision {
        if !is_full(table, capacity) {
            return Decision::Insert;
        }

        match least_bad_lower_priority(table, incoming) {
            Some(victim) => Decision::EvictThenInsert(victim.id),
            None => Decision::Reject(StoreError::NoEvictionCandidate {
                priority: incoming.priority,
            }),
        }
    }
}

/// Process with the smallest creation stamp
pub fn oldest(table: &ProcessMap) -> Option<&Process> {
    table.values().min_by_key(|p| p.created)
}

/// Eviction candidate for priority admission
///
/// Among processes with priority strictly below the incoming one, picks the highest
/// priority, and among equal priorities the oldest.
pub fn least_bad_lower_priority<'a>(
    table: &'a ProcessMap,
    incoming: &Process,
) -> Option<&'a Process> {
    table
        .values()
        .filter(|p| p.priority < incoming.priority)
        .min_by_key(|p| (Reverse(p.priority), p.created))
}
