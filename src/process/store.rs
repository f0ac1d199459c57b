/*!
 * Process Store
 * Capacity-bounded process table with policy-driven admission
 */

use super::policy::{policy_for, Decision};
use super::query::sort_snapshot;
use super::types::{AddMethod, Admission, ProcessMap, SortBy, StoreResult};
use crate::core::clock::LogicalClock;
use crate::core::config::Config;
use crate::core::errors::StoreError;
use crate::core::limits::{ADMISSION_LOCK_TIMEOUT, DEFAULT_MAX_CAPACITY};
use crate::core::types::{Priority, Process, ProcessId};
use crate::monitoring::{StatsSnapshot, StoreStats};
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

// Large capacities grow on demand instead of reserving up front
const PREALLOCATE_LIMIT: usize = 1024;

/// Bounded process table
///
/// Every operation takes the table lock: `try_add` and the kill operations take it
/// exclusively, `list` and the accessors share it. Only admission waits with a bound;
/// when the lock cannot be had within `lock_timeout` the process is not admitted.
///
/// Cloning is cheap and every clone shares the same table.
#[derive(Clone)]
pub struct ProcessStore {
    table: Arc<RwLock<ProcessMap>>,
    capacity: usize,
    lock_timeout: Duration,
    stats: Arc<StoreStats>,
}

/// Builder for ProcessStore
pub struct ProcessStoreBuilder {
    capacity: usize,
    lock_timeout: Duration,
}

impl ProcessStoreBuilder {
    pub fn new() -> Self {
        Self {
            capacity: DEFAULT_MAX_CAPACITY,
            lock_timeout: ADMISSION_LOCK_TIMEOUT,
        }
    }

    /// Maximum number of processes, fixed for the store's lifetime
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Bounded wait for exclusive access during admission
    pub fn with_lock_timeout(mut self, lock_timeout: Duration) -> Self {
        self.lock_timeout = lock_timeout;
        self
    }

    pub fn build(self) -> StoreResult<ProcessStore> {
        if self.capacity == 0 {
            return Err(StoreError::InvalidCapacity(self.capacity));
        }

        info!(
            capacity = self.capacity,
            lock_timeout_ms = self.lock_timeout.as_millis() as u64,
            "Process store initialized"
        );

        Ok(ProcessStore {
            table: Arc::new(RwLock::new(ProcessMap::with_capacity_and_hasher(
                self.capacity.min(PREALLOCATE_LIMIT),
                Default::default(),
            ))),
            capacity: self.capacity,
            lock_timeout: self.lock_timeout,
            stats: Arc::new(StoreStats::new()),
        })
    }
}

impl Default for ProcessStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessStore {
    /// Create a store with the given capacity and the default lock timeout
    pub fn new(capacity: usize) -> StoreResult<Self> {
        Self::builder().with_capacity(capacity).build()
    }

    /// Create a store from runtime configuration
    pub fn from_config(config: &Config) -> StoreResult<Self> {
        Self::builder()
            .with_capacity(config.max_capacity)
            .with_lock_timeout(config.lock_timeout)
            .build()
    }

    pub fn builder() -> ProcessStoreBuilder {
        ProcessStoreBuilder::new()
    }

    /// Admit a process under the given policy
    ///
    /// Returns `true` iff the process is in the table afterwards.
    pub fn add(&self, method: AddMethod, process: Process) -> bool {
        self.try_add(method, process).is_ok()
    }

    /// Admit a process, reporting why admission failed
    ///
    /// Eviction and insertion are sequential: if the id collides after a victim was
    /// removed, the victim stays removed.
    #[instrument(skip(self, process), fields(id = process.id, priority = %process.priority))]
    pub fn try_add(&self, method: AddMethod, process: Process) -> StoreResult<Admission> {
        let Some(mut table) = self.table.try_write_for(self.lock_timeout) else {
            self.stats.inc_lock_timeouts();
            warn!(
                method = %method,
                waited_ms = self.lock_timeout.as_millis() as u64,
                "Table lock not acquired, process not admitted"
            );
            return Err(StoreError::LockTimeout {
                waited_ms: self.lock_timeout.as_millis() as u64,
            });
        };

        let result = self.admit(&mut table, method, process);
        drop(table);

        match &result {
            Ok(admission) => {
                self.stats.inc_admitted();
                debug!(
                    method = %method,
                    created = admission.admitted().created,
                    "Process admitted"
                );
            }
            Err(e) => {
                self.stats.inc_rejected();
                info!(method = %method, reason = e.kind(), "Process not admitted: {}", e);
            }
        }

        result
    }

    fn admit(
        &self,
        table: &mut ProcessMap,
        method: AddMethod,
        process: Process,
    ) -> StoreResult<Admission> {
        let evicted = match policy_for(method).decide(table, self.capacity, &process) {
            Decision::Insert => None,
            Decision::EvictThenInsert(victim) => {
                info!(capacity = self.capacity, victim, "Max capacity reached, evicting");
                let evicted = table
                    .remove(&victim)
                    .ok_or(StoreError::EvictionFailed(victim))?;
                self.stats.inc_evicted();
                Some(evicted)
            }
            Decision::Reject(reason) => return Err(reason),
        };

        if table.contains_key(&process.id) {
            return Err(StoreError::DuplicateId(process.id));
        }

        // Stamp under the lock so creation order matches insertion order
        let admitted = process.restamped(LogicalClock::global());
        table.insert(admitted.id, admitted);

        Ok(match evicted {
            Some(evicted) => Admission::Evicted { admitted, evicted },
            None => Admission::Inserted(admitted),
        })
    }

    /// Remove a process; absent ids are a no-op
    pub fn kill(&self, id: ProcessId) -> Option<Process> {
        let removed = self.table.write().remove(&id);

        match removed {
            Some(_) => {
                self.stats.add_killed(1);
                info!(id, "Killed process");
            }
            None => debug!(id, "Kill ignored, process not found"),
        }

        removed
    }

    /// Remove every process with the given priority, returning how many were removed
    pub fn kill_group(&self, priority: Priority) -> usize {
        let removed = {
            let mut table = self.table.write();
            let before = table.len();
            table.retain(|_, p| p.priority != priority);
            before - table.len()
        };

        self.stats.add_killed(removed);
        info!(priority = %priority, removed, "Killed process group");
        removed
    }

    /// Empty the table, returning how many processes were removed
    pub fn kill_all(&self) -> usize {
        let removed = {
            let mut table = self.table.write();
            let count = table.len();
            table.clear();
            count
        };

        self.stats.add_killed(removed);
        info!(removed, "Killed all processes");
        removed
    }

    /// Ordered point-in-time copy of the table
    pub fn list(&self, sort_by: SortBy, descending: bool) -> Vec<Process> {
        let snapshot: Vec<Process> = self.table.read().values().copied().collect();
        sort_snapshot(snapshot, sort_by, descending)
    }

    pub fn get(&self, id: ProcessId) -> Option<Process> {
        self.table.read().get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.table.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn reference_store() -> ProcessStore {
        let store = ProcessStore::new(4).unwrap();
        assert!(store.add(AddMethod::Default, Process::new(3, Priority::High)));
        assert!(store.add(AddMethod::Default, Process::new(1, Priority::Low)));
        assert!(store.add(AddMethod::Default, Process::new(2, Priority::Low)));
        assert!(store.add(AddMethod::Default, Process::new(0, Priority::Medium)));
        store
    }

    fn ids(store: &ProcessStore) -> Vec<ProcessId> {
        store.list(SortBy::Id, false).iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert_eq!(
            ProcessStore::new(0).err(),
            Some(StoreError::InvalidCapacity(0))
        );
    }

    #[test]
    fn test_default_rejects_when_full() {
        let store = reference_store();
        let err = store
            .try_add(AddMethod::Default, Process::new(4, Priority::High))
            .unwrap_err();

        assert_eq!(err, StoreError::CapacityReached { capacity: 4 });
        assert_eq!(ids(&store), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_default_rejects_duplicate_id() {
        let store = ProcessStore::new(4).unwrap();
        assert!(store.add(AddMethod::Default, Process::new(1, Priority::Low)));

        let err = store
            .try_add(AddMethod::Default, Process::new(1, Priority::High))
            .unwrap_err();
        assert_eq!(err, StoreError::DuplicateId(1));
        assert_eq!(store.get(1).map(|p| p.priority), Some(Priority::Low));
    }

    #[test]
    fn test_fifo_reports_evicted_process() {
        let store = reference_store();
        let admission = store
            .try_add(AddMethod::Fifo, Process::new(4, Priority::Low))
            .unwrap();

        assert_eq!(admission.evicted().map(|p| p.id), Some(3));
        assert_eq!(admission.admitted().id, 4);
        assert_eq!(ids(&store), vec![0, 1, 2, 4]);
    }

    #[test]
    fn test_fifo_duplicate_keeps_eviction() {
        let store = reference_store();
        let err = store
            .try_add(AddMethod::Fifo, Process::new(1, Priority::High))
            .unwrap_err();

        assert_eq!(err, StoreError::DuplicateId(1));
        // Oldest entry is gone even though nothing was inserted
        assert_eq!(ids(&store), vec![0, 1, 2]);
    }

    #[test]
    fn test_admission_restamps_in_insertion_order() {
        let store = ProcessStore::new(4).unwrap();
        let early = Process::new(1, Priority::Low);
        let late = Process::new(2, Priority::Low);

        assert!(store.add(AddMethod::Default, late));
        assert!(store.add(AddMethod::Default, early));

        let order: Vec<ProcessId> = store
            .list(SortBy::CreationTime, false)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(order, vec![2, 1]);
    }

    #[test]
    fn test_kill_operations() {
        let store = reference_store();

        assert_eq!(store.kill(2).map(|p| p.id), Some(2));
        assert_eq!(store.kill(2), None);
        assert_eq!(store.kill_group(Priority::High), 1);
        assert_eq!(ids(&store), vec![0, 1]);
        assert_eq!(store.kill_all(), 2);
        assert!(store.is_empty());
        assert_eq!(store.stats().killed, 4);
    }

    #[test]
    fn test_add_times_out_under_contention() {
        let store = ProcessStore::builder()
            .with_capacity(4)
            .with_lock_timeout(Duration::from_millis(20))
            .build()
            .unwrap();

        let guard = store.table.write();
        let contender = store.clone();
        let result = thread::spawn(move || {
            contender.try_add(AddMethod::Default, Process::new(1, Priority::Low))
        })
        .join()
        .unwrap();
        drop(guard);

        assert_eq!(result, Err(StoreError::LockTimeout { waited_ms: 20 }));
        assert!(store.is_empty());
        assert_eq!(store.stats().lock_timeouts, 1);

        // Released lock admits again
        assert!(store.add(AddMethod::Default, Process::new(1, Priority::Low)));
    }

    #[test]
    fn test_snapshot_is_independent() {
        let store = reference_store();
        let snapshot = store.list(SortBy::Id, false);
        store.kill_all();

        assert_eq!(snapshot.len(), 4);
        assert!(store.is_empty());
    }

    #[test]
    fn test_stats_track_outcomes() {
        let store = reference_store();
        store.add(AddMethod::Default, Process::new(9, Priority::Low));
        store.add(AddMethod::Priority, Process::new(9, Priority::High));

        let stats = store.stats();
        assert_eq!(stats.admitted, 5);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.evicted, 1);
    }
}
