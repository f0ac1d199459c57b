/*!
 * Process Traits
 * Process table abstraction consumed by the HTTP boundary
 */

use super::store::ProcessStore;
use super::types::{AddMethod, SortBy};
use crate::core::types::{Priority, Process, ProcessId};
use crate::monitoring::StatsSnapshot;

/// Capacity-bounded process table
pub trait ProcessTable: Send + Sync {
    /// Admit a process; `true` iff it is present afterwards
    fn add(&self, method: AddMethod, process: Process) -> bool;

    /// Remove a process; absent ids are ignored
    fn kill(&self, id: ProcessId);

    /// Remove every process with the given priority
    fn kill_group(&self, priority: Priority);

    /// Remove every process
    fn kill_all(&self);

    /// Ordered snapshot of the table
    fn list(&self, sort_by: SortBy, descending: bool) -> Vec<Process>;

    /// Operation counters
    fn stats(&self) -> StatsSnapshot;
}

impl ProcessTable for ProcessStore {
    fn add(&self, method: AddMethod, process: Process) -> bool {
        ProcessStore::add(self, method, process)
    }

    fn kill(&self, id: ProcessId) {
        ProcessStore::kill(self, id);
    }

    fn kill_group(&self, priority: Priority) {
        ProcessStore::kill_group(self, priority);
    }

    fn kill_all(&self) {
        ProcessStore::kill_all(self);
    }

    fn list(&self, sort_by: SortBy, descending: bool) -> Vec<Process> {
        ProcessStore::list(self, sort_by, descending)
    }

    fn stats(&self) -> StatsSnapshot {
        ProcessStore::stats(self)
    }
}
