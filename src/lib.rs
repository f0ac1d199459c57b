/*!
 * Task Manager Library
 * Capacity-bounded process table with pluggable admission policies
 */

pub mod api;
pub mod core;
pub mod monitoring;
pub mod process;

// Re-exports
pub use crate::core::errors::*;
pub use crate::core::types::{Priority, Process, ProcessId, Timestamp};
pub use crate::core::{Config, LogicalClock};
pub use api::start_http_server;
pub use monitoring::{init_tracing, StatsSnapshot};
pub use process::{AddMethod, Admission, ProcessStore, ProcessTable, SortBy, StoreResult};
