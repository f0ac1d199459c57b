/*!
 * Process Module
 * Process table, admission policies and ordered listings
 */

pub mod policy;
pub mod query;
pub mod store;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use policy::{policy_for, AdmissionPolicy, Decision, DefaultPolicy, FifoPolicy, PriorityPolicy};
pub use query::sort_snapshot;
pub use store::{ProcessStore, ProcessStoreBuilder};
pub use traits::ProcessTable;
pub use types::{AddMethod, Admission, ProcessMap, SortBy, StoreResult};
