/*!
 * Monitoring
 * Request tracing and store statistics
 */

mod stats;
mod tracer;

pub use stats::{StatsSnapshot, StoreStats};
pub use tracer::{generate_trace_id, init_tracing, RequestSpan};
