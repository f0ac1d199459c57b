/*!
 * System Limits and Constants
 *
 * Centralized location for defaults and thresholds used by the store and the
 * HTTP boundary.
 */

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

// =============================================================================
// PROCESS TABLE
// =============================================================================

/// Default maximum number of tracked processes
pub const DEFAULT_MAX_CAPACITY: usize = 100;

/// Bounded wait for exclusive table access during admission (300ms)
/// Admission fails instead of queueing behind a contended table
pub const ADMISSION_LOCK_TIMEOUT: Duration = Duration::from_millis(300);

// =============================================================================
// HTTP BOUNDARY
// =============================================================================

/// Default listen address (127.0.0.1:8080)
pub const DEFAULT_LISTEN_ADDR: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::new(127, 0, 0, 1), 8080));
