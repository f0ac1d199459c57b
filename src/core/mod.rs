/*!
 * Core Module
 * Fundamental types, configuration and error handling
 */

pub mod clock;
pub mod config;
pub mod errors;
pub mod limits;
pub mod types;

// Re-export for convenience
pub use clock::LogicalClock;
pub use config::Config;
pub use errors::*;
pub use types::*;
