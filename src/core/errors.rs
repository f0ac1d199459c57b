/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::{Priority, ProcessId};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Process store errors with serialization support
///
/// None of these are fatal. At the boundary every variant collapses into
/// "not admitted", so callers cannot tell contention from a full table.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum StoreError {
    #[error("Process table is full (capacity {capacity})")]
    #[diagnostic(
        code(store::capacity_reached),
        help("Use the Fifo or Priority add method to evict, or kill processes first.")
    )]
    CapacityReached { capacity: usize },

    #[error("No process with priority lower than {priority} to evict")]
    #[diagnostic(
        code(store::no_eviction_candidate),
        help("Priority admission only evicts strictly lower priorities.")
    )]
    NoEvictionCandidate { priority: Priority },

    #[error("Process {0} already exists")]
    #[diagnostic(
        code(store::duplicate_id),
        help("Process ids are caller supplied and must be unique within the table.")
    )]
    DuplicateId(ProcessId),

    #[error("Failed to evict process {0}")]
    #[diagnostic(
        code(store::eviction_failed),
        help("The eviction candidate disappeared before it could be removed.")
    )]
    EvictionFailed(ProcessId),

    #[error("Timed out after {waited_ms}ms waiting for exclusive table access")]
    #[diagnostic(
        code(store::lock_timeout),
        help("The table is under contention. Re-invoke the operation to retry.")
    )]
    LockTimeout { waited_ms: u64 },

    #[error("Invalid capacity: {0}")]
    #[diagnostic(
        code(store::invalid_capacity),
        help("Maximum capacity must be a positive integer.")
    )]
    InvalidCapacity(usize),
}

impl StoreError {
    /// Short machine-readable name for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::CapacityReached { .. } => "capacity_reached",
            StoreError::NoEvictionCandidate { .. } => "no_eviction_candidate",
            StoreError::DuplicateId(_) => "duplicate_id",
            StoreError::EvictionFailed(_) => "eviction_failed",
            StoreError::LockTimeout { .. } => "lock_timeout",
            StoreError::InvalidCapacity(_) => "invalid_capacity",
        }
    }
}

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    #[diagnostic(
        code(config::invalid_value),
        help("Check the environment variable and restart.")
    )]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// HTTP boundary errors, reported to the client as 4xx responses
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ApiError {
    #[error("Malformed request: {0}")]
    #[diagnostic(
        code(api::malformed_request),
        help("Query parameters must be valid urlencoded pairs, each name given once.")
    )]
    MalformedRequest(String),

    #[error("Missing parameter: {0}")]
    #[diagnostic(code(api::missing_parameter))]
    MissingParameter(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    #[diagnostic(code(api::invalid_parameter))]
    InvalidParameter { name: &'static str, value: String },
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::MalformedRequest(_) => "malformed_request",
            ApiError::MissingParameter(_) => "missing_parameter",
            ApiError::InvalidParameter { .. } => "invalid_parameter",
        }
    }
}

/// Unified task manager error type with miette diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum TaskManagerError {
    #[error("Store error: {0}")]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    #[diagnostic(
        code(task_manager::io_error),
        help("Network or socket operation failed. Check the listen address.")
    )]
    Io(#[from] std::io::Error),
}

/// Serializable error representation for API responses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct SerializableError {
    pub error_type: String,
    pub message: String,
}

impl SerializableError {
    pub fn new(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_type: error_type.into(),
            message: message.into(),
        }
    }
}

impl From<ApiError> for SerializableError {
    fn from(err: ApiError) -> Self {
        SerializableError::new(err.kind(), err.to_string())
    }
}

impl From<StoreError> for SerializableError {
    fn from(err: StoreError) -> Self {
        SerializableError::new(err.kind(), err.to_string())
    }
}
