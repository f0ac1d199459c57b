/*!
 * Process Types
 * Vocabulary for admission and listing operations
 */

use crate::core::errors::StoreError;
use crate::core::types::{Process, ProcessId, UnknownVariant};
use ahash::RandomState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Process store operation result
pub type StoreResult<T> = Result<T, StoreError>;

/// Backing table keyed by process id
pub type ProcessMap = HashMap<ProcessId, Process, RandomState>;

/// Admission policy selected per `add` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddMethod {
    /// Reject when full
    #[default]
    Default,
    /// Evict the oldest process when full
    Fifo,
    /// Evict a strictly lower priority process when full
    Priority,
}

impl AddMethod {
    pub const ALL: [AddMethod; 3] = [AddMethod::Default, AddMethod::Fifo, AddMethod::Priority];

    pub fn as_str(&self) -> &'static str {
        match self {
            AddMethod::Default => "Default",
            AddMethod::Fifo => "Fifo",
            AddMethod::Priority => "Priority",
        }
    }

    /// Parse an add method name, falling back to `Default`
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl fmt::Display for AddMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AddMethod {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AddMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant::new("add method", s))
    }
}

/// Sort key for table listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortBy {
    #[default]
    Id,
    Priority,
    CreationTime,
}

impl SortBy {
    pub const ALL: [SortBy; 3] = [SortBy::Id, SortBy::Priority, SortBy::CreationTime];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Id => "Id",
            SortBy::Priority => "Priority",
            SortBy::CreationTime => "CreationTime",
        }
    }

    /// Parse a sort key name, falling back to `Id`
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortBy::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant::new("sort key", s))
    }
}

/// Successful admission outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Inserted without touching other entries
    Inserted(Process),
    /// Inserted after evicting the given process
    Evicted { admitted: Process, evicted: Process },
}

impl Admission {
    /// The process as stored in the table
    pub fn admitted(&self) -> Process {
        match self {
            Admission::Inserted(p) => *p,
            Admission::Evicted { admitted, .. } => *admitted,
        }
    }

    pub fn evicted(&self) -> Option<Process> {
        match self {
            Admission::Inserted(_) => None,
            Admission::Evicted { evicted, .. } => Some(*evicted),
        }
    }
}
