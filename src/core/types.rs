/*!
 * Core Types
 * Common types used across the task manager
 */

use super::clock::LogicalClock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Process identifier (caller supplied, unique within a store)
pub type ProcessId = i64;

/// Logical timestamp (ticks of a [`LogicalClock`], not wall-clock time)
pub type Timestamp = u64;

/// Process priority, ordered from least to most important
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    /// All priorities in ascending order
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    /// Parse a priority name, falling back to `Low` for unrecognized input
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant::new("priority", s))
    }
}

/// Error returned when parsing an enum name fails
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// One tracked unit of work
///
/// Immutable once built. `created` orders processes by age; it is only meaningful
/// relative to other timestamps from the same clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Process {
    pub id: ProcessId,
    pub priority: Priority,
    pub created: Timestamp,
}

impl Process {
    /// Create a process stamped by the global logical clock
    pub fn new(id: ProcessId, priority: Priority) -> Self {
        Self::with_clock(id, priority, LogicalClock::global())
    }

    /// Create a process stamped by a specific clock
    pub fn with_clock(id: ProcessId, priority: Priority, clock: &LogicalClock) -> Self {
        Self {
            id,
            priority,
            created: clock.tick(),
        }
    }

    /// Same process with a fresh creation stamp
    pub(crate) fn restamped(self, clock: &LogicalClock) -> Self {
        Self {
            created: clock.tick(),
            ..self
        }
    }
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}@{}", self.id, self.priority, self.created)
    }
}
