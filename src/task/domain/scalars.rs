//! Validated scalar types for task metadata.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Positive time estimate in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EstimateMinutes(u32);

impl EstimateMinutes {
    /// Creates a validated estimate.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ZeroEstimate`] when the value is zero.
    pub const fn new(minutes: u32) -> Result<Self, TaskDomainError> {
        if minutes == 0 {
            return Err(TaskDomainError::ZeroEstimate);
        }
        Ok(Self(minutes))
    }

    /// Returns the estimate in minutes.
    #[must_use]
    pub const fn minutes(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EstimateMinutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m", self.0)
    }
}

/// Advisory completion percentage in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Progress(u8);

impl Progress {
    /// No progress recorded.
    pub const ZERO: Self = Self(0);

    /// Creates a validated progress percentage.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::ProgressOutOfRange`] when the value
    /// exceeds 100.
    pub const fn from_percent(percent: u8) -> Result<Self, TaskDomainError> {
        if percent > 100 {
            return Err(TaskDomainError::ProgressOutOfRange(percent));
        }
        Ok(Self(percent))
    }

    /// Returns the percentage value.
    #[must_use]
    pub const fn percent(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
