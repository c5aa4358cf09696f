//! Validity periods
//!
//! Roles, associations, and mandates are effective over a period: a start
//! instant and an optional end. An open period means currently effective.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid period: start {start} must be before end {end}")]
    InvalidPeriod { start: String, end: String },
}

/// A period during which a fact is effective
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidPeriod {
    /// Start of the period (inclusive)
    pub start: DateTime<Utc>,
    /// End of the period (exclusive), None means open-ended
    pub end: Option<DateTime<Utc>>,
}

impl ValidPeriod {
    /// Creates a new period, enforcing start < end when bounded
    pub fn new(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Result<Self, TemporalError> {
        if let Some(end) = end {
            if start >= end {
                return Err(TemporalError::InvalidPeriod {
                    start: start.to_string(),
                    end: end.to_string(),
                });
            }
        }
        Ok(Self { start, end })
    }

    /// Creates an open-ended period starting from the given instant
    pub fn from(start: DateTime<Utc>) -> Self {
        Self { start, end: None }
    }

    /// Creates an open-ended period starting now
    pub fn current() -> Self {
        Self::from(Utc::now())
    }

    /// Creates a bounded period
    pub fn bounded(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, TemporalError> {
        Self::new(start, Some(end))
    }

    /// Checks if this period contains a specific instant
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && self.end.map_or(true, |end| instant < end)
    }

    /// Whether the period has no end yet
    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// Whether the period is effective at the current instant
    pub fn is_active(&self) -> bool {
        self.contains(Utc::now())
    }

    /// Closes the period at the specified instant
    pub fn close(&mut self, end: DateTime<Utc>) {
        self.end = Some(end);
    }
}
