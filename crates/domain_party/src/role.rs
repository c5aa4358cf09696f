//! Roles, statuses, and locks
//!
//! A role is a capacity a party holds (employer, customer, …) over a
//! validity period. Holding a role activates the constraint set registered
//! for that role type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::ValidPeriod;

/// A capacity a party holds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyRole {
    /// The role type code, defined in reference data
    pub role_type: String,
    /// When the party holds this capacity
    pub period: ValidPeriod,
}

impl PartyRole {
    /// Grants the role starting now, open-ended
    pub fn new(role_type: impl Into<String>) -> Self {
        Self {
            role_type: role_type.into(),
            period: ValidPeriod::current(),
        }
    }

    pub fn with_period(mut self, period: ValidPeriod) -> Self {
        self.period = period;
        self
    }

    /// Whether the role is held at this moment
    pub fn is_active(&self) -> bool {
        self.period.is_active()
    }
}

/// A status assigned to a party
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyStatus {
    /// The status type code, defined in reference data
    pub status_type: String,
    pub effective_at: DateTime<Utc>,
}

impl PartyStatus {
    pub fn new(status_type: impl Into<String>) -> Self {
        Self {
            status_type: status_type.into(),
            effective_at: Utc::now(),
        }
    }

    pub fn effective_at(mut self, effective_at: DateTime<Utc>) -> Self {
        self.effective_at = effective_at;
        self
    }
}

/// A lock on a party, blocking some class of processing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyLock {
    /// The lock type code, defined in reference data
    pub lock_type: String,
    pub reason: Option<String>,
    pub locked_at: DateTime<Utc>,
}

impl PartyLock {
    pub fn new(lock_type: impl Into<String>) -> Self {
        Self {
            lock_type: lock_type.into(),
            reason: None,
            locked_at: Utc::now(),
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fresh_role_is_active() {
        assert!(PartyRole::new("customer").is_active());
    }

    #[test]
    fn test_status_with_explicit_effective_instant() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let status = PartyStatus::new("ACTIVE").effective_at(instant);
        assert_eq!(status.effective_at, instant);
    }

    #[test]
    fn test_closed_role_is_inactive() {
        let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
        let role = PartyRole::new("customer")
            .with_period(ValidPeriod::bounded(start, end).unwrap());
        assert!(!role.is_active());
    }
}
