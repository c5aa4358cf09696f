//! Contact mechanisms

use serde::{Deserialize, Serialize};

/// A way to reach a party
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMechanism {
    /// The mechanism type code (EMAIL, PHONE, …), defined in reference data
    pub mechanism_type: String,
    /// Role of this mechanism (HOME, WORK, …); validity depends on the
    /// mechanism type
    pub role: Option<String>,
    /// The address, number, or handle itself
    pub value: String,
    /// Whether this is the preferred mechanism of its type
    pub preferred: bool,
}

impl ContactMechanism {
    pub fn new(mechanism_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            mechanism_type: mechanism_type.into(),
            role: None,
            value: value.into(),
            preferred: false,
        }
    }

    pub fn email(value: impl Into<String>) -> Self {
        Self::new("EMAIL", value)
    }

    pub fn phone(value: impl Into<String>) -> Self {
        Self::new("PHONE", value)
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn as_preferred(mut self) -> Self {
        self.preferred = true;
        self
    }
}
