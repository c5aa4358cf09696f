//! Locale identifiers
//!
//! Locale identifiers arrive as opaque strings (`"en-US"`) and are parsed
//! into structured language identifiers up front, so malformed input fails
//! with `InvalidArgument` before any table lookup. Whether a well-formed
//! locale is *supported* is decided against the loaded reference data, not
//! here.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

use crate::error::CoreError;

/// The module-wide default locale, used by the "use default" call forms
pub const DEFAULT_LOCALE: &str = "en-US";

/// A parsed, canonicalized locale identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocaleId(LanguageIdentifier);

impl LocaleId {
    /// Parses a locale identifier
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when the input is not a well-formed language
    /// identifier.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        input
            .parse::<LanguageIdentifier>()
            .map(LocaleId)
            .map_err(|_| CoreError::invalid_argument(format!("malformed locale: {}", input)))
    }

    /// Returns the module-wide default locale
    pub fn default_locale() -> Self {
        Self(
            DEFAULT_LOCALE
                .parse::<LanguageIdentifier>()
                .expect("default locale is well-formed"),
        )
    }

    /// Returns the underlying language identifier
    pub fn as_langid(&self) -> &LanguageIdentifier {
        &self.0
    }

    /// Returns the primary language subtag (`en` for `en-US`)
    pub fn language(&self) -> &str {
        self.0.language.as_str()
    }
}

impl Default for LocaleId {
    fn default() -> Self {
        Self::default_locale()
    }
}

impl fmt::Display for LocaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LocaleId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<LanguageIdentifier> for LocaleId {
    fn from(langid: LanguageIdentifier) -> Self {
        Self(langid)
    }
}

impl Serialize for LocaleId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for LocaleId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        LocaleId::parse(&s).map_err(serde::de::Error::custom)
    }
}
