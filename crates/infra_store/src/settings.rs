//! Store configuration

use serde::Deserialize;
use std::path::PathBuf;

use crate::reference::JsonReferenceSource;

fn default_locale_code() -> String {
    core_kernel::DEFAULT_LOCALE.to_string()
}

/// Store configuration, loaded from the environment
#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    /// Path to the reference data JSON document
    #[serde(default)]
    pub reference_path: Option<PathBuf>,
    /// Locale used when callers take the defaults
    #[serde(default = "default_locale_code")]
    pub default_locale: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            reference_path: None,
            default_locale: default_locale_code(),
        }
    }
}

impl StoreSettings {
    /// Loads configuration from `PARTY_`-prefixed environment variables
    ///
    /// A `.env` file is honored when present.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();
        config::Config::builder()
            .add_source(config::Environment::with_prefix("PARTY"))
            .build()?
            .try_deserialize()
    }

    /// The reference source configured, if any
    pub fn reference_source(&self) -> Option<JsonReferenceSource> {
        self.reference_path
            .as_ref()
            .map(JsonReferenceSource::new)
    }
}
