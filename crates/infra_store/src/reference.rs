//! Reference data sources
//!
//! Two adapters for the [`ReferenceSource`] port: an in-memory seed used by
//! tests and embedded setups, and a JSON document on disk. Either delivers
//! the complete table set or fails as unavailable; there is no partial
//! load.

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

use domain_reference::{ReferenceDataSet, ReferenceError, ReferenceSource};

/// A source backed by an in-memory data set
#[derive(Debug, Clone)]
pub struct SeedReferenceSource {
    dataset: ReferenceDataSet,
}

impl SeedReferenceSource {
    pub fn new(dataset: ReferenceDataSet) -> Self {
        Self { dataset }
    }
}

#[async_trait]
impl ReferenceSource for SeedReferenceSource {
    async fn load(&self) -> Result<ReferenceDataSet, ReferenceError> {
        Ok(self.dataset.clone())
    }
}

/// A source reading a [`ReferenceDataSet`] JSON document from disk
#[derive(Debug, Clone)]
pub struct JsonReferenceSource {
    path: PathBuf,
}

impl JsonReferenceSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl ReferenceSource for JsonReferenceSource {
    async fn load(&self) -> Result<ReferenceDataSet, ReferenceError> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|err| {
            ReferenceError::source_unavailable(format!(
                "cannot read {}: {}",
                self.path.display(),
                err
            ))
        })?;
        let dataset: ReferenceDataSet = serde_json::from_str(&raw).map_err(|err| {
            ReferenceError::source_unavailable(format!(
                "cannot parse {}: {}",
                self.path.display(),
                err
            ))
        })?;
        info!(
            path = %self.path.display(),
            items = dataset.items.len(),
            "reference data read from disk"
        );
        Ok(dataset)
    }
}
