//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! party master-data test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built reference datasets and parties
//! - `builders`: Builder patterns for test data construction
//! - `assertions`: Custom assertion helpers for violation sets and pages
//! - `generators`: Property-based test data generators
//! - `logging`: One-shot tracing initialization for tests

pub mod assertions;
pub mod builders;
pub mod fixtures;
pub mod generators;
pub mod logging;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
pub use generators::*;
pub use logging::*;
