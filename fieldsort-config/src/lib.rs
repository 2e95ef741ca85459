//! Configuration for fieldsort.
//!
//! Loads [`SortConfig`] from the environment or a config file, turns it into
//! core [`fieldsort_core::SortOptions`], and installs the tracing subscriber
//! used by the `fieldsort-config` binary.

pub mod error;
pub mod models;
pub mod telemetry;

pub use error::ConfigError;
pub use models::sort::{ConfigSource, SortConfig};
