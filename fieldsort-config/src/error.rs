//! Validation errors for loaded configuration

use fieldsort_core::SortError;
use thiserror::Error;

/// Configuration values that parse but cannot be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `collation` names neither a locale nor an encoding label
    #[error("collation `{name}` is not a known locale or encoding")]
    UnknownCollation {
        /// Value as configured
        name: String,
        /// Lookup failure from the core crate
        #[source]
        source: SortError,
    },

    /// `collation` is blank
    #[error("collation must not be empty")]
    EmptyCollation,
}
