//! Errors raised while resolving, classifying or comparing sort keys

use thiserror::Error;

use crate::category::Category;

/// Everything a sort can fail with
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    /// No registry layer declares the key
    #[error("field `{field}` not found on `{type_name}` or any of its ancestors")]
    FieldNotFound {
        /// Record type the lookup started from
        type_name: &'static str,
        /// Requested key
        field: String,
    },

    /// The key's declared type, or one of its values, has no usable order
    #[error("cannot order by `{field}`{}: {reason}", category_suffix(.category))]
    UnsupportedKeyType {
        /// Key name, or the type name when no field is involved
        field: String,
        /// Category the key was classified as, once known
        category: Option<Category>,
        /// What went wrong
        reason: String,
    },

    /// A registry layer declares the same name twice
    #[error("field `{field}` registered twice on `{type_name}`")]
    DuplicateField {
        /// Record type being built
        type_name: &'static str,
        /// Repeated name
        field: String,
    },

    /// Neither a known collation name nor an encoding label
    #[error("unknown collation: {0}")]
    UnknownCollation(String),
}

fn category_suffix(category: &Option<Category>) -> String {
    match category {
        Some(category) => format!(" as {category}"),
        None => String::new(),
    }
}

impl SortError {
    pub(crate) fn unsupported(
        field: &str,
        category: Option<Category>,
        reason: impl Into<String>,
    ) -> Self {
        SortError::UnsupportedKeyType {
            field: field.to_string(),
            category,
            reason: reason.into(),
        }
    }

    /// True for failures that mean the key cannot be ordered, whether the
    /// declared type was rejected up front or a value failed mid-sort.
    pub fn is_unsupported_key_type(&self) -> bool {
        matches!(self, SortError::UnsupportedKeyType { .. })
    }

    /// True when the key name did not resolve.
    pub fn is_field_not_found(&self) -> bool {
        matches!(self, SortError::FieldNotFound { .. })
    }

    /// Name of the key the failure is about, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            SortError::FieldNotFound { field, .. }
            | SortError::UnsupportedKeyType { field, .. }
            | SortError::DuplicateField { field, .. } => Some(field),
            SortError::UnknownCollation(_) => None,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, SortError>;
