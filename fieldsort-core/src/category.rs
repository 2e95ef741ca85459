//! Semantic comparison categories for sort keys
//!
//! A key's declared type is mapped to exactly one category when the comparator
//! is built. Comparison then dispatches on the category instead of inspecting
//! values at run time.

use std::fmt;

use crate::access::FieldType;
use crate::error::{Result, SortError};

/// How two values of a key are ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Integers and floats, compared by exact decimal magnitude
    Numeric,
    /// Strings, compared by collation key bytes
    Text,
    /// Dates and timestamps, compared on one time axis
    Date,
}

impl Category {
    /// Map a declared field type to its category.
    ///
    /// Fails for `bool`, `char` and any type outside the three categories.
    /// With no field at hand the error names the type itself.
    pub fn classify(field_type: FieldType) -> Result<Self> {
        Self::try_from_type(field_type).ok_or_else(|| {
            SortError::unsupported(
                field_type.name(),
                None,
                "declared type is not numeric, text or date",
            )
        })
    }

    /// Same as [`Category::classify`], reporting the offending field.
    pub fn classify_field(type_name: &str, field: &str, field_type: FieldType) -> Result<Self> {
        Self::try_from_type(field_type).ok_or_else(|| {
            SortError::unsupported(
                field,
                None,
                format!(
                    "declared type `{field_type}` on `{type_name}` is not numeric, text or date"
                ),
            )
        })
    }

    fn try_from_type(field_type: FieldType) -> Option<Self> {
        use FieldType::*;
        match field_type {
            I8 | I16 | I32 | I64 | I128 | Isize | U8 | U16 | U32 | U64 | U128 | Usize | F32
            | F64 => Some(Category::Numeric),
            Text => Some(Category::Text),
            Date | DateTime | Timestamp => Some(Category::Date),
            Bool | Char | Other(_) => None,
        }
    }

    /// Lowercase name, as shown in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Numeric => "numeric",
            Category::Text => "text",
            Category::Date => "date",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
