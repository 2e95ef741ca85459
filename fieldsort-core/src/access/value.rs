//! Declared field types and borrowed field values

use std::borrow::Cow;
use std::fmt;
use std::time::SystemTime;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Declared type of a registered field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `i128`
    I128,
    /// `isize`
    Isize,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `u128`
    U128,
    /// `usize`
    Usize,
    /// `f32`
    F32,
    /// `f64`
    F64,
    /// `bool`
    Bool,
    /// `char`
    Char,
    /// `String`, `str` or `Cow<str>`
    Text,
    /// Calendar date without a time of day
    Date,
    /// Date and time without an offset, read as UTC
    DateTime,
    /// Absolute point in time
    Timestamp,
    /// Anything else; carries the type name for error messages
    Other(&'static str),
}

impl FieldType {
    /// Rust spelling for primitives, lowercase kind for the rest.
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::I8 => "i8",
            FieldType::I16 => "i16",
            FieldType::I32 => "i32",
            FieldType::I64 => "i64",
            FieldType::I128 => "i128",
            FieldType::Isize => "isize",
            FieldType::U8 => "u8",
            FieldType::U16 => "u16",
            FieldType::U32 => "u32",
            FieldType::U64 => "u64",
            FieldType::U128 => "u128",
            FieldType::Usize => "usize",
            FieldType::F32 => "f32",
            FieldType::F64 => "f64",
            FieldType::Bool => "bool",
            FieldType::Char => "char",
            FieldType::Text => "text",
            FieldType::Date => "date",
            FieldType::DateTime => "datetime",
            FieldType::Timestamp => "timestamp",
            FieldType::Other(name) => name,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Current value of a field, borrowed from the record where possible.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    /// Any signed integer, widened
    Int(i128),
    /// Any unsigned integer, widened
    UInt(u128),
    /// `f32` or `f64`
    Float(f64),
    /// `bool`
    Bool(bool),
    /// `char`
    Char(char),
    /// Text, borrowed when the field holds it
    Text(Cow<'a, str>),
    /// Calendar date
    Date(NaiveDate),
    /// Date and time without an offset
    DateTime(NaiveDateTime),
    /// Absolute point in time
    Timestamp(DateTime<Utc>),
    /// An optional field with no value
    Null,
    /// A value with no comparable representation
    Opaque,
}

impl FieldValue<'_> {
    /// True for [`FieldValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Short description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            FieldValue::Int(v) => v.to_string(),
            FieldValue::UInt(v) => v.to_string(),
            FieldValue::Float(v) => v.to_string(),
            FieldValue::Bool(v) => v.to_string(),
            FieldValue::Char(v) => format!("{v:?}"),
            FieldValue::Text(v) => format!("{v:?}"),
            FieldValue::Date(v) => v.to_string(),
            FieldValue::DateTime(v) => v.to_string(),
            FieldValue::Timestamp(v) => v.to_rfc3339(),
            FieldValue::Null => "null".to_string(),
            FieldValue::Opaque => "<opaque>".to_string(),
        }
    }
}

/// Types that can be registered as sort key fields.
///
/// `Option<T>` is the nullable form of `T`: it declares the same type and
/// reads [`FieldValue::Null`] when empty.
pub trait KeyValue {
    /// Whether the field may read as [`FieldValue::Null`].
    const NULLABLE: bool = false;

    /// Type declared for fields of this Rust type.
    fn field_type() -> FieldType;

    /// Current value.
    fn field_value(&self) -> FieldValue<'_>;
}

macro_rules! signed_key_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl KeyValue for $ty {
                fn field_type() -> FieldType {
                    FieldType::$variant
                }

                fn field_value(&self) -> FieldValue<'_> {
                    FieldValue::Int(*self as i128)
                }
            }
        )*
    };
}

macro_rules! unsigned_key_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl KeyValue for $ty {
                fn field_type() -> FieldType {
                    FieldType::$variant
                }

                fn field_value(&self) -> FieldValue<'_> {
                    FieldValue::UInt(*self as u128)
                }
            }
        )*
    };
}

signed_key_value!(i8 => I8, i16 => I16, i32 => I32, i64 => I64, i128 => I128, isize => Isize);
unsigned_key_value!(u8 => U8, u16 => U16, u32 => U32, u64 => U64, u128 => U128, usize => Usize);

impl KeyValue for f32 {
    fn field_type() -> FieldType {
        FieldType::F32
    }

    fn field_value(&self) -> FieldValue<'_> {
        // Widening through the decimal rendering keeps 0.1f32 as 0.1
        // instead of 0.100000001490116...
        FieldValue::Float(self.to_string().parse().unwrap_or(f64::NAN))
    }
}

impl KeyValue for f64 {
    fn field_type() -> FieldType {
        FieldType::F64
    }

    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Float(*self)
    }
}

impl KeyValue for bool {
    fn field_type() -> FieldType {
        FieldType::Bool
    }

    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Bool(*self)
    }
}

impl KeyValue for char {
    fn field_type() -> FieldType {
        FieldType::Char
    }

    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Char(*self)
    }
}

impl KeyValue for String {
    fn field_type() -> FieldType {
        FieldType::Text
    }

    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Text(Cow::Borrowed(self.as_str()))
    }
}

impl KeyValue for &'static str {
    fn field_type() -> FieldType {
        FieldType::Text
    }

    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Text(Cow::Borrowed(self))
    }
}

impl KeyValue for Cow<'static, str> {
    fn field_type() -> FieldType {
        FieldType::Text
    }

    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Text(Cow::Borrowed(self.as_ref()))
    }
}

impl KeyValue for NaiveDate {
    fn field_type() -> FieldType {
        FieldType::Date
    }

    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Date(*self)
    }
}

impl KeyValue for NaiveDateTime {
    fn field_type() -> FieldType {
        FieldType::DateTime
    }

    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::DateTime(*self)
    }
}

impl<Tz: TimeZone> KeyValue for DateTime<Tz> {
    fn field_type() -> FieldType {
        FieldType::Timestamp
    }

    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Timestamp(self.with_timezone(&Utc))
    }
}

impl KeyValue for SystemTime {
    fn field_type() -> FieldType {
        FieldType::Timestamp
    }

    fn field_value(&self) -> FieldValue<'_> {
        FieldValue::Timestamp(DateTime::<Utc>::from(*self))
    }
}

impl<T: KeyValue> KeyValue for Option<T> {
    const NULLABLE: bool = true;

    fn field_type() -> FieldType {
        T::field_type()
    }

    fn field_value(&self) -> FieldValue<'_> {
        match self {
            Some(value) => value.field_value(),
            None => FieldValue::Null,
        }
    }
}

impl<T: KeyValue> KeyValue for Box<T> {
    const NULLABLE: bool = T::NULLABLE;

    fn field_type() -> FieldType {
        T::field_type()
    }

    fn field_value(&self) -> FieldValue<'_> {
        self.as_ref().field_value()
    }
}
