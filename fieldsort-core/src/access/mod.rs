//! Field access by name
//!
//! - [`FieldType`] / [`FieldValue`]: declared types and current values
//! - [`KeyValue`]: primitives usable as key fields
//! - [`FieldRegistry`]: name → typed getter map, one per record type

pub mod registry;
pub mod value;

pub use registry::{FieldDescriptor, FieldRegistry, FieldRegistryBuilder, Getter, Record};
pub use value::{FieldType, FieldValue, KeyValue};
