//! # Fieldsort Core
//!
//! Sort homogeneous collections of records by a key whose name is only known
//! at run time.
//!
//! ## Overview
//!
//! - **Field access**: record types publish a [`FieldRegistry`] mapping field
//!   names to typed getters, including fields embedded from ancestor types
//! - **Classification**: a key's declared type decides whether it is ordered
//!   as a number, as text or as a date ([`Category`])
//! - **Comparison**: [`KeyComparator`] compares two records by one key,
//!   numbers by exact decimal magnitude, text by [`Collation`] key bytes and
//!   dates on one time axis
//! - **Sorting**: an in-place hole-partition [`quicksort`] driven by that
//!   comparator
//! - **Facade**: [`sort_ascending`] / [`sort_descending`] and [`FieldSorter`]
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use fieldsort_core::{FieldRegistry, Record, sort_ascending};
//! use std::sync::OnceLock;
//!
//! struct User {
//!     id: i64,
//!     name: String,
//!     create_date: NaiveDate,
//! }
//!
//! impl Record for User {
//!     fn registry() -> &'static FieldRegistry<Self> {
//!         static USERS: OnceLock<FieldRegistry<User>> = OnceLock::new();
//!         USERS.get_or_init(|| {
//!             FieldRegistry::builder("User")
//!                 .field("id", |u: &User| &u.id)
//!                 .field("name", |u: &User| &u.name)
//!                 .field("createDate", |u: &User| &u.create_date)
//!                 .build()
//!                 .expect("user fields are unique")
//!         })
//!     }
//! }
//!
//! # fn main() -> fieldsort_core::Result<()> {
//! let day = |d| NaiveDate::from_ymd_opt(2014, 5, d).unwrap();
//! let mut users = vec![
//!     User { id: 2, name: "叶水燕".into(), create_date: day(12) },
//!     User { id: 1, name: "杨忠杰".into(), create_date: day(11) },
//! ];
//!
//! sort_ascending(&mut users, "name")?;
//! assert_eq!(users[0].id, 1);
//!
//! assert!(sort_ascending(&mut users, "nickname").is_err());
//! # Ok(())
//! # }
//! ```

pub mod access;
pub mod category;
pub mod collation;
pub mod comparator;
pub mod error;
pub mod options;
pub mod quicksort;
pub mod sort;
pub mod target;
pub mod utils;

pub use access::{
    FieldDescriptor, FieldRegistry, FieldRegistryBuilder, FieldType, FieldValue, KeyValue, Record,
};
pub use category::Category;
pub use collation::{CodePointCollation, Collation, EncodingCollation, collation_for};
pub use comparator::KeyComparator;
pub use error::{Result, SortError};
pub use options::{NullOrdering, SortOptions, SortOrder};
pub use quicksort::{PivotStrategy, SortStats, quicksort};
pub use sort::{FieldSorter, sort_ascending, sort_by_field, sort_descending};
pub use target::SortTarget;
