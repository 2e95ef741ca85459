//! Direction, null handling and the options a sorter runs with

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::collation::{Collation, default_collation};
use crate::quicksort::PivotStrategy;

/// Sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Smallest key first
    #[default]
    Ascending,
    /// Largest key first
    Descending,
}

impl SortOrder {
    /// Orient a natural (ascending) ordering.
    #[inline]
    pub fn apply(self, natural: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            SortOrder::Ascending => natural,
            SortOrder::Descending => natural.reverse(),
        }
    }

    /// The opposite direction.
    pub fn reverse(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    /// Parse `asc`/`desc`, their long forms or `a`/`d`, ignoring case.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "asc" | "ascending" | "a" => Some(SortOrder::Ascending),
            "desc" | "descending" | "d" => Some(SortOrder::Descending),
            _ => None,
        }
    }

    /// Short code, `asc` or `desc`.
    pub fn code(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Where records whose key is null end up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NullOrdering {
    /// A null key fails the sort
    #[default]
    Reject,
    /// Nulls before every value, whatever the direction
    First,
    /// Nulls after every value, whatever the direction
    Last,
}

/// Tuning shared by every sort a [`crate::FieldSorter`] runs
#[derive(Debug, Clone)]
pub struct SortOptions {
    /// Byte order for text keys
    pub collation: Arc<dyn Collation>,
    /// How each partition picks its pivot
    pub pivot: PivotStrategy,
    /// Seed for [`PivotStrategy::Random`]; unseeded runs draw from the OS
    pub seed: Option<u64>,
    /// What to do with null keys
    pub nulls: NullOrdering,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            collation: default_collation(),
            pivot: PivotStrategy::default(),
            seed: None,
            nulls: NullOrdering::default(),
        }
    }
}

impl SortOptions {
    /// Replace the text collation.
    pub fn with_collation(mut self, collation: Arc<dyn Collation>) -> Self {
        self.collation = collation;
        self
    }

    /// Replace the pivot strategy.
    pub fn with_pivot(mut self, pivot: PivotStrategy) -> Self {
        self.pivot = pivot;
        self
    }

    /// Seed random pivots so runs are repeatable.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the null ordering.
    pub fn with_nulls(mut self, nulls: NullOrdering) -> Self {
        self.nulls = nulls;
        self
    }
}
