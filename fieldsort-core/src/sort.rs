//! Sorting collections by a named key
//!
//! [`sort_ascending`] and [`sort_descending`] are the usual entry points; they
//! run with [`SortOptions::default`]. Use a [`FieldSorter`] to pick a
//! collation, pivot strategy or null ordering, or to sort with a registry
//! that is not attached to the record type.

use tracing::debug;

use crate::access::{FieldRegistry, Record};
use crate::comparator::KeyComparator;
use crate::error::Result;
use crate::options::{SortOptions, SortOrder};
use crate::quicksort::{SortStats, quicksort};
use crate::target::SortTarget;
use crate::utils::is_sorted_by;

/// Sorts collections by a key named at run time.
#[derive(Debug, Clone, Default)]
pub struct FieldSorter {
    options: SortOptions,
}

impl FieldSorter {
    /// A sorter that applies `options` to every call.
    pub fn new(options: SortOptions) -> Self {
        Self { options }
    }

    /// Options this sorter was built with.
    pub fn options(&self) -> &SortOptions {
        &self.options
    }

    /// Sort `items` by `field`, smallest first, returning the run's statistics.
    pub fn ascending<C>(&self, items: &mut C, field: &str) -> Result<SortStats>
    where
        C: SortTarget + ?Sized,
        C::Item: Record,
    {
        self.sort_by_field(items, field, SortOrder::Ascending)
    }

    /// Sort `items` by `field`, largest first, returning the run's statistics.
    pub fn descending<C>(&self, items: &mut C, field: &str) -> Result<SortStats>
    where
        C: SortTarget + ?Sized,
        C::Item: Record,
    {
        self.sort_by_field(items, field, SortOrder::Descending)
    }

    /// Sort `items` by `field` in `order`, resolving the key on the item's
    /// own [`Record::registry`].
    pub fn sort_by_field<C>(&self, items: &mut C, field: &str, order: SortOrder) -> Result<SortStats>
    where
        C: SortTarget + ?Sized,
        C::Item: Record,
    {
        self.sort_with_registry(<C::Item as Record>::registry(), items, field, order)
    }

    /// Sort `items` by `field` as resolved on `registry`.
    ///
    /// The key is resolved and classified before any element is compared,
    /// so an unknown or unsupported key fails even for an empty collection.
    /// On any error the collection is left exactly as it was.
    pub fn sort_with_registry<C>(
        &self,
        registry: &FieldRegistry<C::Item>,
        items: &mut C,
        field: &str,
        order: SortOrder,
    ) -> Result<SortStats>
    where
        C: SortTarget + ?Sized,
        C::Item: 'static,
    {
        let comparator = KeyComparator::new(registry, field, order, &self.options)?;

        let len = items.len();
        if len < 2 {
            return Ok(SortStats::default());
        }

        let mut positions: Vec<usize> = (0..len).collect();
        let stats = {
            let snapshot = items.snapshot();
            let stats = quicksort(
                &mut positions,
                self.options.pivot,
                self.options.seed,
                |a, b| comparator.compare(snapshot[a], snapshot[b]),
            )?;
            debug_assert!(
                matches!(
                    is_sorted_by(&positions, |&a, &b| comparator
                        .compare(snapshot[a], snapshot[b])),
                    Ok(true)
                ),
                "`{field}` left out of order"
            );
            stats
        };

        items.apply_order(&positions);

        debug!(
            record = registry.type_name(),
            field,
            %order,
            len,
            comparisons = stats.comparisons,
            partitions = stats.partitions,
            max_depth = stats.max_depth,
            "sorted collection"
        );
        Ok(stats)
    }
}

/// Sort `items` by `field`, smallest first.
pub fn sort_ascending<C>(items: &mut C, field: &str) -> Result<()>
where
    C: SortTarget + ?Sized,
    C::Item: Record,
{
    sort_by_field(items, field, SortOrder::Ascending)
}

/// Sort `items` by `field`, largest first.
pub fn sort_descending<C>(items: &mut C, field: &str) -> Result<()>
where
    C: SortTarget + ?Sized,
    C::Item: Record,
{
    sort_by_field(items, field, SortOrder::Descending)
}

/// Sort `items` by `field` in `order` with default options.
pub fn sort_by_field<C>(items: &mut C, field: &str, order: SortOrder) -> Result<()>
where
    C: SortTarget + ?Sized,
    C::Item: Record,
{
    FieldSorter::default()
        .sort_by_field(items, field, order)
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SortError;
    use crate::options::NullOrdering;
    use crate::quicksort::PivotStrategy;
    use std::sync::OnceLock;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        rank: i32,
        label: String,
        score: Option<f64>,
    }

    impl Record for Item {
        fn registry() -> &'static FieldRegistry<Self> {
            static REGISTRY: OnceLock<FieldRegistry<Item>> = OnceLock::new();
            REGISTRY.get_or_init(|| {
                FieldRegistry::builder("Item")
                    .field("rank", |i: &Item| &i.rank)
                    .field("label", |i: &Item| &i.label)
                    .field("score", |i: &Item| &i.score)
                    .build()
                    .unwrap()
            })
        }
    }

    fn item(rank: i32, label: &str, score: Option<f64>) -> Item {
        Item {
            rank,
            label: label.to_string(),
            score,
        }
    }

    fn ranks(items: &[Item]) -> Vec<i32> {
        items.iter().map(|i| i.rank).collect()
    }

    #[test]
    fn ascending_and_descending() {
        let mut items = vec![item(3, "c", None), item(1, "a", None), item(2, "b", None)];
        sort_ascending(&mut items, "rank").unwrap();
        assert_eq!(ranks(&items), vec![1, 2, 3]);

        sort_descending(&mut items, "label").unwrap();
        assert_eq!(ranks(&items), vec![3, 2, 1]);
    }

    #[test]
    fn slices_sort_in_place() {
        let mut items = [item(2, "", None), item(1, "", None)];
        sort_ascending(&mut items[..], "rank").unwrap();
        assert_eq!(ranks(&items), vec![1, 2]);
    }

    #[test]
    fn empty_input_still_checks_the_key() {
        let mut empty: Vec<Item> = Vec::new();
        assert!(sort_ascending(&mut empty, "rank").is_ok());
        assert!(matches!(
            sort_ascending(&mut empty, "missing"),
            Err(SortError::FieldNotFound { .. })
        ));
    }

    #[test]
    fn failed_sort_leaves_input_untouched() {
        let mut items = vec![
            item(3, "", Some(1.0)),
            item(1, "", None),
            item(2, "", Some(0.5)),
        ];
        let before = items.clone();
        let err = sort_ascending(&mut items, "score").unwrap_err();
        assert!(err.is_unsupported_key_type());
        assert_eq!(items, before);
    }

    #[test]
    fn result_is_ordered_under_the_same_comparator() {
        let mut items: Vec<Item> = [5, -3, 8, 0, 8, 2, -7]
            .into_iter()
            .map(|rank| item(rank, "", None))
            .collect();
        sort_descending(&mut items, "rank").unwrap();

        let comparator = KeyComparator::new(
            Item::registry(),
            "rank",
            SortOrder::Descending,
            &SortOptions::default(),
        )
        .unwrap();
        assert_eq!(
            is_sorted_by(&items, |a, b| comparator.compare(a, b)),
            Ok(true)
        );

        let ascending = KeyComparator::new(
            Item::registry(),
            "rank",
            SortOrder::Ascending,
            &SortOptions::default(),
        )
        .unwrap();
        assert_eq!(
            is_sorted_by(&items, |a, b| ascending.compare(a, b)),
            Ok(false)
        );
    }

    #[test]
    fn options_flow_into_the_comparator() {
        let sorter = FieldSorter::new(
            SortOptions::default()
                .with_nulls(NullOrdering::Last)
                .with_pivot(PivotStrategy::Random)
                .with_seed(11),
        );
        let mut items = vec![
            item(1, "", None),
            item(2, "", Some(0.5)),
            item(3, "", Some(1.0)),
        ];
        let stats = sorter.descending(&mut items, "score").unwrap();
        assert_eq!(ranks(&items), vec![3, 2, 1]);
        assert!(stats.comparisons > 0);
    }
}
