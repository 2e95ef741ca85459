//! Helpers for applying and checking orderings

use std::cmp::Ordering;

/// Reorder `items` in place so that `items[i]` becomes the element that was
/// at `order[i]`.
///
/// Elements are moved by swapping along the cycles of the permutation, so no
/// `Clone` bound is needed. `order` must be a permutation of `0..items.len()`.
pub fn apply_permutation<T>(items: &mut [T], order: &[usize]) {
    debug_assert_eq!(
        items.len(),
        order.len(),
        "Order length must match items length"
    );

    let mut placed = vec![false; items.len()];
    for start in 0..items.len() {
        if placed[start] {
            continue;
        }
        let mut current = start;
        loop {
            placed[current] = true;
            let source = order[current];
            if source == start {
                break;
            }
            debug_assert!(source < items.len(), "Index out of bounds");
            items.swap(current, source);
            current = source;
        }
    }
}

/// Check whether `items` is sorted under a fallible comparator
///
/// Returns the first comparator error instead of a verdict.
pub fn is_sorted_by<T, E, F>(items: &[T], mut compare: F) -> Result<bool, E>
where
    F: FnMut(&T, &T) -> Result<Ordering, E>,
{
    for pair in items.windows(2) {
        if compare(&pair[0], &pair[1])? == Ordering::Greater {
            return Ok(false);
        }
    }
    Ok(true)
}
