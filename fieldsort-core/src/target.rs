//! Containers that can be sorted in place
//!
//! Sorting works on a snapshot: the facade reads the elements through
//! [`SortTarget::snapshot`], sorts a vector of indices into it and, only once
//! the whole sort has succeeded, hands the resulting order back through
//! [`SortTarget::apply_order`]. A failed sort never touches the container.

use std::collections::{LinkedList, VecDeque};

use crate::utils::apply_permutation;

/// A sequence container whose contents can be reordered in place.
pub trait SortTarget {
    /// Element type
    type Item;

    /// Number of elements.
    fn len(&self) -> usize;

    /// True when there is nothing to sort.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow every element in current order.
    fn snapshot(&self) -> Vec<&Self::Item>;

    /// Reorder so that position `i` holds the element previously at
    /// `order[i]`.
    fn apply_order(&mut self, order: &[usize]);
}

impl<T> SortTarget for [T] {
    type Item = T;

    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn snapshot(&self) -> Vec<&T> {
        self.iter().collect()
    }

    fn apply_order(&mut self, order: &[usize]) {
        apply_permutation(self, order);
    }
}

impl<T, const N: usize> SortTarget for [T; N] {
    type Item = T;

    fn len(&self) -> usize {
        N
    }

    fn snapshot(&self) -> Vec<&T> {
        self.iter().collect()
    }

    fn apply_order(&mut self, order: &[usize]) {
        apply_permutation(self.as_mut_slice(), order);
    }
}

impl<T> SortTarget for Vec<T> {
    type Item = T;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn snapshot(&self) -> Vec<&T> {
        self.iter().collect()
    }

    fn apply_order(&mut self, order: &[usize]) {
        apply_permutation(self.as_mut_slice(), order);
    }
}

impl<T> SortTarget for VecDeque<T> {
    type Item = T;

    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn snapshot(&self) -> Vec<&T> {
        self.iter().collect()
    }

    fn apply_order(&mut self, order: &[usize]) {
        apply_permutation(self.make_contiguous(), order);
    }
}

impl<T> SortTarget for LinkedList<T> {
    type Item = T;

    fn len(&self) -> usize {
        LinkedList::len(self)
    }

    fn snapshot(&self) -> Vec<&T> {
        self.iter().collect()
    }

    fn apply_order(&mut self, order: &[usize]) {
        let mut items: Vec<T> = std::mem::take(self).into_iter().collect();
        apply_permutation(&mut items, order);
        self.extend(items);
    }
}
