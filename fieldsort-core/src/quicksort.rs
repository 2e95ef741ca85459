//! In-place quicksort over a snapshot of element handles
//!
//! Partitioning follows the classic hole-moving scheme: the pivot is lifted
//! out of the first slot, the right cursor walks down past elements that
//! compare `>=` the pivot, the left cursor walks up past elements that compare
//! `<=` it, and the pivot drops into the slot where the cursors meet. Equal
//! keys may land on either side, so the sort is not stable.
//!
//! Two departures from the textbook recursion: the pivot can be chosen by
//! median-of-three or at random (it is swapped to the front before
//! partitioning, so the partition itself is unchanged), and only the smaller
//! side is recursed into while the larger side is handled by the loop. The
//! first avoids quadratic time on already ordered input; the second bounds
//! stack depth to O(log n) for any input.
//!
//! Runs of equal keys stay quadratic under every pivot strategy: the `>=`
//! scan carries every key equal to the pivot to the same side, so a range of
//! n equal keys shrinks by one element per partition. Only the stack depth is
//! bounded there.

use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::error::Result;

/// How the pivot of each sub-range is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PivotStrategy {
    /// Always the first element. Quadratic on already ordered input.
    First,
    /// Median of first, middle and last element
    #[default]
    MedianOfThree,
    /// Uniformly random element of the range
    Random,
}

/// Counters collected during one sort
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortStats {
    /// Calls to the comparator
    pub comparisons: usize,
    /// Ranges partitioned around a pivot
    pub partitions: usize,
    /// Partitions that left one side empty
    pub unbalanced_partitions: usize,
    /// Deepest recursion reached
    pub max_depth: usize,
}

/// Sort `v` in place with a fallible three-way comparator.
///
/// Elements are copied around like references, so `E` is usually an index
/// or a `&T`. The first comparator error aborts the sort; `v` is then left
/// in an unspecified order.
pub fn quicksort<E, F>(
    v: &mut [E],
    pivot: PivotStrategy,
    seed: Option<u64>,
    compare: F,
) -> Result<SortStats>
where
    E: Copy,
    F: FnMut(E, E) -> Result<Ordering>,
{
    let rng = match pivot {
        PivotStrategy::Random => Some(match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }),
        _ => None,
    };

    let mut sorter = Quicksort {
        compare,
        pivot,
        rng,
        stats: SortStats::default(),
    };

    if v.len() > 1 {
        sorter.sort_range(v, 0, v.len() - 1, 1)?;
    }

    let stats = sorter.stats;
    if pivot == PivotStrategy::First && v.len() > 16 && stats.unbalanced_partitions > v.len() / 2
    {
        warn!(
            len = v.len(),
            unbalanced = stats.unbalanced_partitions,
            "first-element pivot degraded on ordered input; median-of-three avoids this"
        );
    }
    Ok(stats)
}

struct Quicksort<F> {
    compare: F,
    pivot: PivotStrategy,
    rng: Option<StdRng>,
    stats: SortStats,
}

impl<F> Quicksort<F> {
    fn cmp<E>(&mut self, a: E, b: E) -> Result<Ordering>
    where
        F: FnMut(E, E) -> Result<Ordering>,
    {
        self.stats.comparisons += 1;
        (self.compare)(a, b)
    }

    fn sort_range<E>(&mut self, v: &mut [E], mut low: usize, mut high: usize, depth: usize) -> Result<()>
    where
        E: Copy,
        F: FnMut(E, E) -> Result<Ordering>,
    {
        self.stats.max_depth = self.stats.max_depth.max(depth);

        while low < high {
            self.move_pivot_to_front(v, low, high)?;
            let position = self.partition(v, low, high)?;

            let left_len = position - low;
            let right_len = high - position;
            if left_len == 0 || right_len == 0 {
                self.stats.unbalanced_partitions += 1;
            }

            if left_len < right_len {
                if left_len > 1 {
                    self.sort_range(v, low, position - 1, depth + 1)?;
                }
                low = position + 1;
            } else {
                if right_len > 1 {
                    self.sort_range(v, position + 1, high, depth + 1)?;
                }
                match position.checked_sub(1) {
                    Some(next_high) => high = next_high,
                    None => break,
                }
            }
        }
        Ok(())
    }

    /// Lift `v[low]` out as the pivot and return the index it settles at.
    fn partition<E>(&mut self, v: &mut [E], mut low: usize, mut high: usize) -> Result<usize>
    where
        E: Copy,
        F: FnMut(E, E) -> Result<Ordering>,
    {
        self.stats.partitions += 1;
        let key = v[low];
        while low < high {
            while low < high && self.cmp(v[high], key)? != Ordering::Less {
                high -= 1;
            }
            v[low] = v[high];
            while low < high && self.cmp(v[low], key)? != Ordering::Greater {
                low += 1;
            }
            v[high] = v[low];
        }
        v[low] = key;
        trace!(position = low, "partitioned");
        Ok(low)
    }

    fn move_pivot_to_front<E>(&mut self, v: &mut [E], low: usize, high: usize) -> Result<()>
    where
        E: Copy,
        F: FnMut(E, E) -> Result<Ordering>,
    {
        let chosen = match self.pivot {
            PivotStrategy::First => low,
            PivotStrategy::MedianOfThree if high - low >= 2 => {
                let mid = low + (high - low) / 2;
                self.median_of_three(v, low, mid, high)?
            }
            PivotStrategy::MedianOfThree => low,
            PivotStrategy::Random => match self.rng.as_mut() {
                Some(rng) => rng.random_range(low..=high),
                None => low,
            },
        };
        if chosen != low {
            v.swap(low, chosen);
        }
        Ok(())
    }

    fn median_of_three<E>(&mut self, v: &[E], a: usize, b: usize, c: usize) -> Result<usize>
    where
        E: Copy,
        F: FnMut(E, E) -> Result<Ordering>,
    {
        let ab = self.cmp(v[a], v[b])?;
        let bc = self.cmp(v[b], v[c])?;
        if ab != Ordering::Greater && bc != Ordering::Greater {
            return Ok(b);
        }
        if ab != Ordering::Less && bc != Ordering::Less {
            return Ok(b);
        }
        let ac = self.cmp(v[a], v[c])?;
        // b is an extreme; the median is whichever of a and c lies between
        if ab == Ordering::Greater {
            // b < a, b < c
            Ok(if ac == Ordering::Greater { c } else { a })
        } else {
            // b > a, b > c
            Ok(if ac == Ordering::Greater { a } else { c })
        }
    }
}
