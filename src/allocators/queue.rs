//! Min-priority queue of marginal costs.
//!
//! Entries are ordered by marginal cost, then by resource index, so the
//! lowest index wins among equal costs. `BinaryHeap` alone does not
//! specify an order for equal keys; the index makes it total.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

#[derive(Debug, Clone, Copy)]
struct Entry {
    cost: f64,
    resource: usize,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .total_cmp(&other.cost)
            .then_with(|| self.resource.cmp(&other.resource))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

/// `(marginal cost, resource)` min-heap used by the greedy allocators.
#[derive(Debug, Clone, Default)]
pub(crate) struct MarginalQueue {
    heap: BinaryHeap<Reverse<Entry>>,
}

impl MarginalQueue {
    /// Adds a resource with its next marginal cost.
    pub(crate) fn push(&mut self, resource: usize, cost: f64) {
        self.heap.push(Reverse(Entry {
            cost: normalize(cost),
            resource,
        }));
    }

    /// Removes the cheapest entry as `(resource, cost)`.
    pub(crate) fn pop(&mut self) -> Option<(usize, f64)> {
        self.heap
            .pop()
            .map(|Reverse(entry)| (entry.resource, entry.cost))
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}

impl FromIterator<(usize, f64)> for MarginalQueue {
    fn from_iter<I: IntoIterator<Item = (usize, f64)>>(iter: I) -> Self {
        let entries: Vec<_> = iter
            .into_iter()
            .map(|(resource, cost)| {
                Reverse(Entry {
                    cost: normalize(cost),
                    resource,
                })
            })
            .collect();
        Self {
            heap: BinaryHeap::from(entries),
        }
    }
}

/// Maps -0.0 to +0.0 so the two compare equal under `total_cmp`.
#[inline]
fn normalize(cost: f64) -> f64 {
    cost + 0.0
}
