//! Assignment (solution) model.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::CostTable;

/// Number of tasks given to each resource.
///
/// Produced fresh by every allocator call; the caller owns it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment(Vec<usize>);

impl Assignment {
    /// Wraps explicit per-resource counts.
    pub fn new(counts: Vec<usize>) -> Self {
        Self(counts)
    }

    /// `resources` zero counts.
    pub fn zeros(resources: usize) -> Self {
        Self(vec![0; resources])
    }

    /// Counts in resource order.
    #[inline]
    pub fn counts(&self) -> &[usize] {
        &self.0
    }

    /// Number of resources.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the assignment covers no resources.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total tasks assigned.
    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    /// Σ cost[i][assignment[i]].
    ///
    /// # Example
    /// ```
    /// use u_allocate::models::{Assignment, CostTable};
    ///
    /// let costs = CostTable::from_rows(vec![
    ///     vec![0.5, 0.5, 1.5],
    ///     vec![0.0, 0.4, 2.0],
    /// ]).unwrap();
    /// let a = Assignment::new(vec![2, 1]);
    /// assert!((a.total_cost(&costs) - 1.9).abs() < 1e-10);
    /// ```
    pub fn total_cost(&self, costs: &CostTable) -> f64 {
        self.0
            .iter()
            .enumerate()
            .map(|(resource, &tasks)| costs.get(resource, tasks))
            .sum()
    }

    /// Unwraps the counts.
    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

impl From<Vec<usize>> for Assignment {
    fn from(counts: Vec<usize>) -> Self {
        Self(counts)
    }
}

impl Index<usize> for Assignment {
    type Output = usize;

    fn index(&self, resource: usize) -> &usize {
        &self.0[resource]
    }
}

impl IndexMut<usize> for Assignment {
    fn index_mut(&mut self, resource: usize) -> &mut usize {
        &mut self.0[resource]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_costs() -> CostTable {
        CostTable::from_rows(vec![
            vec![0.5, 0.5, 1.5, 2.0, 200.0],
            vec![0.0, 0.4, 2.0, 3.0, 4.0],
            vec![0.0, 1.5, 2.5, 3.5, 4.5],
        ])
        .unwrap()
    }

    #[test]
    fn test_total_cost() {
        let costs = sample_costs();
        assert!((Assignment::zeros(3).total_cost(&costs) - 0.5).abs() < 1e-10);
        assert!((Assignment::new(vec![4, 4, 4]).total_cost(&costs) - 208.5).abs() < 1e-10);
        assert!((Assignment::new(vec![2, 1, 1]).total_cost(&costs) - 3.4).abs() < 1e-10);
    }

    #[test]
    fn test_total_and_indexing() {
        let mut a = Assignment::new(vec![3, 1, 4]);
        assert_eq!(a.total(), 8);
        a[1] += 2;
        assert_eq!(a[1], 3);
        assert_eq!(a.counts(), &[3, 3, 4]);
        assert_eq!(a.len(), 3);
        assert_eq!(a.into_inner(), vec![3, 3, 4]);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let a = Assignment::from(vec![4, 3, 3]);
        assert_eq!(serde_json::to_string(&a).unwrap(), "[4,3,3]");
    }
}
