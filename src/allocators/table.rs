//! Dynamic-programming support tables.
//!
//! `K` (minimal cumulative cost) and `I` (count chosen for the last
//! resource of the prefix) share one contiguous arena of
//! `(resources + 1) × (tasks + 1)` cells. Row 0 is the empty prefix:
//! cost 0 for zero tasks, +∞ for anything else. Row `r` covers the
//! first `r` resources of whatever ordering the caller uses.

/// Cost/choice arena for one allocation call.
#[derive(Debug, Clone)]
pub(crate) struct DpTable {
    rows: usize,
    columns: usize,
    cost: Vec<f64>,
    choice: Vec<usize>,
}

impl DpTable {
    /// Creates a table for `resources` resources and counts `0..=tasks`.
    pub(crate) fn new(resources: usize, tasks: usize) -> Self {
        let rows = resources + 1;
        let columns = tasks + 1;
        let mut cost = vec![f64::INFINITY; rows * columns];
        cost[0] = 0.0;
        Self {
            rows,
            columns,
            cost,
            choice: vec![0; rows * columns],
        }
    }

    #[inline]
    fn index(&self, row: usize, t: usize) -> usize {
        row * self.columns + t
    }

    /// Number of resource rows (excluding the empty prefix).
    #[inline]
    pub(crate) fn resources(&self) -> usize {
        self.rows - 1
    }

    /// K[row][t].
    #[inline]
    pub(crate) fn cost(&self, row: usize, t: usize) -> f64 {
        self.cost[self.index(row, t)]
    }

    /// I[row][t].
    #[inline]
    pub(crate) fn choice(&self, row: usize, t: usize) -> usize {
        self.choice[self.index(row, t)]
    }

    /// Minimal cost of placing `t` tasks over all resources.
    #[inline]
    pub(crate) fn final_cost(&self, t: usize) -> f64 {
        self.cost(self.resources(), t)
    }

    /// Copies the costs of `row - 1` into `row` (choosing zero for every count).
    pub(crate) fn carry_forward(&mut self, row: usize) {
        let (before, after) = self.cost.split_at_mut(row * self.columns);
        after[..self.columns].copy_from_slice(&before[(row - 1) * self.columns..]);
    }

    /// Offers `count` tasks at cost `cost` to the resource of `row`.
    ///
    /// For every cumulative total `t >= count`, keeps
    /// `K[row-1][t-count] + cost` if it strictly improves `K[row][t]`.
    /// Calling this with ascending `count` makes the lowest count win ties.
    pub(crate) fn relax(&mut self, row: usize, count: usize, cost: f64) {
        for t in count..self.columns {
            let candidate = self.cost(row - 1, t - count) + cost;
            let cell = self.index(row, t);
            if candidate < self.cost[cell] {
                self.cost[cell] = candidate;
                self.choice[cell] = count;
            }
        }
    }

    /// Walks the choice table back from `(last row, tasks)`.
    ///
    /// Returns the count chosen for every resource row, in row order.
    pub(crate) fn backtrack(&self, tasks: usize) -> Vec<usize> {
        let mut counts = vec![0; self.resources()];
        let mut t = tasks;
        for row in (1..self.rows).rev() {
            let count = self.choice(row, t);
            counts[row - 1] = count;
            t -= count;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_prefix() {
        let table = DpTable::new(0, 3);
        assert_eq!(table.resources(), 0);
        assert_eq!(table.final_cost(0), 0.0);
        assert!(table.final_cost(1).is_infinite());
        assert!(table.backtrack(0).is_empty());
    }

    #[test]
    fn test_relax_keeps_first_strict_improvement() {
        let mut table = DpTable::new(1, 2);
        table.relax(1, 1, 5.0);
        table.relax(1, 2, 5.0);
        table.relax(1, 1, 5.0); // equal cost never replaces
        assert_eq!(table.choice(1, 1), 1);
        assert_eq!(table.choice(1, 2), 2);
        assert!(table.cost(1, 0).is_infinite());
    }

    #[test]
    fn test_carry_forward_then_backtrack() {
        let mut table = DpTable::new(2, 3);
        table.relax(1, 0, 0.0);
        table.relax(1, 2, 4.0);
        table.carry_forward(2);
        table.relax(2, 1, 1.0);

        assert!((table.final_cost(3) - 5.0).abs() < 1e-10);
        assert_eq!(table.backtrack(3), vec![2, 1]);
        // Zero extra for the second resource comes from the carried row.
        assert_eq!(table.backtrack(2), vec![2, 0]);
    }

    #[test]
    fn test_nan_never_improves() {
        let mut table = DpTable::new(1, 1);
        table.relax(1, 0, f64::NAN);
        assert!(table.cost(1, 0).is_infinite());
    }
}
