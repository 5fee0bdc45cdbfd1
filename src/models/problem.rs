//! Allocation problem view.

use super::{CostTable, Limits};

/// Borrowed input of one allocation call.
///
/// Bundles the task total with the read-only cost table and limits so
/// every [`Allocator`](crate::allocators::Allocator) shares one signature.
/// Several threads may hold problems over the same table at once.
#[derive(Debug, Clone, Copy)]
pub struct AllocationProblem<'a> {
    /// Tasks to distribute.
    pub tasks: usize,
    /// Cost functions, one row per resource.
    pub costs: &'a CostTable,
    /// Per-resource bounds.
    pub limits: &'a Limits,
}

impl<'a> AllocationProblem<'a> {
    /// Creates a problem view.
    pub fn new(tasks: usize, costs: &'a CostTable, limits: &'a Limits) -> Self {
        Self {
            tasks,
            costs,
            limits,
        }
    }

    /// Number of resources.
    #[inline]
    pub fn resources(&self) -> usize {
        self.limits.len()
    }

    /// Lower limits.
    #[inline]
    pub fn lower(&self) -> &'a [usize] {
        &self.limits.lower
    }

    /// Upper limits.
    #[inline]
    pub fn upper(&self) -> &'a [usize] {
        &self.limits.upper
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let costs = CostTable::new(2, 5);
        let limits = Limits::uniform(2, 1, 4);
        let p = AllocationProblem::new(5, &costs, &limits);
        assert_eq!(p.resources(), 2);
        assert_eq!(p.lower(), &[1, 1]);
        assert_eq!(p.upper(), &[4, 4]);
        assert_eq!(p.tasks, 5);
    }
}
