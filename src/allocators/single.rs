//! Single-resource absorption (MarDecUn).
//!
//! When no upper limit binds, a cost model with decreasing marginal
//! costs is best served by giving every task above the lower limits to
//! one resource. The resource is picked by comparing, for each resource,
//! the cost of absorbing all remaining tasks at once.
//!
//! # Complexity
//! O(R)

use tracing::debug;

use super::Allocator;
use crate::models::{AllocationProblem, Assignment, CostTable};

/// Closed-form allocator for problems without binding upper limits.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarDecUn;

impl Allocator for MarDecUn {
    fn name(&self) -> &'static str {
        "MarDecUn"
    }

    fn allocate(&self, problem: &AllocationProblem<'_>) -> Assignment {
        mardecun(problem.tasks, problem.costs, problem.lower())
    }

    fn description(&self) -> &'static str {
        "Marginal Decreasing, unlimited resources"
    }
}

/// Gives every task above the lower limits to the cheapest single resource.
///
/// Upper limits are not consulted.
///
/// # Example
/// ```
/// use u_allocate::allocators::mardecun;
/// use u_allocate::models::CostTable;
///
/// let costs = CostTable::from_rows(vec![
///     vec![0.0, 4.0, 7.0, 9.0, 10.0],
///     vec![0.0, 3.0, 6.0, 9.0, 12.0],
///     vec![0.0, 3.0, 5.0, 7.0, 8.5],
/// ]).unwrap();
/// let a = mardecun(6, &costs, &[1, 1, 1]);
/// assert_eq!(a.counts(), &[1, 1, 4]);
/// ```
pub fn mardecun(tasks: usize, costs: &CostTable, lower: &[usize]) -> Assignment {
    let mut assignment = Assignment::new(lower.to_vec());
    let extra = tasks.saturating_sub(assignment.total());
    debug!(tasks, resources = lower.len(), extra, "MarDecUn allocation");

    if let Some((resource, _)) = cheapest_absorber(costs, lower, 0..lower.len(), extra) {
        assignment[resource] += extra;
    }
    assignment
}

/// Among `candidates`, the resource whose cost grows least when it takes
/// `extra` tasks above its lower limit, with that growth.
///
/// The first candidate wins ties. `None` only for an empty candidate set.
pub(crate) fn cheapest_absorber(
    costs: &CostTable,
    lower: &[usize],
    candidates: impl IntoIterator<Item = usize>,
    extra: usize,
) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for resource in candidates {
        let delta = costs.delta(resource, lower[resource], lower[resource] + extra);
        if best.map_or(true, |(_, cost)| delta < cost) {
            best = Some((resource, delta));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_costs() -> CostTable {
        CostTable::from_rows(vec![
            vec![0.0, 4.0, 7.0, 9.0, 10.0],
            vec![0.0, 3.0, 6.0, 9.0, 12.0],
            vec![0.0, 3.0, 5.0, 7.0, 8.5],
        ])
        .unwrap()
    }

    #[test]
    fn test_mardecun_reference_case() {
        let a = mardecun(6, &sample_costs(), &[1, 1, 1]);
        assert_eq!(a.counts(), &[1, 1, 4]);
    }

    #[test]
    fn test_no_extra_tasks() {
        let a = mardecun(3, &sample_costs(), &[1, 1, 1]);
        assert_eq!(a.counts(), &[1, 1, 1]);
    }

    #[test]
    fn test_cheapest_absorber_first_wins_ties() {
        let costs = CostTable::from_rows(vec![vec![0.0, 2.0], vec![0.0, 1.0], vec![0.0, 1.0]]).unwrap();
        assert_eq!(
            cheapest_absorber(&costs, &[0, 0, 0], 0..3, 1),
            Some((1, 1.0))
        );
        assert_eq!(cheapest_absorber(&costs, &[0, 0, 0], [2, 1], 1), Some((2, 1.0)));
        assert_eq!(cheapest_absorber(&costs, &[0, 0, 0], [], 1), None);
    }

    #[test]
    fn test_absorber_measures_from_lower_limit() {
        // Resource 0 is cheap from zero but dear from its lower limit.
        let costs = CostTable::from_rows(vec![
            vec![0.0, 0.5, 9.0, 20.0],
            vec![0.0, 3.0, 6.0, 9.0],
        ])
        .unwrap();
        let a = mardecun(3, &costs, &[1, 1]);
        assert_eq!(a.counts(), &[1, 2]);
    }

    #[test]
    fn test_trait_matches_function() {
        let costs = sample_costs();
        let limits = crate::models::Limits::uniform(3, 1, 4);
        let problem = AllocationProblem::new(6, &costs, &limits);
        assert_eq!(MarDecUn.allocate(&problem).counts(), &[1, 1, 4]);
    }
}
