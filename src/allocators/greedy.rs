//! Marginal-cost greedy allocators (MarIn, MarCo).
//!
//! Both start every resource at its lower limit and repeatedly hand work
//! to the resource with the cheapest next marginal cost, taken from a
//! [`MarginalQueue`]. Ties go to the lowest resource index.
//!
//! - **MarIn** places one task at a time and re-queues the resource with
//!   its new marginal cost. Optimal when every cost function has
//!   non-decreasing marginal cost.
//! - **MarCo** fills the chosen resource to its capacity in one step.
//!   Optimal when every cost function has constant marginal cost.
//!
//! Neither checks its cost assumption; violating it gives a valid but
//! possibly suboptimal assignment.
//!
//! # Reference
//! Pilla (2021), "Optimal Task Assignment for Heterogeneous Federated
//! Learning Devices", IPDPS, pp. 661-670 (OLAR)

use tracing::{debug, trace};

use super::queue::MarginalQueue;
use super::Allocator;
use crate::models::{AllocationProblem, Assignment, CostTable};

/// Unit-at-a-time marginal-cost greedy (increasing marginal costs).
#[derive(Debug, Clone, Copy, Default)]
pub struct MarIn;

impl Allocator for MarIn {
    fn name(&self) -> &'static str {
        "MarIn"
    }

    fn allocate(&self, problem: &AllocationProblem<'_>) -> Assignment {
        marin(problem.tasks, problem.costs, problem.lower(), problem.upper())
    }

    fn description(&self) -> &'static str {
        "Marginal Increasing (unit-step greedy)"
    }
}

/// Capacity-batch marginal-cost greedy (constant marginal costs).
#[derive(Debug, Clone, Copy, Default)]
pub struct MarCo;

impl Allocator for MarCo {
    fn name(&self) -> &'static str {
        "MarCo"
    }

    fn allocate(&self, problem: &AllocationProblem<'_>) -> Assignment {
        marco(problem.tasks, problem.costs, problem.lower(), problem.upper())
    }

    fn description(&self) -> &'static str {
        "Marginal Constant (capacity-batch greedy)"
    }
}

/// Assigns tasks one by one to the resource with the cheapest next task.
///
/// Runs exactly `tasks - Σlower` steps. If the queue runs dry first
/// (`tasks > Σupper`), the remaining tasks stay unassigned.
///
/// # Example
/// ```
/// use u_allocate::allocators::marin;
/// use u_allocate::models::CostTable;
///
/// let costs = CostTable::from_rows(vec![
///     vec![0.1, 1.1, 3.1, 7.1, 12.1],
///     vec![0.0, 1.5, 4.0, 7.5, 11.5],
///     vec![0.0, 2.0, 4.5, 7.5, 10.5],
/// ]).unwrap();
/// let a = marin(8, &costs, &[1, 1, 1], &[4, 4, 4]);
/// assert_eq!(a.counts(), &[2, 2, 4]);
/// ```
pub fn marin(tasks: usize, costs: &CostTable, lower: &[usize], upper: &[usize]) -> Assignment {
    let mut assignment = Assignment::new(lower.to_vec());
    let mut queue: MarginalQueue = (0..lower.len())
        .filter(|&i| lower[i] < upper[i])
        .map(|i| (i, costs.delta(i, lower[i], lower[i] + 1)))
        .collect();

    let steps = tasks.saturating_sub(assignment.total());
    debug!(tasks, resources = lower.len(), steps, "MarIn allocation");

    for _ in 0..steps {
        let Some((resource, _)) = queue.pop() else {
            debug!(queued = queue.len(), "MarIn ran out of capacity");
            break;
        };
        assignment[resource] += 1;

        let count = assignment[resource];
        if count < upper[resource] {
            queue.push(resource, costs.delta(resource, count, count + 1));
        }
    }

    trace!(assignment = ?assignment.counts(), "MarIn done");
    assignment
}

/// Fills the cheapest resources to capacity, cheapest first.
///
/// A resource's marginal cost is taken once, as `C_i(1) - C_i(0)`, and
/// the chosen resource receives `min(upper - lower, tasks left)` tasks.
///
/// # Example
/// ```
/// use u_allocate::allocators::marco;
/// use u_allocate::models::CostTable;
///
/// let costs = CostTable::from_rows(vec![
///     vec![0.1, 1.1, 2.1, 3.1, 4.1],
///     vec![0.0, 1.5, 3.0, 4.5, 6.0],
///     vec![0.0, 2.0, 4.0, 6.0, 8.0],
/// ]).unwrap();
/// let a = marco(8, &costs, &[1, 1, 1], &[4, 4, 4]);
/// assert_eq!(a.counts(), &[4, 3, 1]);
/// ```
pub fn marco(tasks: usize, costs: &CostTable, lower: &[usize], upper: &[usize]) -> Assignment {
    let mut assignment = Assignment::new(lower.to_vec());
    let mut queue: MarginalQueue = (0..lower.len())
        .filter(|&i| lower[i] < upper[i])
        .map(|i| (i, costs.delta(i, 0, 1)))
        .collect();

    let mut assigned = assignment.total();
    debug!(tasks, resources = lower.len(), assigned, "MarCo allocation");

    while assigned < tasks {
        let Some((resource, _)) = queue.pop() else {
            debug!(assigned, "MarCo ran out of capacity");
            break;
        };
        let batch = (upper[resource] - lower[resource]).min(tasks - assigned);
        assignment[resource] += batch;
        assigned += batch;
    }

    trace!(assignment = ?assignment.counts(), "MarCo done");
    assignment
}
