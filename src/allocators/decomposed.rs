//! Hybrid decomposition (MarDec).
//!
//! # Algorithm
//!
//! Let `d = tasks - Σlower` be the demand above the lower limits. Resources
//! split into
//! - **limited** (`upper - lower < d`): capacity can bind, and
//! - **unlimited** (`upper - lower >= d`): any share of `d` fits.
//!
//! Two families of candidates are evaluated and the cheapest is kept:
//!
//! 1. An unlimited resource takes `t` extra tasks (the cheapest one for
//!    that `t`), the limited resources share `d - t`.
//! 2. One limited resource takes `t < capacity` extra tasks, the other
//!    limited resources share `d - t`.
//!
//! Limited resources sharing a demand go through a *restricted* DP: each
//! takes either nothing or its full capacity, never an intermediate
//! amount. This keeps the state space small at the price of optimality.
//!
//! # Complexity
//! O(R · |limited| · d): one restricted DP for family 1 and one per
//! excluded limited resource for family 2.

use tracing::{debug, trace};

use super::single::cheapest_absorber;
use super::table::DpTable;
use super::Allocator;
use crate::models::{AllocationProblem, Assignment, CostTable};

/// Decomposition allocator mixing restricted DP and closed-form choices.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarDec;

impl Allocator for MarDec {
    fn name(&self) -> &'static str {
        "MarDec"
    }

    fn allocate(&self, problem: &AllocationProblem<'_>) -> Assignment {
        mardec(problem.tasks, problem.costs, problem.lower(), problem.upper())
    }

    fn description(&self) -> &'static str {
        "Marginal Decreasing with limited and unlimited resources"
    }
}

/// Best candidate found so far.
struct Incumbent {
    cost: f64,
    assignment: Assignment,
}

impl Incumbent {
    /// Replaces the incumbent when `cost` is strictly lower.
    ///
    /// `build` runs only for accepted candidates.
    fn offer(&mut self, cost: f64, build: impl FnOnce() -> Assignment) {
        if cost < self.cost {
            self.cost = cost;
            self.assignment = build();
        }
    }
}

/// Allocates with the limited/unlimited decomposition.
///
/// # Example
/// ```
/// use u_allocate::allocators::mardec;
/// use u_allocate::models::CostTable;
///
/// let costs = CostTable::from_rows(vec![
///     vec![0.0, 4.0, 7.0, 9.0, 10.0],
///     vec![0.0, 3.0, 6.0, 9.0, 12.0],
///     vec![0.0, 3.0, 5.0, 7.0, 8.5],
///     vec![0.0, 4.0, 7.0, 10.0, 11.0],
/// ]).unwrap();
/// let a = mardec(6, &costs, &[1, 1, 1, 0], &[4, 3, 4, 2]);
/// assert_eq!(a.counts(), &[1, 1, 4, 0]);
/// ```
pub fn mardec(tasks: usize, costs: &CostTable, lower: &[usize], upper: &[usize]) -> Assignment {
    let demand = tasks.saturating_sub(lower.iter().sum());
    let (limited, unlimited): (Vec<usize>, Vec<usize>) =
        (0..lower.len()).partition(|&i| upper[i] - lower[i] < demand);
    debug!(
        tasks,
        demand,
        limited = limited.len(),
        unlimited = unlimited.len(),
        "MarDec allocation"
    );

    let mut best = Incumbent {
        cost: f64::INFINITY,
        assignment: Assignment::new(lower.to_vec()),
    };

    // Family 1: an unlimited resource absorbs an intermediate amount.
    if !unlimited.is_empty() {
        let table = restricted_table(demand, &limited, costs, lower, upper);
        for extra in 0..=demand {
            let Some((resource, delta)) =
                cheapest_absorber(costs, lower, unlimited.iter().copied(), extra)
            else {
                continue;
            };
            let shared = demand - extra;
            best.offer(delta + table.final_cost(shared), || {
                let mut assignment = translate(&table, lower, shared, &limited);
                assignment[resource] += extra;
                assignment
            });
        }
    }

    // Family 2: a limited resource absorbs an intermediate amount.
    for (position, &excluded) in limited.iter().enumerate() {
        let others: Vec<usize> = limited
            .iter()
            .enumerate()
            .filter(|&(p, _)| p != position)
            .map(|(_, &r)| r)
            .collect();
        let table = restricted_table(demand, &others, costs, lower, upper);

        let base = lower[excluded];
        let bound = (demand + 1).min(upper[excluded] - base);
        for extra in 0..bound {
            let shared = demand - extra;
            let delta = costs.delta(excluded, base, base + extra);
            best.offer(delta + table.final_cost(shared), || {
                let mut assignment = translate(&table, lower, shared, &others);
                assignment[excluded] += extra;
                assignment
            });
        }
    }

    trace!(cost = best.cost, assignment = ?best.assignment.counts(), "MarDec done");
    best.assignment
}

/// Builds the restricted DP over `resources` for extra counts `0..=demand`.
///
/// Row `r + 1` offers `resources[r]` exactly two options: zero extra tasks
/// (the previous row carried forward) or its whole capacity
/// `upper - lower` at cost `C(upper) - C(lower)`.
fn restricted_table(
    demand: usize,
    resources: &[usize],
    costs: &CostTable,
    lower: &[usize],
    upper: &[usize],
) -> DpTable {
    let mut table = DpTable::new(resources.len(), demand);
    for (row, &resource) in resources.iter().enumerate() {
        let row = row + 1;
        let capacity = upper[resource] - lower[resource];
        table.carry_forward(row);
        table.relax(row, capacity, costs.delta(resource, lower[resource], upper[resource]));
    }
    table
}

/// Turns a restricted DP solution for `demand` extra tasks into an
/// assignment: lower limits plus each listed resource's extra tasks.
fn translate(table: &DpTable, lower: &[usize], demand: usize, resources: &[usize]) -> Assignment {
    let mut assignment = Assignment::new(lower.to_vec());
    for (&resource, extra) in resources.iter().zip(table.backtrack(demand)) {
        assignment[resource] += extra;
    }
    assignment
}
