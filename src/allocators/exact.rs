//! Exact allocation by dynamic programming ((MC)²MKP).
//!
//! # Algorithm
//!
//! Forward DP over resource prefixes and cumulative task counts:
//!
//! ```text
//! K[i][t] = min_{lower_i <= j <= upper_i} K[i-1][t-j] + C_i(j)
//! ```
//!
//! `j` is scanned in ascending order and only strict improvements are
//! kept, so the lowest count wins ties. The assignment is recovered by
//! walking the choice table `I` back from `K[R][tasks]`.
//!
//! # Complexity
//! O(R · T · w) time, O(R · T) space, where w is the widest limit range.
//!
//! # Reference
//! Pilla (2023), "Scheduling Algorithms for Federated Learning with
//! Minimal Energy Consumption", IEEE TPDS (the (MC)²MKP formulation)

use tracing::debug;

use super::table::DpTable;
use super::Allocator;
use crate::models::{AllocationProblem, Assignment, CostTable};

/// Optimal allocator for arbitrary cost tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mc2Mkp;

impl Allocator for Mc2Mkp {
    fn name(&self) -> &'static str {
        "(MC)2MKP"
    }

    fn allocate(&self, problem: &AllocationProblem<'_>) -> Assignment {
        mc2mkp(problem.tasks, problem.costs, problem.lower(), problem.upper())
    }

    fn description(&self) -> &'static str {
        "Multiple-Choice Minimum-Cost Maximal Knapsack Packing (exact DP)"
    }
}

/// Finds a minimum-cost assignment of `tasks` tasks.
///
/// Requires `Σlower <= tasks <= Σupper` and a cost table covering
/// `0..=tasks` for every resource. Infeasible input yields an
/// unspecified assignment rather than an error.
///
/// # Example
/// ```
/// use u_allocate::allocators::mc2mkp;
/// use u_allocate::models::CostTable;
///
/// let costs = CostTable::from_rows(vec![
///     vec![0.0, 3.0, 2.0, 4.0, 6.0],
///     vec![0.0, 1.0, 5.0, 2.0, 3.0],
///     vec![0.0, 8.0, 6.0, 4.0, 2.0],
/// ]).unwrap();
/// let a = mc2mkp(8, &costs, &[1, 1, 1], &[4, 4, 4]);
/// assert_eq!(a.counts(), &[3, 1, 4]);
/// ```
pub fn mc2mkp(tasks: usize, costs: &CostTable, lower: &[usize], upper: &[usize]) -> Assignment {
    let resources = lower.len();
    debug!(tasks, resources, "(MC)2MKP allocation");

    let mut table = DpTable::new(resources, tasks);
    for i in 0..resources {
        // Counts above `tasks` can never be part of a solution.
        let highest = upper[i].min(tasks);
        for j in lower[i]..=highest {
            table.relax(i + 1, j, costs.get(i, j));
        }
    }

    Assignment::new(table.backtrack(tasks))
}
