//! Task allocators.
//!
//! Six strategies for splitting an integer number of tasks over resources
//! with tabulated costs and per-resource limits:
//!
//! | Allocator | Approach | Optimal when | Time |
//! |-----------|----------|--------------|------|
//! | [`Mc2Mkp`] | Full DP | always | O(R·T·w) |
//! | [`MarIn`] | Unit-step greedy | marginal costs non-decreasing | O(T log R) |
//! | [`MarCo`] | Capacity-batch greedy | marginal costs constant | O(R log R) |
//! | [`MarDecUn`] | Single absorber | no binding upper limit | O(R) |
//! | [`MarDec`] | Restricted DP + absorber | heuristic | O(R·\|Rlim\|·T) |
//! | [`FedAvg`] | Equal split | never (baseline) | O(R) |
//!
//! Every allocator is a pure function of its inputs: no state survives a
//! call, inputs are only read, and the returned [`Assignment`] is a fresh
//! allocation. Preconditions (`Σlower <= tasks <= Σupper`, cost rows
//! covering every reachable count) are not checked; use
//! [`crate::validation::check_preconditions`] beforehand when inputs are
//! untrusted.
//!
//! # Usage
//!
//! ```
//! use u_allocate::allocators::{Allocator, MarIn};
//! use u_allocate::models::{AllocationProblem, CostTable, Limits};
//!
//! let costs = CostTable::from_rows(vec![
//!     vec![0.0, 1.0, 3.0, 6.0],
//!     vec![0.0, 2.0, 4.0, 6.0],
//! ]).unwrap();
//! let limits = Limits::uniform(2, 0, 3);
//! let problem = AllocationProblem::new(3, &costs, &limits);
//!
//! let assignment = MarIn.allocate(&problem);
//! assert_eq!(assignment.total(), 3);
//! ```

mod baseline;
mod decomposed;
mod exact;
mod greedy;
mod queue;
mod single;
mod strategy;
mod table;

pub use baseline::{fedavg, FedAvg};
pub use decomposed::{mardec, MarDec};
pub use exact::{mc2mkp, Mc2Mkp};
pub use greedy::{marco, marin, MarCo, MarIn};
pub use single::{mardecun, MarDecUn};
pub use strategy::{ParseStrategyError, Strategy};

use crate::models::{AllocationProblem, Assignment};
use std::fmt::Debug;

/// A task allocation strategy.
///
/// Implementations hold no state; `allocate` may be called concurrently
/// from several threads on the same problem.
pub trait Allocator: Send + Sync + Debug {
    /// Allocator name (e.g., "MarIn", "FedAvg").
    fn name(&self) -> &'static str;

    /// Computes an assignment for `problem`.
    fn allocate(&self, problem: &AllocationProblem<'_>) -> Assignment;

    /// Allocator description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CostTable, Limits};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_concurrent_calls_share_inputs() {
        let costs = Arc::new(
            CostTable::from_rows(vec![
                vec![0.0, 4.0, 7.0, 9.0, 10.0],
                vec![0.0, 3.0, 6.0, 9.0, 12.0],
                vec![0.0, 3.0, 5.0, 7.0, 8.5],
                vec![0.0, 4.0, 7.0, 10.0, 11.0],
            ])
            .unwrap(),
        );
        let limits = Arc::new(Limits::new(vec![1, 1, 1, 0], vec![4, 3, 4, 2]).unwrap());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let costs = Arc::clone(&costs);
                let limits = Arc::clone(&limits);
                thread::spawn(move || {
                    let problem = AllocationProblem::new(6, &costs, &limits);
                    MarDec.allocate(&problem)
                })
            })
            .collect();

        for h in handles {
            assert_eq!(h.join().unwrap().counts(), &[1, 1, 4, 0]);
        }
    }

    #[test]
    fn test_descriptions_default_to_name() {
        #[derive(Debug)]
        struct Fixed;
        impl Allocator for Fixed {
            fn name(&self) -> &'static str {
                "Fixed"
            }
            fn allocate(&self, problem: &AllocationProblem<'_>) -> Assignment {
                Assignment::zeros(problem.resources())
            }
        }
        assert_eq!(Fixed.description(), "Fixed");
        assert_ne!(Mc2Mkp.description(), Mc2Mkp.name());
    }
}
