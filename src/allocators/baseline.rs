//! Cost-oblivious equal split (FedAvg).
//!
//! # Reference
//! McMahan et al. (2017), "Communication-Efficient Learning of Deep
//! Networks from Decentralized Data", AISTATS, pp. 1273-1282

use tracing::debug;

use super::Allocator;
use crate::models::{AllocationProblem, Assignment};

/// Equal-split baseline. Ignores costs and limits.
#[derive(Debug, Clone, Copy, Default)]
pub struct FedAvg;

impl Allocator for FedAvg {
    fn name(&self) -> &'static str {
        "FedAvg"
    }

    fn allocate(&self, problem: &AllocationProblem<'_>) -> Assignment {
        fedavg(problem.tasks, problem.resources())
    }

    fn description(&self) -> &'static str {
        "Federated Averaging equal split"
    }
}

/// Splits `tasks` as evenly as possible; the first `tasks % resources`
/// resources get one extra task.
///
/// # Example
/// ```
/// use u_allocate::allocators::fedavg;
///
/// assert_eq!(fedavg(10, 3).counts(), &[4, 3, 3]);
/// ```
pub fn fedavg(tasks: usize, resources: usize) -> Assignment {
    debug!(tasks, resources, "FedAvg allocation");
    if resources == 0 {
        return Assignment::default();
    }

    let share = tasks / resources;
    let leftover = tasks % resources;
    Assignment::new(
        (0..resources)
            .map(|i| if i < leftover { share + 1 } else { share })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fedavg_reference_case() {
        assert_eq!(fedavg(10, 3).counts(), &[4, 3, 3]);
    }

    #[test]
    fn test_even_split() {
        assert_eq!(fedavg(12, 4).counts(), &[3, 3, 3, 3]);
    }

    #[test]
    fn test_fewer_tasks_than_resources() {
        assert_eq!(fedavg(2, 5).counts(), &[1, 1, 0, 0, 0]);
    }

    #[test]
    fn test_no_resources() {
        assert!(fedavg(7, 0).is_empty());
    }

    #[test]
    fn test_balanced_and_complete() {
        for tasks in 0..50 {
            for resources in 1..9 {
                let a = fedavg(tasks, resources);
                let max = a.counts().iter().max().copied().unwrap_or(0);
                let min = a.counts().iter().min().copied().unwrap_or(0);
                assert_eq!(a.total(), tasks);
                assert!(max - min <= 1);
            }
        }
    }
}
