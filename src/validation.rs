//! Validation of allocation inputs and results.
//!
//! Allocators never validate; these checks are for calling code.
//!
//! - [`verify`] checks a result: one entry per resource, the task total,
//!   and every count within its limits.
//! - [`check_preconditions`] checks an input before allocating:
//!   `Σlower <= tasks <= Σupper`, and cost rows long enough for every
//!   count the limits allow.
//!
//! Both collect every issue instead of stopping at the first one.

use thiserror::Error;

use crate::models::{AllocationProblem, Assignment};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Assignment and problem disagree on the number of resources.
    LengthMismatch,
    /// Assigned tasks do not add up to the task total.
    TotalMismatch,
    /// A resource received fewer tasks than its lower limit.
    BelowLowerLimit,
    /// A resource received more tasks than its upper limit.
    AboveUpperLimit,
    /// No assignment can satisfy the limits for this task total.
    Infeasible,
    /// The cost table does not cover a count the limits allow.
    InsufficientCoverage,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Whether exactly `tasks` tasks were assigned.
pub fn check_total_assigned(tasks: usize, assignment: &Assignment) -> bool {
    assignment.total() == tasks
}

/// Whether every count lies within `[lower[i], upper[i]]`.
pub fn check_limits(assignment: &Assignment, lower: &[usize], upper: &[usize]) -> bool {
    assignment.len() == lower.len()
        && assignment
            .counts()
            .iter()
            .zip(lower.iter().zip(upper))
            .all(|(&count, (&lo, &hi))| lo <= count && count <= hi)
}

/// Verifies an allocation result against its problem.
///
/// Checks:
/// 1. One count per resource
/// 2. Counts add up to `problem.tasks`
/// 3. Every count within its lower/upper limit
///
/// # Example
/// ```
/// use u_allocate::allocators::mc2mkp;
/// use u_allocate::models::{AllocationProblem, CostTable, Limits};
/// use u_allocate::validation::verify;
///
/// let costs = CostTable::from_rows(vec![vec![0.0, 1.0, 3.0], vec![0.0, 2.0, 3.0]]).unwrap();
/// let limits = Limits::uniform(2, 0, 2);
/// let a = mc2mkp(2, &costs, &limits.lower, &limits.upper);
/// assert!(verify(&AllocationProblem::new(2, &costs, &limits), &a).is_ok());
/// ```
pub fn verify(problem: &AllocationProblem<'_>, assignment: &Assignment) -> ValidationResult {
    let mut errors = Vec::new();

    if assignment.len() != problem.resources() {
        errors.push(ValidationError::new(
            ValidationErrorKind::LengthMismatch,
            format!(
                "Assignment covers {} resources, problem has {}",
                assignment.len(),
                problem.resources()
            ),
        ));
    }

    let total = assignment.total();
    if total != problem.tasks {
        errors.push(ValidationError::new(
            ValidationErrorKind::TotalMismatch,
            format!("Assigned {} tasks, expected {}", total, problem.tasks),
        ));
    }

    let limits = problem.lower().iter().zip(problem.upper());
    for (resource, (&count, (&lower, &upper))) in assignment.counts().iter().zip(limits).enumerate()
    {
        if count < lower {
            errors.push(ValidationError::new(
                ValidationErrorKind::BelowLowerLimit,
                format!("Resource {resource} has {count} tasks, lower limit is {lower}"),
            ));
        }
        if count > upper {
            errors.push(ValidationError::new(
                ValidationErrorKind::AboveUpperLimit,
                format!("Resource {resource} has {count} tasks, upper limit is {upper}"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Checks that a problem satisfies the allocators' preconditions.
///
/// Checks:
/// 1. `Σlower <= tasks <= Σupper`
/// 2. Limits and cost table describe the same number of resources
/// 3. Each cost row covers `min(upper[i], tasks)`
pub fn check_preconditions(problem: &AllocationProblem<'_>) -> ValidationResult {
    let mut errors = Vec::new();
    let limits = problem.limits;

    let lower_sum = limits.lower_sum();
    let upper_sum = limits.upper_sum();
    if lower_sum > problem.tasks || upper_sum < problem.tasks {
        errors.push(ValidationError::new(
            ValidationErrorKind::Infeasible,
            format!(
                "{} tasks cannot satisfy limits summing to [{lower_sum}, {upper_sum}]",
                problem.tasks
            ),
        ));
    }

    if problem.costs.resources() != problem.resources() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InsufficientCoverage,
            format!(
                "Cost table has {} rows for {} resources",
                problem.costs.resources(),
                problem.resources()
            ),
        ));
    }

    let covered = problem.costs.max_tasks();
    for resource in 0..problem.resources().min(problem.costs.resources()) {
        let needed = limits.upper[resource].min(problem.tasks);
        if needed > covered {
            errors.push(ValidationError::new(
                ValidationErrorKind::InsufficientCoverage,
                format!("Resource {resource} may take {needed} tasks, costs cover {covered}"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CostTable, Limits};

    #[test]
    fn test_check_limits() {
        let a = Assignment::new(vec![4, 4, 4]);
        assert!(check_limits(&a, &[1, 1, 1], &[5, 5, 5]));
        assert!(check_limits(&a, a.counts(), a.counts()));
        assert!(!check_limits(&Assignment::new(vec![0, 4, 4]), &[1, 1, 1], &[5, 5, 5]));
        assert!(!check_limits(&Assignment::new(vec![4, 4, 6]), &[1, 1, 1], &[5, 5, 5]));
        assert!(!check_limits(&Assignment::new(vec![0, 4, 6]), &[1, 1, 1], &[5, 5, 5]));
        assert!(!check_limits(&Assignment::new(vec![4, 4]), &[1, 1, 1], &[5, 5, 5]));
    }

    #[test]
    fn test_check_total_assigned() {
        let a = Assignment::new(vec![4, 4, 4]);
        assert!(check_total_assigned(12, &a));
        assert!(!check_total_assigned(13, &a));
        assert!(!check_total_assigned(11, &a));
    }

    #[test]
    fn test_verify_valid() {
        let costs = CostTable::new(3, 8);
        let limits = Limits::uniform(3, 1, 4);
        let problem = AllocationProblem::new(8, &costs, &limits);
        assert!(verify(&problem, &Assignment::new(vec![3, 1, 4])).is_ok());
    }

    #[test]
    fn test_verify_collects_all_errors() {
        let costs = CostTable::new(3, 8);
        let limits = Limits::uniform(3, 1, 4);
        let problem = AllocationProblem::new(8, &costs, &limits);

        let errors = verify(&problem, &Assignment::new(vec![0, 5, 1])).unwrap_err();
        let kinds: Vec<_> = errors.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ValidationErrorKind::TotalMismatch,
                ValidationErrorKind::BelowLowerLimit,
                ValidationErrorKind::AboveUpperLimit,
            ]
        );
        assert_eq!(errors[0].to_string(), "Assigned 6 tasks, expected 8");
    }

    #[test]
    fn test_verify_length_mismatch() {
        let costs = CostTable::new(3, 8);
        let limits = Limits::uniform(3, 0, 8);
        let problem = AllocationProblem::new(8, &costs, &limits);
        let errors = verify(&problem, &Assignment::new(vec![8])).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::LengthMismatch));
    }

    #[test]
    fn test_preconditions_ok() {
        let costs = CostTable::new(3, 4);
        let limits = Limits::uniform(3, 1, 4);
        assert!(check_preconditions(&AllocationProblem::new(8, &costs, &limits)).is_ok());
    }

    #[test]
    fn test_preconditions_infeasible() {
        let costs = CostTable::new(3, 20);
        let limits = Limits::uniform(3, 1, 4);
        let too_many = check_preconditions(&AllocationProblem::new(13, &costs, &limits)).unwrap_err();
        assert!(too_many
            .iter()
            .any(|e| e.kind == ValidationErrorKind::Infeasible));
        let too_few = check_preconditions(&AllocationProblem::new(2, &costs, &limits)).unwrap_err();
        assert!(too_few
            .iter()
            .any(|e| e.kind == ValidationErrorKind::Infeasible));
    }

    #[test]
    fn test_preconditions_coverage() {
        let costs = CostTable::new(2, 3);
        let limits = Limits::uniform(3, 0, 5);
        let errors = check_preconditions(&AllocationProblem::new(5, &costs, &limits)).unwrap_err();
        // One row missing, two rows too short.
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::InsufficientCoverage)
                .count(),
            3
        );
    }
}
