//! Experiment driver.
//!
//! For every resource count a cost table covering the largest task count
//! is generated once; every task count then reuses it. Cost runs are
//! verified; timing runs are not, since the same problem was already
//! checked by a cost run or is allowed to break limits (MarDecUn).

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::hint::black_box;
use std::io::Write;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::{ExperimentConfig, ExperimentError, Measure, ResultLogger, ResultRow};
use crate::allocators::Strategy;
use crate::generators::generate_table;
use crate::models::{AllocationProblem, Assignment};
use crate::validation::{check_total_assigned, verify};

/// Outcome of [`run_experiment`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Rows written.
    pub rows: usize,
    /// Results that failed verification.
    pub failures: usize,
}

/// Runs every configured strategy on every grid point and records one row
/// per run (per sample when timing).
///
/// Results that fail verification are reported with `warn!` and still
/// recorded.
pub fn run_experiment<W: Write>(
    config: &ExperimentConfig,
    logger: &mut ResultLogger<W>,
) -> Result<RunSummary, ExperimentError> {
    config.validate()?;
    let mut summary = RunSummary::default();
    let mut round: u64 = 0;

    for &resources in &config.resources {
        info!(resources, curve = ?config.curve, "generating costs");
        let costs = generate_table(config.curve, resources, config.tasks.max, config.base_seed);

        for tasks in config.tasks.iter() {
            let limits = config.limits_for(resources, tasks);
            let problem = AllocationProblem::new(tasks, &costs, &limits);
            debug!(tasks, resources, "running grid point");

            match config.measure {
                Measure::TotalCost => {
                    for &strategy in &config.strategies {
                        let assignment = strategy.allocate(&problem);
                        if !accepted(strategy, &problem, &assignment) {
                            summary.failures += 1;
                        }
                        let row = ResultRow::new(
                            strategy,
                            tasks,
                            resources,
                            assignment.total_cost(&costs),
                        );
                        logger.store(&row)?;
                        summary.rows += 1;
                    }
                }
                Measure::Time {
                    samples,
                    repetitions,
                    shuffle_seed,
                } => {
                    for _ in 0..samples {
                        let mut order = config.strategies.clone();
                        let mut rng = SmallRng::seed_from_u64(shuffle_seed.wrapping_add(round));
                        order.shuffle(&mut rng);
                        round += 1;

                        for strategy in order {
                            let seconds = time_strategy(strategy, &problem, repetitions);
                            logger.store(&ResultRow::new(strategy, tasks, resources, seconds))?;
                            summary.rows += 1;
                        }
                    }
                }
            }
        }
        info!(resources, rows = summary.rows, "finished resource count");
    }

    logger.flush()?;
    Ok(summary)
}

/// Checks a result, logging every problem found. Strategies that ignore
/// limits are only checked for the task total.
fn accepted(
    strategy: Strategy,
    problem: &AllocationProblem<'_>,
    assignment: &Assignment,
) -> bool {
    if !strategy.respects_limits() {
        let ok = check_total_assigned(problem.tasks, assignment);
        if !ok {
            warn!(
                %strategy,
                tasks = problem.tasks,
                assigned = assignment.total(),
                "wrong task total"
            );
        }
        return ok;
    }

    match verify(problem, assignment) {
        Ok(()) => true,
        Err(errors) => {
            for error in &errors {
                warn!(%strategy, tasks = problem.tasks, resources = problem.resources(), "{error}");
            }
            false
        }
    }
}

/// Seconds spent on `repetitions` consecutive calls.
fn time_strategy(strategy: Strategy, problem: &AllocationProblem<'_>, repetitions: usize) -> f64 {
    let allocator = strategy.allocator();
    let start = Instant::now();
    for _ in 0..repetitions {
        black_box(allocator.allocate(black_box(problem)));
    }
    start.elapsed().as_secs_f64()
}
