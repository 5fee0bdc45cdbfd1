//! Synthetic cost functions.
//!
//! Generates reproducible cost rows for experiments and tests. Each row is
//! drawn from its own seeded [`SmallRng`], so a table built with
//! `base_seed` always has the same contents regardless of which resources
//! were generated before it.
//!
//! | Curve | Shape | Marginal cost |
//! |-------|-------|---------------|
//! | Linear | `a + b·x` | constant |
//! | Quadratic | `a + b·x + c·x²` | increasing |
//! | NLogN | `a + b·x·log2(x+1)` | increasing |
//! | LogN | `a + b·ln(x+1)` | decreasing |
//! | Recursive | `C(x) = C(x-1) + m·Πr` | increasing |
//! | Random | uniform noise | arbitrary |

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::models::CostTable;

/// Family of cost functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCurve {
    /// Fixed cost plus a constant price per task.
    Linear,
    /// Price per task grows linearly with the load.
    Quadratic,
    /// `x·log x` growth.
    NLogN,
    /// Logarithmic growth: each extra task is cheaper than the last.
    LogN,
    /// Each marginal cost is the previous one times a random ratio >= 1.
    Recursive,
    /// Independent uniform costs; neither monotone nor convex.
    Random,
}

impl CostCurve {
    /// Fills the row of `resource` in `table` for every covered task count.
    ///
    /// # Example
    /// ```
    /// use u_allocate::generators::CostCurve;
    /// use u_allocate::models::CostTable;
    ///
    /// let mut table = CostTable::new(1, 3);
    /// CostCurve::Linear.fill(0, &mut table, 0);
    /// let row = table.row(0);
    /// let step = row[1] - row[0];
    /// assert!((row[3] - row[2] - step).abs() < 1e-9);
    /// ```
    pub fn fill(self, seed: u64, table: &mut CostTable, resource: usize) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let row = table.row_mut(resource);
        let base = rng.random_range(1.0..10.0);

        match self {
            CostCurve::Linear => {
                let slope = rng.random_range(1.0..10.0);
                fill_with(row, |x| base + slope * x);
            }
            CostCurve::Quadratic => {
                let slope = rng.random_range(1.0..10.0);
                let curvature = rng.random_range(0.1..1.0);
                fill_with(row, |x| base + slope * x + curvature * x * x);
            }
            CostCurve::NLogN => {
                let scale = rng.random_range(1.0..10.0);
                fill_with(row, |x| base + scale * x * (x + 1.0).log2());
            }
            CostCurve::LogN => {
                let scale = rng.random_range(1.0..10.0);
                fill_with(row, |x| base + scale * (x + 1.0).ln());
            }
            CostCurve::Recursive => {
                let mut marginal = rng.random_range(1.0..10.0);
                let mut cost = base;
                for (t, slot) in row.iter_mut().enumerate() {
                    if t > 0 {
                        marginal *= rng.random_range(1.0..1.05);
                        cost += marginal;
                    }
                    *slot = cost;
                }
            }
            CostCurve::Random => {
                for slot in row.iter_mut() {
                    *slot = rng.random_range(0.0..base);
                }
            }
        }
    }

    /// Whether the curve has non-decreasing marginal costs.
    pub fn is_convex(self) -> bool {
        matches!(
            self,
            CostCurve::Linear | CostCurve::Quadratic | CostCurve::NLogN | CostCurve::Recursive
        )
    }
}

fn fill_with(row: &mut [f64], f: impl Fn(f64) -> f64) {
    for (t, slot) in row.iter_mut().enumerate() {
        *slot = f(t as f64);
    }
}

/// Builds a `resources × (max_tasks + 1)` table; resource `i` uses seed
/// `base_seed + i`.
pub fn generate_table(curve: CostCurve, resources: usize, max_tasks: usize, base_seed: u64) -> CostTable {
    let mut table = CostTable::new(resources, max_tasks);
    for (resource, seed) in (0..resources).zip(base_seed..) {
        curve.fill(seed, &mut table, resource);
    }
    table
}
