//! Experiment configuration.
//!
//! Configurations are plain serde structs, loadable from TOML:
//!
//! ```toml
//! description = "NLogN costs, half of the resources capped"
//! curve = "n_log_n"
//! base_seed = 200
//! resources = [10, 100]
//! lower_limit = 5
//! upper_limit = "capped_half"
//! strategies = ["mc2mkp", "marin", "marco", "mardec", "fedavg"]
//!
//! [tasks]
//! min = 1000
//! max = 5000
//! step = 100
//!
//! [measure]
//! kind = "total_cost"
//! ```

use serde::{Deserialize, Serialize};
use std::iter::StepBy;
use std::ops::RangeInclusive;
use std::path::Path;

use super::ExperimentError;
use crate::allocators::Strategy;
use crate::generators::CostCurve;
use crate::models::Limits;

/// Inclusive range of task counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRange {
    /// First task count.
    pub min: usize,
    /// Last task count (included when reached by `step`).
    pub max: usize,
    /// Distance between consecutive task counts.
    pub step: usize,
}

impl TaskRange {
    /// Creates a range `min, min + step, ...` up to `max`.
    pub fn new(min: usize, max: usize, step: usize) -> Self {
        Self { min, max, step }
    }

    /// A single task count.
    pub fn single(tasks: usize) -> Self {
        Self::new(tasks, tasks, 1)
    }

    /// Task counts in increasing order.
    ///
    /// `step` must be positive; [`ExperimentConfig::validate`] checks this.
    pub fn iter(&self) -> StepBy<RangeInclusive<usize>> {
        (self.min..=self.max).step_by(self.step.max(1))
    }
}

/// How upper limits are derived from the task and resource counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpperLimitRule {
    /// Every resource may take all tasks.
    #[default]
    Unlimited,
    /// The second half of the resources takes at most
    /// `2 * (tasks / resources)` tasks; the first half is unlimited.
    /// Once `resources * lower <= tasks` holds, the cap is at least twice
    /// the lower limit.
    CappedHalf,
}

/// What is recorded for each run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Measure {
    /// Total cost of the assignment.
    TotalCost,
    /// Wall-clock seconds for `repetitions` back-to-back calls, sampled
    /// `samples` times with the strategy order shuffled per sample.
    Time {
        samples: usize,
        repetitions: usize,
        shuffle_seed: u64,
    },
}

impl Measure {
    /// Column header of the recorded value.
    pub fn label(&self) -> &'static str {
        match self {
            Measure::TotalCost => "Total Cost",
            Measure::Time { .. } => "Time",
        }
    }
}

/// A complete experiment description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Free text written at the top of the result file.
    #[serde(default)]
    pub description: String,
    /// Cost function family.
    pub curve: CostCurve,
    /// Seed of resource 0; resource `i` uses `base_seed + i`.
    #[serde(default)]
    pub base_seed: u64,
    /// Resource counts to run.
    pub resources: Vec<usize>,
    /// Lower limit applied to every resource.
    #[serde(default)]
    pub lower_limit: usize,
    /// Upper limit rule.
    #[serde(default)]
    pub upper_limit: UpperLimitRule,
    /// Strategies to run, in recording order.
    pub strategies: Vec<Strategy>,
    /// Task counts to run.
    pub tasks: TaskRange,
    /// Recorded value.
    pub measure: Measure,
}

impl ExperimentConfig {
    /// Total cost with increasing marginal costs (`n log n`), lower limit
    /// 5, and the second half of the resources capped.
    pub fn increasing_marginal_costs() -> Self {
        Self {
            description: "Total cost with increasing marginal costs (n log n).\n\
                          Lower limit 5 per resource; resources in the second half \
                          are capped at 2 * tasks / resources."
                .to_string(),
            curve: CostCurve::NLogN,
            base_seed: 200,
            resources: vec![10, 100],
            tasks: TaskRange::new(1000, 5000, 100),
            lower_limit: 5,
            upper_limit: UpperLimitRule::CappedHalf,
            strategies: vec![
                Strategy::Mc2Mkp,
                Strategy::MarIn,
                Strategy::MarCo,
                Strategy::MarDec,
                Strategy::FedAvg,
            ],
            measure: Measure::TotalCost,
        }
    }

    /// Total cost with constant marginal costs, lower limit 5, no upper
    /// limits.
    pub fn constant_marginal_costs_no_upper_limit() -> Self {
        Self {
            description: "Total cost with constant marginal costs (linear).\n\
                          Lower limit 5 per resource; no upper limits."
                .to_string(),
            curve: CostCurve::Linear,
            base_seed: 500,
            resources: vec![10, 100],
            tasks: TaskRange::new(1000, 5000, 100),
            lower_limit: 5,
            upper_limit: UpperLimitRule::Unlimited,
            strategies: vec![
                Strategy::Mc2Mkp,
                Strategy::MarIn,
                Strategy::MarCo,
                Strategy::MarDecUn,
                Strategy::FedAvg,
            ],
            measure: Measure::TotalCost,
        }
    }

    /// Execution time for 2000 tasks over a growing number of resources.
    pub fn timing_with_fixed_tasks() -> Self {
        Self {
            description: "Execution time with 2000 tasks and 20 to 80 resources.\n\
                          Linear costs; lower limit 1; second half of the resources capped.\n\
                          Each sample runs every strategy 5 times in a shuffled order."
                .to_string(),
            curve: CostCurve::Linear,
            base_seed: 0,
            resources: vec![20, 40, 60, 80],
            tasks: TaskRange::single(2000),
            lower_limit: 1,
            upper_limit: UpperLimitRule::CappedHalf,
            strategies: Strategy::ALL.to_vec(),
            measure: Measure::Time {
                samples: 20,
                repetitions: 5,
                shuffle_seed: 1000,
            },
        }
    }

    /// Execution time for 100 resources over a growing number of tasks.
    pub fn timing_with_fixed_resources() -> Self {
        Self {
            description: "Execution time with 100 resources and 200 to 2000 tasks.\n\
                          Linear costs; lower limit 1; second half of the resources capped.\n\
                          Each sample runs every strategy 5 times in a shuffled order."
                .to_string(),
            curve: CostCurve::Linear,
            base_seed: 100,
            resources: vec![100],
            tasks: TaskRange::new(200, 2000, 200),
            lower_limit: 1,
            upper_limit: UpperLimitRule::CappedHalf,
            strategies: Strategy::ALL.to_vec(),
            measure: Measure::Time {
                samples: 20,
                repetitions: 5,
                shuffle_seed: 0,
            },
        }
    }

    /// Looks up a preset by name (`increasing`, `constant`,
    /// `timing-tasks`, `timing-resources`).
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "increasing" => Some(Self::increasing_marginal_costs()),
            "constant" => Some(Self::constant_marginal_costs_no_upper_limit()),
            "timing-tasks" => Some(Self::timing_with_fixed_tasks()),
            "timing-resources" => Some(Self::timing_with_fixed_resources()),
            _ => None,
        }
    }

    /// Names accepted by [`ExperimentConfig::preset`].
    pub const PRESETS: [&'static str; 4] =
        ["increasing", "constant", "timing-tasks", "timing-resources"];

    /// Parses a TOML configuration and validates it.
    pub fn from_toml_str(text: &str) -> Result<Self, ExperimentError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ExperimentError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Replaces the resource counts.
    pub fn with_resources(mut self, resources: Vec<usize>) -> Self {
        self.resources = resources;
        self
    }

    /// Replaces the task range.
    pub fn with_tasks(mut self, tasks: TaskRange) -> Self {
        self.tasks = tasks;
        self
    }

    /// Replaces the strategies.
    pub fn with_strategies(mut self, strategies: Vec<Strategy>) -> Self {
        self.strategies = strategies;
        self
    }

    /// Replaces the measure.
    pub fn with_measure(mut self, measure: Measure) -> Self {
        self.measure = measure;
        self
    }

    /// Replaces the base seed.
    pub fn with_base_seed(mut self, base_seed: u64) -> Self {
        self.base_seed = base_seed;
        self
    }

    /// Checks that the grid is non-empty and every run is feasible.
    pub fn validate(&self) -> Result<(), ExperimentError> {
        let invalid = |msg: String| Err(ExperimentError::InvalidConfig(msg));

        if self.tasks.step == 0 {
            return invalid("task step must be positive".into());
        }
        if self.tasks.min > self.tasks.max {
            return invalid(format!(
                "task range {}..={} is empty",
                self.tasks.min, self.tasks.max
            ));
        }
        if self.resources.is_empty() || self.resources.contains(&0) {
            return invalid("resource counts must be non-empty and positive".into());
        }
        if self.strategies.is_empty() {
            return invalid("no strategies selected".into());
        }
        if let Measure::Time {
            samples,
            repetitions,
            ..
        } = self.measure
        {
            if samples == 0 || repetitions == 0 {
                return invalid("timing needs at least one sample and one repetition".into());
            }
        }

        for &resources in &self.resources {
            let needed = resources * self.lower_limit;
            if needed > self.tasks.min {
                return invalid(format!(
                    "{resources} resources with lower limit {} need {needed} tasks, range starts at {}",
                    self.lower_limit, self.tasks.min
                ));
            }
        }
        Ok(())
    }

    /// Limits for one run.
    pub fn limits_for(&self, resources: usize, tasks: usize) -> Limits {
        let limits = Limits::uniform(resources, self.lower_limit, tasks);
        match self.upper_limit {
            UpperLimitRule::Unlimited => limits,
            UpperLimitRule::CappedHalf => {
                limits.with_upper_range(resources / 2..resources, 2 * (tasks / resources))
            }
        }
    }
}
