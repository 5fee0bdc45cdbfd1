//! Allocation experiments.
//!
//! Runs a set of strategies over a grid of task and resource counts with
//! synthetic costs, and writes one CSV row per run.
//!
//! | Component | Role |
//! |-----------|------|
//! | [`ExperimentConfig`] | What to run: curve, grid, limits, strategies, measure |
//! | [`run_experiment`] | Drives the grid, verifies results, records values |
//! | [`ResultLogger`] | `#`-prefixed header text followed by CSV rows |
//!
//! # Usage
//!
//! ```
//! use u_allocate::experiment::{run_experiment, ExperimentConfig, ResultLogger, TaskRange};
//!
//! let config = ExperimentConfig::increasing_marginal_costs()
//!     .with_resources(vec![4])
//!     .with_tasks(TaskRange::new(20, 40, 10));
//! let mut logger = ResultLogger::new(Vec::new(), &config.description, config.measure.label()).unwrap();
//! let summary = run_experiment(&config, &mut logger).unwrap();
//! assert_eq!(summary.rows, 3 * config.strategies.len());
//! assert_eq!(summary.failures, 0);
//! ```

mod config;
mod logger;
mod runner;

pub use config::{ExperimentConfig, Measure, TaskRange, UpperLimitRule};
pub use logger::{ResultLogger, ResultRow};
pub use runner::{run_experiment, RunSummary};

use thiserror::Error;

/// Experiment errors.
#[derive(Error, Debug)]
pub enum ExperimentError {
    /// Reading a configuration or writing results failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing a CSV record failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The configuration file is not valid TOML for [`ExperimentConfig`].
    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The configuration parsed but describes no runnable experiment.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}
