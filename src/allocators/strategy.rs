//! Runtime-selectable allocation strategy.
//!
//! Lets configuration files and the command line pick an allocator by
//! name without touching the allocator types.
//!
//! # Usage
//!
//! ```
//! use u_allocate::allocators::Strategy;
//!
//! let s: Strategy = "mardec".parse().unwrap();
//! assert_eq!(s, Strategy::MarDec);
//! assert_eq!(s.to_string(), "MarDec");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Allocator, FedAvg, MarCo, MarDec, MarDecUn, MarIn, Mc2Mkp};
use crate::models::{AllocationProblem, Assignment};

/// Allocation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Exact dynamic programming.
    Mc2Mkp,
    /// Unit-step marginal-cost greedy.
    MarIn,
    /// Capacity-batch marginal-cost greedy.
    MarCo,
    /// Single-resource absorption.
    MarDecUn,
    /// Limited/unlimited decomposition.
    MarDec,
    /// Equal split.
    FedAvg,
}

impl Strategy {
    /// Every strategy, in reporting order.
    pub const ALL: [Strategy; 6] = [
        Strategy::Mc2Mkp,
        Strategy::MarIn,
        Strategy::MarCo,
        Strategy::MarDecUn,
        Strategy::MarDec,
        Strategy::FedAvg,
    ];

    /// The allocator implementing this strategy.
    pub fn allocator(self) -> &'static dyn Allocator {
        match self {
            Strategy::Mc2Mkp => &Mc2Mkp,
            Strategy::MarIn => &MarIn,
            Strategy::MarCo => &MarCo,
            Strategy::MarDecUn => &MarDecUn,
            Strategy::MarDec => &MarDec,
            Strategy::FedAvg => &FedAvg,
        }
    }

    /// Display name used in result files.
    pub fn name(self) -> &'static str {
        self.allocator().name()
    }

    /// Whether results should be checked against lower/upper limits.
    ///
    /// FedAvg splits evenly regardless of limits.
    pub fn respects_limits(self) -> bool {
        self != Strategy::FedAvg
    }

    /// Runs the allocator on `problem`.
    pub fn allocate(self, problem: &AllocationProblem<'_>) -> Assignment {
        self.allocator().allocate(problem)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown strategy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown allocation strategy '{0}'")]
pub struct ParseStrategyError(String);

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    /// Accepts the display names and their lowercase forms, with or
    /// without the parentheses of "(MC)2MKP".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '(' | ')' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "mc2mkp" => Ok(Strategy::Mc2Mkp),
            "marin" => Ok(Strategy::MarIn),
            "marco" => Ok(Strategy::MarCo),
            "mardecun" => Ok(Strategy::MarDecUn),
            "mardec" => Ok(Strategy::MarDec),
            "fedavg" => Ok(Strategy::FedAvg),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}
