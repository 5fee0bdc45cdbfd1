//! Cost-aware task allocation for bounded resources.
//!
//! Splits an integer number of tasks over resources whose cost for
//! handling `t` tasks is tabulated, respecting per-resource lower and
//! upper limits. Typical use: choosing how many training samples each
//! client processes in a federated-learning round.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `CostTable`, `Limits`, `Assignment`,
//!   `AllocationProblem`
//! - **`allocators`**: (MC)2MKP, MarIn, MarCo, MarDecUn, MarDec, FedAvg and
//!   the runtime-selectable `Strategy`
//! - **`validation`**: Result verification and input precondition checks
//! - **`generators`**: Seeded synthetic cost curves
//! - **`experiment`**: Configurable cost/timing experiments with CSV output
//!
//! # Example
//!
//! ```
//! use u_allocate::allocators::{Allocator, Mc2Mkp};
//! use u_allocate::models::{AllocationProblem, CostTable, Limits};
//!
//! let costs = CostTable::from_rows(vec![
//!     vec![0.0, 3.0, 2.0, 4.0, 6.0],
//!     vec![0.0, 1.0, 5.0, 2.0, 3.0],
//!     vec![0.0, 8.0, 6.0, 4.0, 2.0],
//! ]).unwrap();
//! let limits = Limits::uniform(3, 1, 4);
//! let problem = AllocationProblem::new(8, &costs, &limits);
//!
//! assert_eq!(Mc2Mkp.allocate(&problem).counts(), &[3, 1, 4]);
//! ```
//!
//! # References
//!
//! - Pilla (2021), "Optimal task assignment for heterogeneous federated
//!   learning devices", IPDPS
//! - Pilla (2022), "Scheduling algorithms for federated learning with
//!   minimal energy consumption", IEEE TPDS
//! - Kellerer, Pferschy, Pisinger (2004), "Knapsack Problems"

pub mod allocators;
pub mod experiment;
pub mod generators;
pub mod models;
pub mod validation;
