//! Allocation domain models.
//!
//! Provides the data types shared by every allocator: the cost table
//! (input), the limit vectors (input), the problem view bundling them,
//! and the assignment (output).
//!
//! # Domain Mappings
//!
//! | u-allocate | Federated learning | Batch computing | Energy |
//! |------------|--------------------|-----------------|--------|
//! | Task | Mini-batch | Work item | Job unit |
//! | Resource | Client device | Worker node | Machine |
//! | Cost | Time / energy per round | Runtime | Joules |

mod assignment;
mod cost_table;
mod error;
mod limits;
mod problem;

pub use assignment::Assignment;
pub use cost_table::CostTable;
pub use error::ModelError;
pub use limits::Limits;
pub use problem::AllocationProblem;
