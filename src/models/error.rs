use thiserror::Error;

/// Errors raised while constructing model values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A cost table needs at least one non-empty row.
    #[error("cost table has no rows or no columns")]
    Empty,

    /// Cost rows of different lengths.
    #[error("cost row {row} has {found} entries, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Lower and upper limit vectors of different lengths.
    #[error("{lower} lower limits but {upper} upper limits")]
    LengthMismatch { lower: usize, upper: usize },

    /// A lower limit above its upper limit.
    #[error("resource {resource}: lower limit {lower} exceeds upper limit {upper}")]
    InvertedLimits {
        resource: usize,
        lower: usize,
        upper: usize,
    },
}
