use thiserror::Error;

/// Failures surfaced by the sampling core. All of these indicate malformed
/// input data rather than transient conditions; none are retried.
#[derive(Debug, Error, PartialEq)]
pub enum SynthError {
    /// A categorical distribution with a negative weight or an all-zero total.
    #[error("invalid distribution: {0}")]
    InvalidDistribution(String),

    /// Matrices of inconsistent dimensions passed to the combiner.
    #[error("matrix shape mismatch: expected {expected}x{expected}, got {rows}x{cols}")]
    ShapeMismatch {
        expected: usize,
        rows: usize,
        cols: usize,
    },

    /// An age outside the span covered by the bracket definitions.
    #[error("age {0} is outside the defined bracket span")]
    AgeOutOfRange(u32),

    /// Identity resolution found no pool entries, even after broadening to
    /// the full bracket.
    #[error("no contact candidates for age {0}, even within its bracket")]
    NoCandidates(u32),
}
