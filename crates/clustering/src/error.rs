//! Error types for the sampling and clustering pipeline.

use thiserror::Error;

/// Errors from the sample -> matrix -> reduce -> cluster pipeline.
///
/// All fatal: the pipeline runs once at startup and there is no degraded
/// mode to fall back to.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Fewer rows (or points) are available than the operation requires
    #[error("Requested {requested} rows but only {available} are available")]
    InsufficientData { requested: usize, available: usize },

    /// Requested component count is invalid for the sampled matrix shape.
    /// The factorization requires 1 <= components <= min(rows, cols) - 1.
    #[error("Cannot extract {components} components from a {rows}x{cols} matrix")]
    Dimension {
        components: usize,
        rows: usize,
        cols: usize,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, PipelineError>;
