//! # Clustering Crate
//!
//! The sampled-matrix half of the pipeline:
//!
//! 1. **sample**: seeded uniform draw of (user, movie, rating) triples
//! 2. **matrix**: dense user-item pivot with 0.0 fill for unrated cells
//! 3. **reduce**: truncated factorization to fixed-length user features
//! 4. **kmeans**: centroid-based partitioning of those features
//!
//! Every step is deterministic for a fixed seed. The k-means step is
//! deliberately seed-sensitive across *different* seeds (different local
//! optima), which is a property of the algorithm and preserved as such.
//!
//! ## Example Usage
//!
//! ```ignore
//! use clustering::{UserItemMatrix, cluster, reduce, sample_ratings};
//!
//! let sampled = sample_ratings(&records, 10_000, 42)?;
//! let matrix = UserItemMatrix::build(&sampled);
//! let features = reduce(&matrix, 20, 42)?;
//! let assignment = cluster(&features, 4, 42)?;
//! ```

pub mod error;
pub mod kmeans;
pub mod matrix;
pub mod reduce;
pub mod sample;

// Re-export the pipeline surface
pub use error::{PipelineError, Result};
pub use kmeans::{MAX_ITERATIONS, cluster};
pub use matrix::UserItemMatrix;
pub use reduce::reduce;
pub use sample::{SampledRating, sample_ratings};
