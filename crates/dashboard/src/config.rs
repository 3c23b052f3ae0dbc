//! Pipeline configuration.

use serde::{Deserialize, Serialize};

/// Knobs for the run-once pipeline.
///
/// The defaults reproduce the canonical dashboard: a 10k-row sample reduced
/// to 20 components and partitioned into 4 clusters under seed 42, with the
/// top 20 tags, top 15 overall genres, and top 10 per-cluster genres.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Rows drawn (without replacement) from the full table
    pub sample_size: usize,
    /// Feature-space dimensionality of the truncated factorization
    pub components: usize,
    /// Number of k-means clusters
    pub clusters: usize,
    /// Seed shared by the sampling, reduction, and clustering steps
    pub seed: u64,
    /// Entries in the top-tags table
    pub top_tags: usize,
    /// Entries in the overall top-genres table
    pub top_genres: usize,
    /// Entries in the per-cluster genre view
    pub cluster_genres: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sample_size: 10_000,
            components: 20,
            clusters: 4,
            seed: 42,
            top_tags: 20,
            top_genres: 15,
            cluster_genres: 10,
        }
    }
}
