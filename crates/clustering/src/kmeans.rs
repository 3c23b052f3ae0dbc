//! Centroid-based partitioning of user feature vectors (Lloyd's k-means).

use crate::error::{PipelineError, Result};
use ndarray::{Array2, ArrayView1};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;

/// Iteration cap; the algorithm returns its best-effort assignment at the
/// cap even if the centroids have not fully converged.
pub const MAX_ITERATIONS: usize = 300;

/// Early-exit threshold on the total squared centroid movement per sweep.
const TOLERANCE: f64 = 1e-9;

/// Partition feature rows into `k` clusters, returning one cluster id in
/// `0..k` per row.
///
/// Lloyd's algorithm from `k` random distinct data points as the initial
/// centroids. Deterministic for a fixed seed; under a different seed it may
/// converge to a different local optimum; that sensitivity to
/// initialization is inherent to the method, not something this function
/// tries to correct. A cluster that loses all its members keeps its previous
/// centroid, so any id that appears in the result maps to at least one row.
///
/// Fails with [`PipelineError::InsufficientData`] if there are fewer rows
/// than clusters (or `k == 0`).
pub fn cluster(features: &Array2<f64>, k: usize, seed: u64) -> Result<Vec<usize>> {
    let (n, dims) = features.dim();
    if k == 0 || n < k {
        return Err(PipelineError::InsufficientData {
            requested: k,
            available: n,
        });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let picked = rand::seq::index::sample(&mut rng, n, k);
    let mut centroids = Array2::<f64>::zeros((k, dims));
    for (c, i) in picked.iter().enumerate() {
        centroids.row_mut(c).assign(&features.row(i));
    }

    let mut assignment = vec![0usize; n];
    for iteration in 0..MAX_ITERATIONS {
        // Assignment step: each row to its nearest centroid.
        assignment = (0..n)
            .into_par_iter()
            .map(|i| nearest_centroid(features.row(i), &centroids))
            .collect();

        // Update step: centroids move to the mean of their members.
        let mut sums = Array2::<f64>::zeros((k, dims));
        let mut counts = vec![0usize; k];
        for (i, &c) in assignment.iter().enumerate() {
            sums.row_mut(c).scaled_add(1.0, &features.row(i));
            counts[c] += 1;
        }

        let mut movement = 0.0;
        for c in 0..k {
            if counts[c] == 0 {
                continue; // empty cluster keeps its centroid
            }
            let mean = &sums.row(c) / counts[c] as f64;
            let delta = &mean - &centroids.row(c);
            movement += delta.dot(&delta);
            centroids.row_mut(c).assign(&mean);
        }

        if movement <= TOLERANCE {
            tracing::debug!(iteration, "k-means converged");
            break;
        }
    }

    Ok(assignment)
}

/// Index of the centroid closest (squared Euclidean) to `point`; ties go to
/// the lower index.
fn nearest_centroid(point: ArrayView1<'_, f64>, centroids: &Array2<f64>) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (c, centroid) in centroids.outer_iter().enumerate() {
        let delta = &point - &centroid;
        let distance = delta.dot(&delta);
        if distance < best_distance {
            best = c;
            best_distance = distance;
        }
    }
    best
}
