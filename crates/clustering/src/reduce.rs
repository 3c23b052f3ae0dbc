//! Truncated factorization of the user-item matrix.
//!
//! Projects each user's rating row onto the top `components` variance
//! directions via randomized subspace iteration: starting from a seeded
//! random basis, alternate multiplication by AᵀA with re-orthonormalization
//! until the basis converges to the dominant right singular vectors V, then
//! return A·V as the per-user feature vectors. This matches what a truncated
//! SVD's transform produces (U·Σ), up to the usual sign indeterminacy.

use crate::error::{PipelineError, Result};
use crate::matrix::UserItemMatrix;
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Subspace iterations. The spectra seen here (a handful of strong taste
/// directions over a long noise tail) separate well before this cap.
const SUBSPACE_ITERATIONS: usize = 25;

/// Reduce the user-item matrix to `components`-dimensional user features.
///
/// Deterministic for a fixed seed. Fails with [`PipelineError::Dimension`]
/// unless `1 <= components <= min(rows, cols) - 1`, the standard constraint
/// of the truncated factorization.
///
/// The returned matrix has shape (users, components) with rows aligned to
/// `matrix.user_ids()`.
pub fn reduce(matrix: &UserItemMatrix, components: usize, seed: u64) -> Result<Array2<f64>> {
    let a = matrix.values();
    let (rows, cols) = a.dim();
    let limit = rows.min(cols).saturating_sub(1);
    if components == 0 || components > limit {
        return Err(PipelineError::Dimension {
            components,
            rows,
            cols,
        });
    }

    tracing::debug!(rows, cols, components, "reducing user-item matrix");

    let mut rng = StdRng::seed_from_u64(seed);
    let mut basis = Array2::from_shape_fn((cols, components), |_| rng.gen_range(-1.0..1.0));
    orthonormalize_columns(&mut basis);

    for _ in 0..SUBSPACE_ITERATIONS {
        let projected = a.dot(&basis); // (rows, components)
        basis = a.t().dot(&projected); // (cols, components)
        orthonormalize_columns(&mut basis);
    }

    Ok(a.dot(&basis))
}

/// In-place modified Gram-Schmidt over the columns.
///
/// A numerically dependent column (possible on rank-deficient input) is left
/// as zeros rather than divided by a vanishing norm.
fn orthonormalize_columns(m: &mut Array2<f64>) {
    let k = m.ncols();
    for j in 0..k {
        for i in 0..j {
            let projection = m.column(j).dot(&m.column(i));
            let earlier = m.column(i).to_owned();
            m.column_mut(j).scaled_add(-projection, &earlier);
        }
        let norm = m.column(j).dot(&m.column(j)).sqrt();
        if norm > 1e-12 {
            m.column_mut(j).mapv_inplace(|x| x / norm);
        }
    }
}
