//! Seeded uniform sampling of (user, movie, rating) triples.

use crate::error::{PipelineError, Result};
use data_loader::{MovieId, RatingRecord, UserId};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// The projection of a rating row the matrix pipeline works on.
///
/// Tag, genre, and title columns are deliberately left behind; the views
/// join them back on demand through the movie id.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampledRating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub rating: f32,
}

impl From<&RatingRecord> for SampledRating {
    fn from(record: &RatingRecord) -> Self {
        Self {
            user_id: record.user_id,
            movie_id: record.movie_id,
            rating: record.rating,
        }
    }
}

/// Draw exactly `n` rows uniformly at random without replacement.
///
/// Deterministic for a fixed seed: the same seed over the same records
/// always selects the same rows. Fails with
/// [`PipelineError::InsufficientData`] if the table has fewer than `n` rows.
pub fn sample_ratings(records: &[RatingRecord], n: usize, seed: u64) -> Result<Vec<SampledRating>> {
    if records.len() < n {
        return Err(PipelineError::InsufficientData {
            requested: n,
            available: records.len(),
        });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let picked = rand::seq::index::sample(&mut rng, records.len(), n);
    Ok(picked.iter().map(|i| SampledRating::from(&records[i])).collect())
}
