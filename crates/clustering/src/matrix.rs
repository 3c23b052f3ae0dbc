//! Dense user-item matrix built from sampled ratings.

use crate::sample::SampledRating;
use data_loader::{MovieId, UserId};
use ndarray::Array2;
use std::collections::HashMap;

/// Dense user-by-movie rating matrix over the sampled triples.
///
/// Rows are the distinct sampled users and columns the distinct sampled
/// movies, both sorted ascending by id. Cells with no observed rating hold
/// 0.0, unambiguous as a fill because the rating scale starts at 0.5, and
/// the loader rejects anything below that. If the same (user, movie) cell
/// was sampled more than once (the merged source has one row per rating/tag
/// occurrence), the observed ratings are averaged.
#[derive(Debug, Clone)]
pub struct UserItemMatrix {
    values: Array2<f64>,
    user_ids: Vec<UserId>,
    movie_ids: Vec<MovieId>,
}

impl UserItemMatrix {
    /// Pivot sampled (user, movie, rating) triples into a dense matrix.
    ///
    /// Dimensions are data-dependent: (distinct sampled users) x (distinct
    /// sampled movies).
    pub fn build(ratings: &[SampledRating]) -> Self {
        let mut user_ids: Vec<UserId> = ratings.iter().map(|r| r.user_id).collect();
        user_ids.sort_unstable();
        user_ids.dedup();

        let mut movie_ids: Vec<MovieId> = ratings.iter().map(|r| r.movie_id).collect();
        movie_ids.sort_unstable();
        movie_ids.dedup();

        let user_index: HashMap<UserId, usize> =
            user_ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        let movie_index: HashMap<MovieId, usize> =
            movie_ids.iter().enumerate().map(|(j, &id)| (id, j)).collect();

        let mut sums = Array2::<f64>::zeros((user_ids.len(), movie_ids.len()));
        let mut counts = Array2::<u32>::zeros((user_ids.len(), movie_ids.len()));
        for rating in ratings {
            let i = user_index[&rating.user_id];
            let j = movie_index[&rating.movie_id];
            sums[[i, j]] += rating.rating as f64;
            counts[[i, j]] += 1;
        }

        let values = Array2::from_shape_fn(sums.dim(), |(i, j)| {
            let count = counts[[i, j]];
            if count > 0 { sums[[i, j]] / count as f64 } else { 0.0 }
        });

        Self {
            values,
            user_ids,
            movie_ids,
        }
    }

    /// The dense rating values, shape (users, movies)
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Sampled user ids in row order (ascending)
    pub fn user_ids(&self) -> &[UserId] {
        &self.user_ids
    }

    /// Sampled movie ids in column order (ascending)
    pub fn movie_ids(&self) -> &[MovieId] {
        &self.movie_ids
    }

    /// (rows, cols) = (distinct sampled users, distinct sampled movies)
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }
}
