//! The run-once dashboard pipeline and its read-only accessors.
//!
//! `Dashboard::build` replaces what would otherwise be ambient script-level
//! state: it computes every table eagerly, exactly once, and the resulting
//! object is immutable. Selector-driven queries (`genres_for_cluster`,
//! `ratings_for_user`) are recomputed joins over the held tables on every
//! call; at this data scale a memoization layer is not worth its keep.

use crate::config::PipelineConfig;
use crate::error::{DashboardError, Result};
use crate::{ClusterId, UserItemMatrix};
use clustering::{SampledRating, cluster, reduce, sample_ratings};
use data_loader::{MovieId, RatingRecord, UserId, split_genres};
use std::collections::{BTreeMap, HashMap};

/// All pipeline outputs, materialized once at process start.
#[derive(Debug)]
pub struct Dashboard {
    config: PipelineConfig,
    // Aggregate tables over the full record set
    ratings_per_user: BTreeMap<UserId, u64>,
    top_tags: Vec<(String, u64)>,
    top_genres: Vec<(String, u64)>,
    // Sampled pipeline outputs
    sampled: Vec<SampledRating>,
    matrix: UserItemMatrix,
    assignments: BTreeMap<UserId, ClusterId>,
    // Per-movie metadata, deduplicated (first occurrence wins)
    movie_genres: HashMap<MovieId, String>,
    movie_titles: HashMap<MovieId, String>,
}

impl Dashboard {
    /// Run the whole pipeline eagerly and return the finished dashboard.
    ///
    /// Steps:
    /// 1. Compute the three aggregate tables (in parallel, they are
    ///    independent)
    /// 2. Sample, pivot, reduce, and cluster the ratings
    /// 3. Build the deduplicated movie metadata maps the views join against
    ///
    /// Any failure aborts the build; there is no partial dashboard.
    pub fn build(records: &[RatingRecord], config: PipelineConfig) -> Result<Self> {
        // The three aggregates only read `records`; nested join gives
        // three-way parallelism.
        let ((ratings_per_user, top_tags), top_genres) = rayon::join(
            || {
                rayon::join(
                    || analytics::count_ratings_per_user(records),
                    || analytics::top_tags(records, config.top_tags),
                )
            },
            || analytics::top_genres(records, config.top_genres),
        );
        tracing::info!(
            users = ratings_per_user.len(),
            tags = top_tags.len(),
            genres = top_genres.len(),
            "computed aggregate tables"
        );

        let sampled = sample_ratings(records, config.sample_size, config.seed)?;
        let matrix = UserItemMatrix::build(&sampled);
        let (rows, cols) = matrix.shape();
        tracing::info!(rows, cols, "built user-item matrix");

        let features = reduce(&matrix, config.components, config.seed)?;
        let labels = cluster(&features, config.clusters, config.seed)?;
        let assignments: BTreeMap<UserId, ClusterId> =
            matrix.user_ids().iter().copied().zip(labels).collect();
        tracing::info!(
            users = assignments.len(),
            clusters = config.clusters,
            "clustered sampled users"
        );

        let mut movie_genres = HashMap::new();
        let mut movie_titles = HashMap::new();
        for record in records {
            movie_genres
                .entry(record.movie_id)
                .or_insert_with(|| record.genres.clone());
            movie_titles
                .entry(record.movie_id)
                .or_insert_with(|| record.title.clone());
        }

        Ok(Self {
            config,
            ratings_per_user,
            top_tags,
            top_genres,
            sampled,
            matrix,
            assignments,
            movie_genres,
            movie_titles,
        })
    }

    // Read-only accessors. The dashboard is the single writer and it is
    // done writing by the time `build` returns; views only borrow.

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Ratings-per-user counts over the full record set, keyed by user id
    pub fn ratings_per_user(&self) -> &BTreeMap<UserId, u64> {
        &self.ratings_per_user
    }

    /// Top tags table, descending by frequency
    pub fn top_tags(&self) -> &[(String, u64)] {
        &self.top_tags
    }

    /// Top genres table, descending by frequency
    pub fn top_genres(&self) -> &[(String, u64)] {
        &self.top_genres
    }

    /// The dense sampled user-item matrix
    pub fn user_item_matrix(&self) -> &UserItemMatrix {
        &self.matrix
    }

    /// user -> cluster mapping over the sampled users
    pub fn cluster_assignments(&self) -> &BTreeMap<UserId, ClusterId> {
        &self.assignments
    }

    /// Sorted distinct cluster ids actually produced: the domain of the
    /// cluster selector
    pub fn cluster_ids(&self) -> Vec<ClusterId> {
        let mut ids: Vec<ClusterId> = self.assignments.values().copied().collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Sampled users assigned to `cluster`, ascending by id: the domain of
    /// the user selector once a cluster is chosen
    pub fn users_in_cluster(&self, cluster: ClusterId) -> Vec<UserId> {
        self.assignments
            .iter()
            .filter(|&(_, &c)| c == cluster)
            .map(|(&user, _)| user)
            .collect()
    }

    /// Users per cluster id
    pub fn cluster_sizes(&self) -> BTreeMap<ClusterId, usize> {
        let mut sizes = BTreeMap::new();
        for &cluster in self.assignments.values() {
            *sizes.entry(cluster).or_insert(0) += 1;
        }
        sizes
    }

    /// Top `k` genres among the movies rated by users in `cluster`.
    ///
    /// Join: sampled ratings -> cluster assignment -> per-movie genre
    /// metadata -> exploded genre tokens, counted per (rating row, genre)
    /// pair. Recomputed on every call.
    pub fn genres_for_cluster(&self, cluster: ClusterId, k: usize) -> Result<Vec<(String, u64)>> {
        self.check_cluster(cluster)?;

        let tokens = self
            .sampled
            .iter()
            .filter(|r| self.assignments.get(&r.user_id) == Some(&cluster))
            .flat_map(|r| split_genres(&self.movie_genres[&r.movie_id]));
        Ok(analytics::top_k_counts(tokens, k))
    }

    /// The sampled (title, rating) rows for one user, in sampled order.
    ///
    /// The merged source has one row per rating/tag occurrence, and this
    /// listing preserves those rows as-is.
    pub fn ratings_for_user(&self, user: UserId) -> Result<Vec<(String, f32)>> {
        if !self.assignments.contains_key(&user) {
            return Err(DashboardError::UnknownUser(user));
        }

        Ok(self
            .sampled
            .iter()
            .filter(|r| r.user_id == user)
            .map(|r| (self.movie_titles[&r.movie_id].clone(), r.rating))
            .collect())
    }

    /// Validate a cluster selector value against the produced ids.
    pub(crate) fn check_cluster(&self, cluster: ClusterId) -> Result<()> {
        if self.assignments.values().any(|&c| c == cluster) {
            Ok(())
        } else {
            Err(DashboardError::UnknownCluster(cluster))
        }
    }

    /// Validate a (cluster, user) selector pair.
    pub(crate) fn check_user_in_cluster(&self, cluster: ClusterId, user: UserId) -> Result<()> {
        self.check_cluster(cluster)?;
        match self.assignments.get(&user) {
            None => Err(DashboardError::UnknownUser(user)),
            Some(&c) if c != cluster => Err(DashboardError::UserNotInCluster { user, cluster }),
            Some(_) => Ok(()),
        }
    }
}
