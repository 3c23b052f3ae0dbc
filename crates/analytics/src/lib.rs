//! # Analytics Crate
//!
//! Descriptive summary tables over the full rating record set:
//!
//! - ratings-per-user counts
//! - top-N tag frequencies
//! - top-N genre frequencies (pipe-joined genre field exploded first)
//!
//! All functions are pure and side-effect free; they never mutate or cache.

pub mod aggregates;

pub use aggregates::{count_ratings_per_user, top_genres, top_k_counts, top_tags};
