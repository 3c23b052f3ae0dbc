//! # Dashboard Crate
//!
//! Ties the pipeline together into a single run-once [`Dashboard`] object:
//!
//! - aggregate tables (ratings-per-user, top tags, top genres)
//! - the sampled user-item matrix, reduced and clustered
//! - read-only accessors and the two selector-driven joins
//! - the six chart panels as [`ChartSpec`] values for the presentation
//!   shell to render
//!
//! ## Example Usage
//!
//! ```ignore
//! use dashboard::{Dashboard, PipelineConfig};
//!
//! let records = data_loader::load_records(path)?;
//! let dash = Dashboard::build(&records, PipelineConfig::default())?;
//!
//! let overview = dash.ratings_per_user_panel();
//! let clusters = dash.cluster_ids();
//! let genres = dash.cluster_genres_panel(clusters[0])?;
//! ```

pub mod config;
pub mod dashboard;
pub mod error;
pub mod panels;

/// Cluster identifier produced by the clustering step (0..k)
pub type ClusterId = usize;

// Re-export commonly used types for convenience
pub use clustering::UserItemMatrix;
pub use config::PipelineConfig;
pub use dashboard::Dashboard;
pub use error::{DashboardError, Result};
pub use panels::{ChartKind, ChartSpec};
