//! Error types for the dashboard crate.

use crate::ClusterId;
use clustering::PipelineError;
use data_loader::UserId;
use thiserror::Error;

/// Errors from building the dashboard or from selector-driven queries.
///
/// Build-time failures (wrapped pipeline errors) are fatal before anything
/// renders; the selector variants report an out-of-domain cluster or user
/// choice.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A pipeline stage failed during the eager build
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// Selected cluster id was never produced by the clustering step
    #[error("Cluster {0} does not exist")]
    UnknownCluster(ClusterId),

    /// Selected user is not among the sampled users
    #[error("User {0} is not among the sampled users")]
    UnknownUser(UserId),

    /// Selected user exists but belongs to a different cluster
    #[error("User {user} is not in cluster {cluster}")]
    UserNotInCluster { user: UserId, cluster: ClusterId },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DashboardError>;
