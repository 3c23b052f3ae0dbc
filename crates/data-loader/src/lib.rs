//! # Data Loader Crate
//!
//! This crate handles loading the pre-merged movie-ratings CSV into typed
//! in-memory records.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (RatingRecord, id aliases)
//! - **loader**: Parse the merged CSV into Rust structs
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::load_records;
//! use std::path::Path;
//!
//! // Load the entire merged dataset
//! let records = load_records(Path::new("data/full_merged_cleaned.csv"))?;
//!
//! println!("Loaded {} rating rows", records.len());
//! for genre in records[0].genre_list() {
//!     println!("genre: {genre}");
//! }
//! ```
//!
//! Loading is all-or-nothing: any missing column, malformed row, or
//! out-of-scale rating aborts the load, because the dashboard computes every
//! table eagerly at startup and cannot render from partial data.

// Public modules
pub mod error;
pub mod loader;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use loader::{RATING_MAX, RATING_MIN, load_records, read_records};
pub use types::{MovieId, RatingRecord, UserId, split_genres};
