//! Core domain types for the merged ratings dataset.
//!
//! The input is a single pre-merged, pre-cleaned CSV: one row per rating (or
//! per rating/tag occurrence), with the movie's genre string and title
//! denormalized onto each row. This module defines the typed record for one
//! such row; everything downstream works on slices of these records.

use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================
// These make the domain clearer and prevent mixing up user IDs with movie IDs

/// Unique identifier for a user
pub type UserId = u32;

/// Unique identifier for a movie
pub type MovieId = u32;

// =============================================================================
// Rating Record
// =============================================================================

/// One row of the merged ratings table.
///
/// The schema is defined positionally by name in the CSV header; serde
/// renames map the camelCase header names onto Rust fields. Columns beyond
/// the required six are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    #[serde(rename = "movieId")]
    pub movie_id: MovieId,
    /// Rating value on the 0.5 - 5.0 scale
    pub rating: f32,
    /// Free-text tag; most rows have none, and an empty field decodes to
    /// `None` rather than an empty-string category
    #[serde(default, deserialize_with = "empty_as_none")]
    pub tag: Option<String>,
    /// Pipe-joined genre names, e.g. "Action|Comedy"
    pub genres: String,
    pub title: String,
}

impl RatingRecord {
    /// Split the pipe-joined genre field into individual genre tokens.
    ///
    /// A record with genres "Action|Comedy" yields "Action" then "Comedy".
    /// Empty tokens (from stray delimiters) are skipped.
    pub fn genre_list(&self) -> impl Iterator<Item = &str> {
        split_genres(&self.genres)
    }
}

/// Split a pipe-joined genre string into non-empty tokens.
pub fn split_genres(genres: &str) -> impl Iterator<Item = &str> {
    genres.split('|').filter(|g| !g.is_empty())
}

/// Decode an optional text field, treating empty/whitespace as absent.
fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(genres: &str) -> RatingRecord {
        RatingRecord {
            user_id: 1,
            movie_id: 10,
            rating: 4.0,
            tag: None,
            genres: genres.to_string(),
            title: "Toy Story (1995)".to_string(),
        }
    }

    #[test]
    fn test_genre_list_splits_on_pipe() {
        let r = record("Animation|Children|Comedy");
        let genres: Vec<&str> = r.genre_list().collect();
        assert_eq!(genres, vec!["Animation", "Children", "Comedy"]);
    }

    #[test]
    fn test_genre_list_single_genre() {
        let r = record("Drama");
        assert_eq!(r.genre_list().collect::<Vec<_>>(), vec!["Drama"]);
    }

    #[test]
    fn test_genre_list_skips_empty_tokens() {
        let r = record("Action||Comedy");
        assert_eq!(r.genre_list().collect::<Vec<_>>(), vec!["Action", "Comedy"]);
    }
}
