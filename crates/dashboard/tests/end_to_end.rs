//! End-to-end test over a small synthetic dataset.
//!
//! 100 rows, 5 users, 10 movies, ratings in {1..5}; sampling every row
//! (n = 100) so every pipeline output can be checked exactly. Movie 100 is
//! never rated by user 5, which exercises the zero fill.

use data_loader::{MovieId, RatingRecord, UserId};
use dashboard::{Dashboard, DashboardError, PipelineConfig};
use std::collections::HashSet;

const GENRES: &[&str] = &[
    "Action|Comedy",
    "Drama",
    "Comedy|Romance",
    "Thriller",
    "Action|Thriller",
    "Drama|Romance",
    "Comedy",
    "Action",
    "Drama|Thriller",
    "Romance",
];

fn synthetic_rating(user: UserId, movie: MovieId) -> f32 {
    ((user + movie / 10) % 5) as f32 + 1.0
}

fn record(user: UserId, movie: MovieId, tag: Option<&str>) -> RatingRecord {
    let genre_idx = (movie / 10 - 1) as usize;
    RatingRecord {
        user_id: user,
        movie_id: movie,
        rating: synthetic_rating(user, movie),
        tag: tag.map(str::to_string),
        genres: GENRES[genre_idx].to_string(),
        title: format!("Movie {movie}"),
    }
}

/// 100 rows over 5 users x 10 movies: two rows per rated (user, movie) pair
/// (the merged source carries one row per rating/tag occurrence), with the
/// (5, 100) pair left unrated and two extra duplicates of (1, 10) to keep
/// the total at 100.
fn synthetic_records() -> Vec<RatingRecord> {
    let mut records = Vec::new();
    for user in 1..=5u32 {
        for movie in (10..=100).step_by(10) {
            if user == 5 && movie == 100 {
                continue;
            }
            records.push(record(user, movie, Some("synthetic")));
            records.push(record(user, movie, None));
        }
    }
    records.push(record(1, 10, Some("extra")));
    records.push(record(1, 10, None));
    assert_eq!(records.len(), 100);
    records
}

fn test_config() -> PipelineConfig {
    PipelineConfig {
        sample_size: 100,
        components: 3, // must stay below min(5 users, 10 movies) - 1
        clusters: 2,
        seed: 42,
        top_tags: 20,
        top_genres: 15,
        cluster_genres: 10,
    }
}

fn build_dashboard() -> Dashboard {
    Dashboard::build(&synthetic_records(), test_config()).expect("pipeline should succeed")
}

#[test]
fn test_matrix_is_dense_5_by_10_with_zero_fill() {
    let dash = build_dashboard();
    let matrix = dash.user_item_matrix();

    assert_eq!(matrix.shape(), (5, 10));
    assert_eq!(matrix.user_ids(), &[1, 2, 3, 4, 5]);
    assert_eq!(matrix.movie_ids(), &[10, 20, 30, 40, 50, 60, 70, 80, 90, 100]);

    // The one unrated pair is zero-filled; every rated cell holds its
    // synthetic rating (duplicates share a value, so the mean is exact).
    assert_eq!(matrix.values()[[4, 9]], 0.0);
    for (i, &user) in matrix.user_ids().iter().enumerate() {
        for (j, &movie) in matrix.movie_ids().iter().enumerate() {
            if user == 5 && movie == 100 {
                continue;
            }
            assert_eq!(matrix.values()[[i, j]], synthetic_rating(user, movie) as f64);
        }
    }
}

#[test]
fn test_assignment_covers_all_users_within_k() {
    let dash = build_dashboard();
    let assignments = dash.cluster_assignments();

    assert_eq!(assignments.len(), 5);
    for user in 1..=5u32 {
        let cluster = assignments.get(&user).expect("every user is assigned");
        assert!(*cluster < 2, "cluster id {cluster} out of range");
    }
}

#[test]
fn test_assignment_is_reproducible_for_a_seed() {
    let a = build_dashboard();
    let b = build_dashboard();
    assert_eq!(a.cluster_assignments(), b.cluster_assignments());
}

#[test]
fn test_ratings_per_user_counts_full_table() {
    let dash = build_dashboard();
    let counts = dash.ratings_per_user();
    assert_eq!(counts.get(&1), Some(&22)); // 10 movies x 2 rows + 2 extras
    assert_eq!(counts.get(&2), Some(&20));
    assert_eq!(counts.get(&5), Some(&18)); // movie 100 missing
}

#[test]
fn test_ratings_for_user_returns_exactly_that_users_rows() {
    let dash = build_dashboard();
    let records = synthetic_records();

    for user in 1..=5u32 {
        let mut expected: Vec<(String, f32)> = records
            .iter()
            .filter(|r| r.user_id == user)
            .map(|r| (r.title.clone(), r.rating))
            .collect();
        let mut actual = dash.ratings_for_user(user).unwrap();

        // The sample is a permutation of the full table, so compare as
        // multisets.
        expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
        actual.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(actual, expected, "user {user}");
    }
}

#[test]
fn test_unknown_user_is_rejected() {
    let dash = build_dashboard();
    assert!(matches!(
        dash.ratings_for_user(99),
        Err(DashboardError::UnknownUser(99))
    ));
}

#[test]
fn test_selector_domains_are_consistent() {
    let dash = build_dashboard();

    let cluster_ids = dash.cluster_ids();
    assert!(!cluster_ids.is_empty());
    assert!(cluster_ids.windows(2).all(|w| w[0] < w[1]), "sorted, distinct");

    let mut seen = Vec::new();
    for &cluster in &cluster_ids {
        let users = dash.users_in_cluster(cluster);
        assert!(!users.is_empty(), "produced cluster {cluster} has users");
        assert!(users.windows(2).all(|w| w[0] < w[1]));
        seen.extend(users);
    }
    seen.sort_unstable();
    assert_eq!(seen, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_genres_for_cluster_is_a_subset_of_rated_genres() {
    let dash = build_dashboard();
    let records = synthetic_records();

    for &cluster in &dash.cluster_ids() {
        let genres = dash.genres_for_cluster(cluster, 10).unwrap();
        assert!(genres.len() <= 10);

        let users = dash.users_in_cluster(cluster);
        let rated_genres: HashSet<&str> = records
            .iter()
            .filter(|r| users.contains(&r.user_id))
            .flat_map(|r| r.genre_list())
            .collect();
        for (genre, count) in &genres {
            assert!(
                rated_genres.contains(genre.as_str()),
                "genre {genre} not rated by cluster {cluster}"
            );
            assert!(*count > 0);
        }
    }
}

#[test]
fn test_unknown_cluster_is_rejected() {
    let dash = build_dashboard();
    assert!(matches!(
        dash.genres_for_cluster(7, 10),
        Err(DashboardError::UnknownCluster(7))
    ));
}

#[test]
fn test_panels_render_from_the_same_tables() {
    let dash = build_dashboard();

    let ratings_panel = dash.ratings_per_user_panel();
    assert_eq!(ratings_panel.values.iter().sum::<f64>(), 5.0);

    let tags_panel = dash.top_tags_panel();
    // "synthetic" (49 rows) then "extra" (1 row); empty tags never counted.
    assert_eq!(tags_panel.categories[0], "synthetic");
    assert_eq!(tags_panel.values[0], 49.0);
    assert_eq!(tags_panel.categories.len(), 2);

    let genres_panel = dash.top_genres_panel();
    let labels = genres_panel.percent_labels.expect("genre bars carry shares");
    assert_eq!(labels.len(), genres_panel.categories.len());

    let distribution = dash.cluster_distribution_panel();
    assert_eq!(distribution.values.iter().sum::<f64>(), 5.0);
}

#[test]
fn test_user_ratings_panel_validates_the_selector_chain() {
    let dash = build_dashboard();

    let assignments = dash.cluster_assignments();
    let (&user, &cluster) = assignments.iter().next().unwrap();
    let panel = dash.user_ratings_panel(cluster, user).unwrap();
    assert_eq!(panel.categories.len(), panel.values.len());
    assert!(!panel.categories.is_empty());

    // A user queried under the wrong cluster is refused (when two clusters
    // were actually produced; with one cluster every user is in it).
    if let Some((&other_user, _)) = assignments.iter().find(|&(_, &c)| c != cluster) {
        assert!(matches!(
            dash.user_ratings_panel(cluster, other_user),
            Err(DashboardError::UserNotInCluster { .. })
        ));
    }
}

#[test]
fn test_insufficient_rows_fail_the_build() {
    let records = synthetic_records();
    let config = PipelineConfig {
        sample_size: 101,
        ..test_config()
    };
    assert!(Dashboard::build(&records, config).is_err());
}

#[test]
fn test_invalid_component_count_fails_the_build() {
    let records = synthetic_records();
    let config = PipelineConfig {
        components: 20, // exceeds min(5, 10) - 1
        ..test_config()
    };
    assert!(Dashboard::build(&records, config).is_err());
}
