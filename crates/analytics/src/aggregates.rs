//! Descriptive aggregates over the loaded rating records.
//!
//! These are pure read-only transforms: ratings-per-user counts, top-N tag
//! frequencies, and top-N genre frequencies after exploding the pipe-joined
//! genre field into one count per (record, genre) pair. They are independent
//! of the sampling/clustering pipeline and always see the full record set.

use data_loader::{RatingRecord, UserId};
use std::collections::{BTreeMap, HashMap};

/// Count how many rating rows each user contributed.
///
/// Returned as a BTreeMap so iteration is ordered by user id. A rating of
/// any value counts the same; there is no special-casing by value.
pub fn count_ratings_per_user(records: &[RatingRecord]) -> BTreeMap<UserId, u64> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.user_id).or_insert(0) += 1;
    }
    counts
}

/// The `k` most frequent tags, descending by frequency.
///
/// Rows without a tag are excluded entirely; they never count as an
/// "empty tag" category. Ties are broken by first-encountered order, so the
/// result is stable for a given record order.
pub fn top_tags(records: &[RatingRecord], k: usize) -> Vec<(String, u64)> {
    top_k_counts(records.iter().filter_map(|r| r.tag.as_deref()), k)
}

/// The `k` most frequent genres, descending by frequency.
///
/// Each record's genre field is exploded into individual tokens first: a
/// record with genres "Action|Comedy" contributes one count to "Action" and
/// one to "Comedy".
pub fn top_genres(records: &[RatingRecord], k: usize) -> Vec<(String, u64)> {
    top_k_counts(records.iter().flat_map(|r| r.genre_list()), k)
}

/// Count token occurrences and keep the top `k`, descending by count with
/// ties broken by first-encountered order.
///
/// Shared by the aggregate functions above and by the dashboard's
/// per-cluster genre join.
pub fn top_k_counts<'a, I>(tokens: I, k: usize) -> Vec<(String, u64)>
where
    I: IntoIterator<Item = &'a str>,
{
    // Value is (count, first-seen index); the index is the tie-breaker.
    let mut counts: HashMap<&str, (u64, usize)> = HashMap::new();
    for token in tokens {
        let first_seen = counts.len();
        counts.entry(token).or_insert((0, first_seen)).0 += 1;
    }

    let mut ranked: Vec<(&str, (u64, usize))> = counts.into_iter().collect();
    ranked.sort_by(|(_, (count_a, seen_a)), (_, (count_b, seen_b))| {
        count_b.cmp(count_a).then(seen_a.cmp(seen_b))
    });
    ranked
        .into_iter()
        .take(k)
        .map(|(token, (count, _))| (token.to_string(), count))
        .collect()
}
