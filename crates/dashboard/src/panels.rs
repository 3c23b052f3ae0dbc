//! The six chart panels.
//!
//! Each panel is a pure function of the dashboard's tables (plus at most one
//! cluster/user selector) producing a renderable [`ChartSpec`]: categories,
//! values, axis labels, and a short explanatory caption. Rendering itself is
//! the presentation shell's job; this module only shapes the data.

use crate::dashboard::Dashboard;
use crate::error::Result;
use crate::ClusterId;
use data_loader::UserId;
use serde::Serialize;

/// How a panel wants to be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Histogram,
    Bar,
    HorizontalBar,
}

/// A renderable chart: one category per entry with its numeric value.
///
/// `percent_labels`, when present, carries a preformatted share-of-total
/// label per bar (the genre panels annotate bars this way).
#[derive(Debug, Clone, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub kind: ChartKind,
    pub x_label: String,
    pub y_label: String,
    pub categories: Vec<String>,
    pub values: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_labels: Option<Vec<String>>,
    pub caption: String,
}

/// Number of bins in the ratings-per-user histogram
const HISTOGRAM_BINS: usize = 30;

impl Dashboard {
    /// Panel 1: histogram of how many movies each user has rated.
    pub fn ratings_per_user_panel(&self) -> ChartSpec {
        let counts: Vec<f64> = self.ratings_per_user().values().map(|&n| n as f64).collect();
        let (categories, values) = histogram(&counts, HISTOGRAM_BINS);
        ChartSpec {
            title: "Number of Ratings per User".to_string(),
            kind: ChartKind::Histogram,
            x_label: "Ratings".to_string(),
            y_label: "Users".to_string(),
            categories,
            values,
            percent_labels: None,
            caption: "How many movies each user has rated. Most users rate only a few."
                .to_string(),
        }
    }

    /// Panel 2: the most-used tags.
    pub fn top_tags_panel(&self) -> ChartSpec {
        let (categories, values) = unzip_counts(self.top_tags());
        ChartSpec {
            title: format!("Top {} Tags Used", self.config().top_tags),
            kind: ChartKind::HorizontalBar,
            x_label: "Frequency".to_string(),
            y_label: "Tags".to_string(),
            categories,
            values,
            percent_labels: None,
            caption: "Tags reflect what users say about movies and are useful for \
                      understanding preferences."
                .to_string(),
        }
    }

    /// Panel 3: the most frequent genres overall, with share-of-total labels.
    pub fn top_genres_panel(&self) -> ChartSpec {
        let (categories, values) = unzip_counts(self.top_genres());
        let percent_labels = Some(percent_labels(&values));
        ChartSpec {
            title: "Top Genres".to_string(),
            kind: ChartKind::HorizontalBar,
            x_label: "Count".to_string(),
            y_label: "Genre".to_string(),
            categories,
            values,
            percent_labels,
            caption: "How frequently each genre appears and its popularity.".to_string(),
        }
    }

    /// Panel 4: how the sampled users spread across clusters.
    pub fn cluster_distribution_panel(&self) -> ChartSpec {
        let sizes = self.cluster_sizes();
        let categories = sizes.keys().map(|c| c.to_string()).collect();
        let values = sizes.values().map(|&n| n as f64).collect();
        ChartSpec {
            title: "User Distribution by Cluster".to_string(),
            kind: ChartKind::Bar,
            x_label: "Cluster ID".to_string(),
            y_label: "Users".to_string(),
            categories,
            values,
            percent_labels: None,
            caption: "Each cluster groups users with similar rating behaviors.".to_string(),
        }
    }

    /// Panel 5: top genres among movies rated by the selected cluster.
    pub fn cluster_genres_panel(&self, cluster: ClusterId) -> Result<ChartSpec> {
        let genres = self.genres_for_cluster(cluster, self.config().cluster_genres)?;
        let (categories, values) = unzip_counts(&genres);
        let percent_labels = Some(percent_labels(&values));
        Ok(ChartSpec {
            title: format!("Top Genres in Cluster {cluster}"),
            kind: ChartKind::HorizontalBar,
            x_label: "Count".to_string(),
            y_label: "Genre".to_string(),
            categories,
            values,
            percent_labels,
            caption: format!(
                "Users in cluster {cluster} mostly watch these genres. Useful for \
                 personalized suggestions."
            ),
        })
    }

    /// Panel 6: the selected user's sampled ratings, one bar per title.
    ///
    /// The user must belong to the selected cluster; the selectors are
    /// chained (cluster first, then a user within it).
    pub fn user_ratings_panel(&self, cluster: ClusterId, user: UserId) -> Result<ChartSpec> {
        self.check_user_in_cluster(cluster, user)?;
        let ratings = self.ratings_for_user(user)?;
        let categories = ratings.iter().map(|(title, _)| title.clone()).collect();
        let values = ratings.iter().map(|&(_, rating)| rating as f64).collect();
        Ok(ChartSpec {
            title: format!("Ratings by User {user}"),
            kind: ChartKind::Bar,
            x_label: "Movie".to_string(),
            y_label: "Rating".to_string(),
            categories,
            values,
            percent_labels: None,
            caption: format!("Movies rated by user {user} in cluster {cluster}."),
        })
    }
}

/// Split a (label, count) table into parallel category/value vectors.
fn unzip_counts(counts: &[(String, u64)]) -> (Vec<String>, Vec<f64>) {
    counts
        .iter()
        .map(|(label, count)| (label.clone(), *count as f64))
        .unzip()
}

/// Format each value's share of the total as a "12.34%" label.
fn percent_labels(values: &[f64]) -> Vec<String> {
    let total: f64 = values.iter().sum();
    values
        .iter()
        .map(|v| {
            if total > 0.0 {
                format!("{:.2}%", v / total * 100.0)
            } else {
                "0.00%".to_string()
            }
        })
        .collect()
}

/// Equal-width histogram over `values`, returning "lo-hi" range categories
/// and per-bin counts. Degenerate inputs (empty, or all values identical)
/// collapse to zero or one bin.
fn histogram(values: &[f64], bins: usize) -> (Vec<String>, Vec<f64>) {
    if values.is_empty() || bins == 0 {
        return (Vec::new(), Vec::new());
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        return (vec![format!("{min:.0}")], vec![values.len() as f64]);
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0u64; bins];
    for &value in values {
        // The maximum falls into the last bin rather than one past it.
        let bin = (((value - min) / width) as usize).min(bins - 1);
        counts[bin] += 1;
    }

    let categories = (0..bins)
        .map(|b| {
            let lo = min + width * b as f64;
            let hi = lo + width;
            format!("{lo:.0}-{hi:.0}")
        })
        .collect();
    (categories, counts.into_iter().map(|n| n as f64).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_counts_every_value_once() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 100.0];
        let (categories, counts) = histogram(&values, 10);
        assert_eq!(categories.len(), 10);
        let total: f64 = counts.iter().sum();
        assert_eq!(total, 5.0);
    }

    #[test]
    fn test_histogram_maximum_lands_in_last_bin() {
        let values = vec![0.0, 10.0];
        let (_, counts) = histogram(&values, 5);
        assert_eq!(counts[0], 1.0);
        assert_eq!(counts[4], 1.0);
    }

    #[test]
    fn test_histogram_identical_values_collapse_to_one_bin() {
        let values = vec![3.0, 3.0, 3.0];
        let (categories, counts) = histogram(&values, 30);
        assert_eq!(categories, vec!["3".to_string()]);
        assert_eq!(counts, vec![3.0]);
    }

    #[test]
    fn test_histogram_empty_input() {
        let (categories, counts) = histogram(&[], 30);
        assert!(categories.is_empty());
        assert!(counts.is_empty());
    }

    #[test]
    fn test_percent_labels_sum_to_roughly_hundred() {
        let labels = percent_labels(&[1.0, 1.0, 2.0]);
        assert_eq!(labels, vec!["25.00%", "25.00%", "50.00%"]);
    }

    #[test]
    fn test_percent_labels_zero_total() {
        assert_eq!(percent_labels(&[0.0, 0.0]), vec!["0.00%", "0.00%"]);
    }
}
