use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dashboard::{ChartSpec, Dashboard, PipelineConfig};
use data_loader::UserId;
use std::path::PathBuf;
use std::time::Instant;

/// MovieInsights - interactive movie analytics dashboard
#[derive(Parser)]
#[command(name = "movie-insights")]
#[command(about = "Descriptive analytics and user clustering over a merged ratings dataset", long_about = None)]
struct Cli {
    /// Path to the pre-merged ratings CSV
    #[arg(short, long, default_value = "data/full_merged_cleaned.csv")]
    data: PathBuf,

    /// Rows sampled into the user-item matrix
    #[arg(long, default_value = "10000")]
    sample_size: usize,

    /// Components kept by the truncated factorization
    #[arg(long, default_value = "20")]
    components: usize,

    /// Number of user clusters
    #[arg(long, default_value = "4")]
    clusters: usize,

    /// Seed for sampling, reduction, and clustering
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Emit panels as JSON chart specs instead of text bars
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the four overview panels (ratings per user, tags, genres,
    /// cluster distribution)
    Overview,

    /// Show the cluster and user selector domains
    Selectors,

    /// Top genres among movies rated by one cluster
    Cluster {
        /// Cluster ID to inspect
        #[arg(long)]
        id: usize,
    },

    /// Sampled ratings of one user within a cluster
    User {
        /// Cluster the user belongs to
        #[arg(long)]
        cluster: usize,

        /// User ID to inspect
        #[arg(long)]
        user: UserId,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = PipelineConfig {
        sample_size: cli.sample_size,
        components: cli.components,
        clusters: cli.clusters,
        seed: cli.seed,
        ..PipelineConfig::default()
    };

    // Everything is computed eagerly up front; any failure aborts before a
    // single panel renders.
    println!("Loading ratings from {}...", cli.data.display());
    let start = Instant::now();
    let records = data_loader::load_records(&cli.data)
        .with_context(|| format!("Failed to load ratings from {}", cli.data.display()))?;
    println!(
        "{} Loaded {} rows in {:?}",
        "✓".green(),
        records.len(),
        start.elapsed()
    );

    let start = Instant::now();
    let dash = Dashboard::build(&records, config).context("Failed to build the dashboard")?;
    println!("{} Built dashboard in {:?}", "✓".green(), start.elapsed());

    match cli.command {
        Commands::Overview => handle_overview(&dash, cli.json),
        Commands::Selectors => handle_selectors(&dash),
        Commands::Cluster { id } => handle_cluster(&dash, id, cli.json)?,
        Commands::User { cluster, user } => handle_user(&dash, cluster, user, cli.json)?,
    }

    Ok(())
}

/// Panels 1-4: the selector-free overview.
fn handle_overview(dash: &Dashboard, json: bool) {
    print_panel(&dash.ratings_per_user_panel(), json);
    print_panel(&dash.top_tags_panel(), json);
    print_panel(&dash.top_genres_panel(), json);
    print_panel(&dash.cluster_distribution_panel(), json);
}

/// The selector domains: produced cluster ids, and the users inside each.
fn handle_selectors(dash: &Dashboard) {
    println!("{}", "Selector domains:".bold().blue());
    for cluster in dash.cluster_ids() {
        let users = dash.users_in_cluster(cluster);
        let preview: Vec<String> = users.iter().take(10).map(u32::to_string).collect();
        let suffix = if users.len() > 10 { ", ..." } else { "" };
        println!(
            "{} cluster {}: {} users [{}{}]",
            "•".green(),
            cluster,
            users.len(),
            preview.join(", "),
            suffix
        );
    }
}

/// Panel 5: top genres for the selected cluster.
fn handle_cluster(dash: &Dashboard, id: usize, json: bool) -> Result<()> {
    let panel = dash
        .cluster_genres_panel(id)
        .with_context(|| format!("Cannot render genres for cluster {id}"))?;
    print_panel(&panel, json);
    Ok(())
}

/// Panel 6: the selected user's sampled ratings.
fn handle_user(dash: &Dashboard, cluster: usize, user: UserId, json: bool) -> Result<()> {
    let panel = dash
        .user_ratings_panel(cluster, user)
        .with_context(|| format!("Cannot render ratings for user {user} in cluster {cluster}"))?;
    print_panel(&panel, json);
    Ok(())
}

/// Width of the longest text bar
const BAR_WIDTH: usize = 40;

/// Render one chart spec: pretty JSON in `--json` mode, text bars otherwise.
fn print_panel(panel: &ChartSpec, json: bool) {
    if json {
        // ChartSpec serializes cleanly; a failure here would be a bug, not
        // an input problem.
        match serde_json::to_string_pretty(panel) {
            Ok(text) => println!("{text}"),
            Err(err) => eprintln!("failed to serialize panel: {err}"),
        }
        return;
    }

    println!();
    println!("{}", panel.title.bold().blue());
    let max = panel.values.iter().cloned().fold(0.0_f64, f64::max);
    let label_width = panel
        .categories
        .iter()
        .map(|c| c.chars().count())
        .max()
        .unwrap_or(0)
        .min(30);

    for (i, (category, &value)) in panel.categories.iter().zip(&panel.values).enumerate() {
        let filled = if max > 0.0 {
            ((value / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        let bar = "█".repeat(filled);
        let share = panel
            .percent_labels
            .as_ref()
            .map(|labels| format!(" ({})", labels[i]))
            .unwrap_or_default();
        println!(
            "{:>label_width$} {} {}{}",
            truncate(category, 30),
            bar.cyan(),
            value,
            share
        );
    }
    println!(
        "{} / {}",
        panel.x_label.dimmed(),
        panel.y_label.dimmed()
    );
    println!("{}", panel.caption.cyan());
}

/// Clip long category labels (movie titles, mostly) for the text renderer.
fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let clipped: String = text.chars().take(limit.saturating_sub(3)).collect();
        format!("{clipped}...")
    }
}
