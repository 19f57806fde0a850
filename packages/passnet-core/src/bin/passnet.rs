//! passnet CLI
//!
//! # Usage
//!
//! ```bash
//! # Score every (match, team) in an events file and fold it into the database
//! passnet run --events RawData/events/events_Italy.json --db Databases/Data_Italy.db
//!
//! # One team only
//! passnet run --events events.json --match 2575959 --team 3158
//!
//! # Graph density and clustering for one team
//! passnet metrics --events events.json --match 2575959 --team 3158
//!
//! # Top players by average betweenness, at least 10 games
//! passnet top --db Databases/Data_Italy.db --metric betweenness --min-games 10
//! ```
//!
//! Logging follows `RUST_LOG` (default `info`).

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use passnet_core::features::enrichment::collect_player_stats;
use passnet_core::features::ingest::load_events;
use passnet_core::features::ranking::{rank, Metric};
use passnet_core::features::selection::{numbered, select, Competition};
use passnet_core::pipeline::discover_pairs;
use passnet_core::{
    BatchRunner, GraphBuilder, GraphMetrics, MatchId, MatchTeam, PassnetConfig, StatsPipeline,
    TeamId,
};
use passnet_storage::{AggregateStore, InMemoryAggregateStore, SqliteAggregateStore};

#[derive(Parser)]
#[command(name = "passnet")]
#[command(about = "Passing-network centrality per team and match", long_about = None)]
struct Cli {
    /// YAML config (version: 1)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build, score and persist pass graphs
    Run {
        /// Events JSON file
        #[arg(short, long)]
        events: PathBuf,

        /// SQLite database (overrides storage.database_path)
        #[arg(long)]
        db: Option<PathBuf>,

        /// Only this match (requires --team)
        #[arg(long = "match", requires = "team")]
        match_id: Option<u64>,

        /// Only this team (requires --match)
        #[arg(long, requires = "match_id")]
        team: Option<u64>,

        /// Worker threads (overrides parallel.num_threads)
        #[arg(long)]
        threads: Option<usize>,

        /// Compute and count, but write to a throwaway in-memory store
        #[arg(long)]
        dry_run: bool,
    },

    /// Print graph metrics and per-player scores for one team
    Metrics {
        #[arg(short, long)]
        events: PathBuf,

        #[arg(long = "match")]
        match_id: u64,

        #[arg(long)]
        team: u64,
    },

    /// Rank players by per-game averages
    Top {
        #[arg(long)]
        db: Option<PathBuf>,

        /// betweenness, pagerank or degree
        #[arg(short, long, default_value = "betweenness")]
        metric: Metric,

        #[arg(long, default_value = "10")]
        min_games: u32,

        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// List the dataset competitions
    Competitions,

    /// Pick a competition by index and print its dataset files
    SelectCompetition {
        index: usize,

        /// Dataset root containing events/ and matches/
        #[arg(long, default_value = "RawData")]
        data_root: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => PassnetConfig::from_yaml(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PassnetConfig::default(),
    };

    match cli.command {
        Commands::Run {
            events,
            db,
            match_id,
            team,
            threads,
            dry_run,
        } => {
            if let Some(db) = db {
                config.storage.database_path = db;
            }
            if let Some(threads) = threads {
                config.parallel.num_threads = threads;
            }
            config.validate()?;

            let pair = match (match_id, team) {
                (Some(m), Some(t)) => Some(MatchTeam::new(MatchId(m), TeamId(t))),
                _ => None,
            };
            run_batch(&config, &events, pair, dry_run)
        }
        Commands::Metrics {
            events,
            match_id,
            team,
        } => print_metrics(&config, &events, MatchId(match_id), TeamId(team)),
        Commands::Top {
            db,
            metric,
            min_games,
            limit,
        } => {
            let path = db.unwrap_or_else(|| config.storage.database_path.clone());
            print_top(&config, path, metric, min_games, limit)
        }
        Commands::Competitions => {
            for line in numbered(&Competition::ALL) {
                println!("{}", line);
            }
            Ok(())
        }
        Commands::SelectCompetition { index, data_root } => {
            let competition = select(&Competition::ALL, index)?;
            println!("competition: {}", competition);
            println!("events:      {}", competition.events_file(&data_root).display());
            println!("matches:     {}", competition.matches_file(&data_root).display());
            println!("database:    {}", competition.database_file("Databases").display());
            Ok(())
        }
    }
}

fn run_batch(
    config: &PassnetConfig,
    events_path: &Path,
    pair: Option<MatchTeam>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let events = load_events(events_path)
        .with_context(|| format!("reading events {}", events_path.display()))?;
    let pairs = match pair {
        Some(pair) => vec![pair],
        None => discover_pairs(&events),
    };

    let store: Box<dyn AggregateStore> = if dry_run {
        Box::new(InMemoryAggregateStore::new())
    } else {
        Box::new(
            SqliteAggregateStore::open(
                &config.storage.database_path,
                config.storage.store_options(),
            )
            .with_context(|| {
                format!(
                    "opening database {}",
                    config.storage.database_path.display()
                )
            })?,
        )
    };

    let runner = BatchRunner::new(store.as_ref(), config)?;
    let report = runner.run(&events, &pairs);

    for pair_report in &report.pairs {
        match &pair_report.result {
            Ok(outcome) => {
                for failure in outcome.failures() {
                    eprintln!("{}: {}", pair_report.pair, failure);
                }
            }
            Err(e) => eprintln!("{}: {}", pair_report.pair, e),
        }
    }

    let summary = report.summary();
    println!("{}", serde_json::to_string_pretty(&summary)?);

    if summary.failed > 0 || summary.errors > 0 {
        bail!(
            "{} pair(s) failed, {} pair(s) aborted",
            summary.failed,
            summary.errors
        );
    }
    Ok(())
}

fn print_metrics(
    config: &PassnetConfig,
    events_path: &Path,
    match_id: MatchId,
    team_id: TeamId,
) -> anyhow::Result<()> {
    let events = load_events(events_path)?;
    let graph = GraphBuilder::build(&events, match_id, team_id);

    let Some(metrics) = GraphMetrics::compute(&graph) else {
        println!(
            "match {} team {}: {} player(s), not enough for metrics",
            match_id,
            team_id,
            graph.node_count()
        );
        return Ok(());
    };

    println!(
        "match {} team {}: {} players, {} edges, {} transitions",
        match_id,
        team_id,
        graph.node_count(),
        graph.edge_count(),
        graph.total_weight()
    );
    println!("density:            {:.4}", metrics.density);
    println!("average clustering: {:.4}", metrics.average_clustering);

    let scratch = InMemoryAggregateStore::new();
    let scores = StatsPipeline::new(&scratch, &config.centrality).analyze(&events, match_id, team_id)?;
    let team_events: Vec<_> = events
        .into_iter()
        .filter(|e| e.match_id == match_id && e.team_id == team_id)
        .collect();
    let stats = collect_player_stats(&team_events);

    println!();
    println!(
        "{:>10} {:>12} {:>10} {:>8} {:>7} {:>6} {:>6}",
        "player", "betweenness", "pagerank", "degree", "passes", "goals", "assists"
    );
    for (player, s) in scores.iter() {
        let counts = stats.get(&player).copied().unwrap_or_default();
        println!(
            "{:>10} {:>12.4} {:>10.4} {:>8.0} {:>7} {:>6} {:>6}",
            player,
            s.betweenness,
            s.pagerank,
            s.degree,
            counts.total_passes,
            counts.goals,
            counts.assists
        );
    }
    Ok(())
}

fn print_top(
    config: &PassnetConfig,
    path: PathBuf,
    metric: Metric,
    min_games: u32,
    limit: usize,
) -> anyhow::Result<()> {
    let store = SqliteAggregateStore::open(&path, config.storage.store_options())
        .with_context(|| format!("opening database {}", path.display()))?;
    let aggregates = store.list()?;
    let ranked = rank(&aggregates, metric, min_games, limit);

    println!(
        "Top {} players by average {} (min {} games, {} players on file):",
        limit,
        metric,
        min_games,
        aggregates.len()
    );
    for (position, row) in ranked.iter().enumerate() {
        println!(
            "{:>3}. player {:>10}  {:>10.4}  ({} games)",
            position + 1,
            row.player_id,
            metric.value(row),
            row.games
        );
    }
    Ok(())
}
