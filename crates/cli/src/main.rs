mod config;
mod display;
mod selector;
mod session;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::DataIndex;
use poster_client::TmdbClient;
use recommender::RecommendationOrchestrator;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::display::DEFAULT_COLUMN_WIDTH;
use crate::selector::{resolve_selection, search_titles};
use crate::session::Session;

/// Movie Recommender System
#[derive(Parser)]
#[command(name = "movie-recs")]
#[command(about = "Content-based movie recommendations with TMDB posters", long_about = None)]
struct Cli {
    /// Movie table artifact (overrides MOVIES_PATH)
    #[arg(long, global = true)]
    movies: Option<PathBuf>,

    /// Similarity matrix artifact (overrides SIMILARITY_PATH)
    #[arg(long, global = true)]
    similarity: Option<PathBuf>,

    /// Width of one result column, in characters
    #[arg(long, global = true, default_value_t = DEFAULT_COLUMN_WIDTH)]
    width: usize,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick movies and get recommendations interactively (default)
    Interactive,

    /// Recommend movies similar to one title and exit
    Recommend {
        /// Exact title or option number
        #[arg(long)]
        title: String,
    },

    /// List the selectable titles
    Titles {
        /// Only titles containing this text (case-insensitive)
        #[arg(long)]
        search: Option<String>,

        /// Maximum number of titles to print
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr so they never interleave with the grid
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(path) = cli.movies {
        config.movies_path = path;
    }
    if let Some(path) = cli.similarity {
        config.similarity_path = path;
    }

    let data_index = Arc::new(load_artifacts(
        &config.movies_path,
        &config.similarity_path,
        &mut io::stderr(),
    )?);

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => {
            let orchestrator = build_orchestrator(&config, data_index)?;
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            Session::new(orchestrator)
                .with_column_width(cli.width)
                .run(stdin.lock(), &mut stdout)
                .await?;
        }
        Commands::Recommend { title } => {
            let orchestrator = build_orchestrator(&config, data_index)?;
            handle_recommend(&orchestrator, &title, cli.width).await?;
        }
        Commands::Titles { search, limit } => handle_titles(&data_index, search, limit)?,
    }

    Ok(())
}

/// Load both artifacts, writing the load status or the user-facing failure
/// message to `status`
fn load_artifacts<W: Write>(
    movies_path: &Path,
    similarity_path: &Path,
    status: &mut W,
) -> Result<DataIndex> {
    let start = Instant::now();

    match DataIndex::load_from_files(movies_path, similarity_path) {
        Ok(index) => {
            writeln!(
                status,
                "{} Loaded {} movies in {:?}",
                "✓".green(),
                index.len(),
                start.elapsed()
            )?;
            Ok(index)
        }
        Err(e) => {
            let message = display::artifact_error_message(&e);
            writeln!(status, "{} {}", "✗".red(), message.red())?;
            Err(e).context("Failed to load model files")
        }
    }
}

fn build_orchestrator(
    config: &Config,
    data_index: Arc<DataIndex>,
) -> Result<RecommendationOrchestrator> {
    let client = TmdbClient::new(config.tmdb_settings()).context("Failed to build TMDB client")?;
    Ok(RecommendationOrchestrator::new(data_index, Arc::new(client)))
}

/// Handle the 'recommend' command
async fn handle_recommend(
    orchestrator: &RecommendationOrchestrator,
    title: &str,
    column_width: usize,
) -> Result<()> {
    let data_index = orchestrator.data_index();
    let position = resolve_selection(data_index, title).ok_or_else(|| {
        let suggestions: Vec<&str> = search_titles(data_index, title, 5)
            .into_iter()
            .map(|(_, t)| t)
            .collect();
        if suggestions.is_empty() {
            anyhow!("'{}' is not one of the options", title)
        } else {
            anyhow!(
                "'{}' is not one of the options. Did you mean: {}?",
                title,
                suggestions.join(", ")
            )
        }
    })?;

    let selected = data_index
        .movie_at(position)
        .map(|m| m.title.clone())
        .ok_or_else(|| anyhow!("Option {} is out of range", position + 1))?;

    let set = orchestrator.recommend(&selected).await?;

    let mut stdout = io::stdout();
    write!(stdout, "{}", display::render_header())?;
    writeln!(stdout, "{}: {}", display::SELECT_LABEL, selected.green())?;
    for notice in &set.notices {
        writeln!(stdout, "{}", display::render_notice(notice))?;
    }
    write!(
        stdout,
        "{}",
        display::render_grid(&set.recommendations, column_width)
    )?;
    Ok(())
}

/// Handle the 'titles' command
fn handle_titles(data_index: &DataIndex, search: Option<String>, limit: Option<usize>) -> Result<()> {
    let limit = limit.unwrap_or(usize::MAX);
    let mut stdout = io::stdout();

    match search {
        Some(query) => {
            let matches = search_titles(data_index, &query, limit);
            if matches.is_empty() {
                writeln!(stdout, "No titles match '{}'", query)?;
            }
            for (position, title) in matches {
                writeln!(stdout, "{:>5}. {}", position + 1, title)?;
            }
        }
        None => {
            for (position, title) in data_index.titles().enumerate().take(limit) {
                writeln!(stdout, "{:>5}. {}", position + 1, title)?;
            }
        }
    }

    Ok(())
}
