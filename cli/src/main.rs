//! Command-line driver for typeahead search over a labels file.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_subscriber::EnvFilter;
use typeahead_core::index::{IndexBuilder, IndexSnapshot, SnapshotCodec};
use typeahead_core::storage::{IndexCache, RedbStore};
use typeahead_core::types::{AppConfig, IndexConfig, IndexMode};
use typeahead_search::{SearchEngine, SearchResult};

#[derive(Parser)]
#[command(name = "typeahead")]
#[command(about = "Typo-tolerant search over a list of labels")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run queries against a labels file (one label per line)
    Search {
        labels: PathBuf,

        #[arg(required = true)]
        queries: Vec<String>,

        /// Index mode; `auto` picks by collection size
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,

        /// redb file used to cache the built index
        #[arg(long)]
        cache: Option<PathBuf>,

        /// Quick prefix match instead of the full ranking
        #[arg(long)]
        quick: bool,
    },

    /// Print the effective configuration as TOML
    Config,

    /// Write an encoded index snapshot for a labels file
    Snapshot {
        labels: PathBuf,

        out: PathBuf,

        #[arg(long, value_enum)]
        mode: Option<ModeArg>,

        /// Encode as JSON instead of postcard
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Exhaustive,
    Optimized,
    Auto,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Search {
            labels,
            queries,
            mode,
            cache,
            quick,
        } => {
            let items = read_labels(&labels)?;
            let index_config = index_config(&config, mode, items.len());
            let engine = open_engine(items, &index_config, &config, cache.as_deref());

            let batches: Vec<Vec<SearchResult>> = queries
                .iter()
                .map(|query| {
                    if quick {
                        engine.quick_search(query)
                    } else {
                        engine.search(query)
                    }
                })
                .collect();
            print!("{}", format_batches(&batches));
        }
        Commands::Config => {
            print!("{}", config.to_toml()?);
        }
        Commands::Snapshot {
            labels,
            out,
            mode,
            json,
        } => {
            let items = read_labels(&labels)?;
            let index_config = index_config(&config, mode, items.len());
            let codec = if json {
                SnapshotCodec::Json
            } else {
                SnapshotCodec::Postcard
            };
            write_snapshot(&items, &index_config, codec, &out)?;
        }
    }

    Ok(())
}

/// Loads the config file if given, replacing invalid sections with defaults.
fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let Some(path) = path else {
        return Ok(AppConfig::default());
    };

    let config = AppConfig::load(path)
        .with_context(|| format!("failed to load config from {}", path.display()))?;
    let problems = config.validate();
    if problems.is_empty() {
        return Ok(config);
    }

    for problem in &problems {
        warn!(path = %path.display(), "{problem}");
    }
    Ok(config.with_defaults_for_invalid())
}

/// Non-blank lines of the labels file, in order.
fn read_labels(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read labels from {}", path.display()))?;

    Ok(content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect())
}

fn index_config(config: &AppConfig, mode: Option<ModeArg>, item_count: usize) -> IndexConfig {
    let index = config.index.clone();
    match mode {
        None => index,
        Some(ModeArg::Auto) => index.sized_for(item_count),
        Some(ModeArg::Exhaustive) => IndexConfig {
            mode: IndexMode::Exhaustive,
            ..index
        },
        Some(ModeArg::Optimized) => IndexConfig {
            mode: IndexMode::Optimized,
            ..index
        },
    }
}

/// Builds the engine, going through the redb cache when one is given.
///
/// A cache that cannot be opened is logged and skipped.
fn open_engine(
    items: Vec<String>,
    index_config: &IndexConfig,
    config: &AppConfig,
    cache: Option<&Path>,
) -> SearchEngine {
    let scoring = config.scoring.clone();

    let Some(path) = cache else {
        return SearchEngine::build(items, index_config, scoring);
    };

    match RedbStore::open(path) {
        Ok(store) => {
            let mut cache = IndexCache::new(store);
            SearchEngine::open_cached(items, index_config, scoring, &mut cache)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "index cache unavailable");
            SearchEngine::build(items, index_config, scoring)
        }
    }
}

fn format_results(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| format!("{}\t{}\t{}\n", r.score, r.id, r.item))
        .collect()
}

/// One block per query, separated by a blank line.
fn format_batches(batches: &[Vec<SearchResult>]) -> String {
    batches
        .iter()
        .map(|results| format_results(results))
        .collect::<Vec<_>>()
        .join("\n")
}

fn write_snapshot(
    items: &[String],
    index_config: &IndexConfig,
    codec: SnapshotCodec,
    out: &Path,
) -> Result<()> {
    let index = IndexBuilder::new(index_config.clone()).build(items);
    let bytes = IndexSnapshot::capture(&index).to_bytes(codec)?;
    fs::write(out, bytes).with_context(|| format!("failed to write {}", out.display()))?;
    Ok(())
}
