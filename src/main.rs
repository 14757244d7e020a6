//! # passage CLI (`psg`)
//!
//! The `psg` binary wraps the passage library for quick inspection and
//! one-shot retrieval over a single file.
//!
//! ## Usage
//!
//! ```bash
//! # Print the chunks a file splits into
//! psg split ./data/report.pdf
//!
//! # Chunk, embed, and answer a similarity query (needs an embedding
//! # provider configured in passage.toml)
//! psg query ./data/report.pdf "How were distribution centers affected?"
//! ```
//!
//! Both commands accept `--config` (default `./passage.toml`) plus inline
//! overrides for the chunking and retrieval knobs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use passage::config::{self, Config};
use passage::pipeline;

/// passage — document chunking and in-memory semantic search.
#[derive(Parser)]
#[command(
    name = "psg",
    about = "passage — split documents into overlapping chunks and search them semantically",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./passage.toml")]
    config: PathBuf,

    /// Override chunking.chunk_size.
    #[arg(long, global = true)]
    chunk_size: Option<usize>,

    /// Override chunking.chunk_overlap.
    #[arg(long, global = true)]
    chunk_overlap: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a file into chunks and print them with their start offsets.
    ///
    /// Works without a config file; defaults are chunk_size=1000,
    /// chunk_overlap=200.
    Split {
        /// File to split (`.pdf` is extracted per page, anything else is
        /// read as plain text).
        file: PathBuf,
    },

    /// Chunk and embed a file, then print the top matches for a query.
    ///
    /// Requires an embedding provider in the config (`openai` or `ollama`).
    Query {
        /// File to index.
        file: PathBuf,

        /// The query string.
        query: String,

        /// Override retrieval.top_k.
        #[arg(long)]
        top_k: Option<usize>,

        /// Override retrieval.metric: cosine, dot, or euclidean.
        #[arg(long)]
        metric: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg = match &cli.command {
        // Splitting needs no provider, so a missing config file falls back
        // to defaults.
        Commands::Split { .. } if !cli.config.exists() => Config::default(),
        _ => config::load_config(&cli.config)?,
    };

    if let Some(chunk_size) = cli.chunk_size {
        cfg.chunking.chunk_size = chunk_size;
    }
    if let Some(chunk_overlap) = cli.chunk_overlap {
        cfg.chunking.chunk_overlap = chunk_overlap;
    }

    match cli.command {
        Commands::Split { file } => {
            pipeline::run_split(&cfg, &file)?;
        }
        Commands::Query {
            file,
            query,
            top_k,
            metric,
        } => {
            if let Some(top_k) = top_k {
                cfg.retrieval.top_k = top_k;
            }
            if let Some(metric) = metric {
                cfg.retrieval.metric = metric;
            }
            pipeline::run_query(&cfg, &file, &query)?;
        }
    }

    Ok(())
}
