//! Command runners assembling the load → split → embed → search pipeline.
//!
//! These functions own all printing; the core modules they call are pure.
//! Data flow: loader documents → [`Splitter`] chunks → [`Embedder`] vectors
//! → [`VectorStore`] records → ranked [`SearchHit`]s.

use std::path::Path;

use anyhow::Result;

use crate::chunk::Splitter;
use crate::config::{ChunkingConfig, Config};
use crate::embedding::create_embedder;
use crate::models::SearchHit;
use crate::store::{Metric, VectorStore};
use crate::{loader, models::Chunk};

/// Build a splitter from the chunking config, applying a custom separator
/// ladder when one is configured.
pub fn build_splitter(cfg: &ChunkingConfig) -> Result<Splitter> {
    let splitter = Splitter::new(cfg.chunk_size, cfg.chunk_overlap)?;
    Ok(match &cfg.separators {
        Some(separators) => splitter.with_separators(separators.clone()),
        None => splitter,
    })
}

/// Load a file, split it, and print every chunk with its offset.
pub fn run_split(cfg: &Config, path: &Path) -> Result<()> {
    let documents = loader::load_path(path)?;
    let splitter = build_splitter(&cfg.chunking)?;
    let chunks = splitter.split_documents(&documents);

    for (i, chunk) in chunks.iter().enumerate() {
        println!("chunk {} {}", i, describe(chunk));
        println!("{}", chunk.content);
        println!("{}", "_".repeat(55));
    }
    println!(
        "{} document(s) -> {} chunk(s) (chunk_size={}, chunk_overlap={})",
        documents.len(),
        chunks.len(),
        cfg.chunking.chunk_size,
        cfg.chunking.chunk_overlap
    );
    Ok(())
}

/// Full retrieval pipeline: load, split, embed, store, and answer a query.
pub fn run_query(cfg: &Config, path: &Path, query: &str) -> Result<()> {
    let documents = loader::load_path(path)?;
    let splitter = build_splitter(&cfg.chunking)?;
    let chunks = splitter.split_documents(&documents);
    if chunks.is_empty() {
        println!("No text found in {}; nothing to search.", path.display());
        return Ok(());
    }

    let embedder = create_embedder(&cfg.embedding)?;
    let metric = Metric::parse(&cfg.retrieval.metric)?;

    let mut store = VectorStore::new();
    for batch in chunks.chunks(cfg.embedding.batch_size.max(1)) {
        store.insert(batch, embedder.as_ref())?;
    }

    let hits = store.search_text(query, cfg.retrieval.top_k, metric, embedder.as_ref())?;

    if hits.is_empty() {
        println!("No results.");
        return Ok(());
    }
    println!(
        "Top {} of {} chunk(s) by {} ({}):",
        hits.len(),
        store.len(),
        cfg.retrieval.metric,
        embedder.model_name()
    );
    for (rank, hit) in hits.iter().enumerate() {
        print_hit(rank + 1, hit);
    }
    Ok(())
}

fn describe(chunk: &Chunk) -> String {
    match chunk.metadata.get("page").and_then(|p| p.as_u64()) {
        Some(page) => format!(
            "(page {}, start {}, {} chars)",
            page,
            chunk.start_index,
            chunk.content.chars().count()
        ),
        None => format!(
            "(start {}, {} chars)",
            chunk.start_index,
            chunk.content.chars().count()
        ),
    }
}

fn print_hit(rank: usize, hit: &SearchHit) {
    let snippet: String = hit.record.chunk.content.chars().take(240).collect();
    println!(
        "{:>3}. score={:.4} {}",
        rank,
        hit.score,
        describe(&hit.record.chunk)
    );
    println!("     {}", snippet.replace('\n', " "));
}
