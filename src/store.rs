//! In-memory vector store with linear-scan similarity search.
//!
//! Holds [`Record`]s (chunk + embedding) for the process lifetime. Search is
//! a brute-force scan over all stored vectors: stable sort by score,
//! truncate to k. This is a deliberate simplicity choice — no index
//! structure, so result ordering and tie-breaking (insertion order) are
//! exact and reproducible.
//!
//! The store is synchronous and single-threaded: `&mut self` for insertion,
//! `&self` for search. Callers needing concurrent access wrap it in an
//! external `RwLock`.

use std::cmp::Ordering;

use uuid::Uuid;

use crate::embedding::{cosine_similarity, dot_product, euclidean_distance, Embedder};
use crate::error::{Error, Result};
use crate::models::{Chunk, Record, SearchHit};

/// Similarity metric for ranking stored vectors against a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Cosine similarity, descending. The default.
    Cosine,
    /// Dot product, descending.
    Dot,
    /// Euclidean distance, ascending (closer is better).
    Euclidean,
}

impl Metric {
    /// Parse a config-level metric name.
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "cosine" => Ok(Metric::Cosine),
            "dot" => Ok(Metric::Dot),
            "euclidean" => Ok(Metric::Euclidean),
            other => Err(Error::Configuration(format!(
                "unknown metric: '{}'. Must be cosine, dot, or euclidean.",
                other
            ))),
        }
    }

    fn score(self, query: &[f32], stored: &[f32]) -> f32 {
        match self {
            Metric::Cosine => cosine_similarity(query, stored),
            Metric::Dot => dot_product(query, stored),
            Metric::Euclidean => euclidean_distance(query, stored),
        }
    }

    /// Ordering that puts better scores first.
    fn rank(self, a: f32, b: f32) -> Ordering {
        let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        match self {
            Metric::Cosine | Metric::Dot => ord.reverse(),
            Metric::Euclidean => ord,
        }
    }
}

impl Default for Metric {
    fn default() -> Self {
        Metric::Cosine
    }
}

/// In-memory store of embedded chunks.
///
/// The first inserted vector establishes the store's embedding dimension;
/// every later insert and every query must match it.
#[derive(Debug, Default)]
pub struct VectorStore {
    records: Vec<Record>,
    dims: Option<usize>,
}

impl VectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Embedding dimension, once established by the first insert.
    pub fn dims(&self) -> Option<usize> {
        self.dims
    }

    /// Embed and store a batch of chunks; returns the new record ids in
    /// input order.
    ///
    /// All chunk texts go to the provider in a single `embed` call. The
    /// whole embedded batch is dimension-checked before anything is stored,
    /// so a failing batch leaves the store untouched.
    pub fn insert(&mut self, chunks: &[Chunk], embedder: &dyn Embedder) -> Result<Vec<String>> {
        if chunks.is_empty() {
            return Ok(Vec::new());
        }
        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let vectors = embedder.embed(&texts)?;
        if vectors.len() != chunks.len() {
            return Err(Error::Embedding(anyhow::anyhow!(
                "provider returned {} vectors for {} texts",
                vectors.len(),
                chunks.len()
            )));
        }

        let expected = self.dims.unwrap_or_else(|| vectors[0].len());
        for vector in &vectors {
            if vector.len() != expected {
                return Err(Error::DimensionMismatch {
                    expected,
                    got: vector.len(),
                });
            }
        }

        self.dims = Some(expected);
        let mut ids = Vec::with_capacity(chunks.len());
        for (chunk, embedding) in chunks.iter().zip(vectors) {
            let id = Uuid::new_v4().to_string();
            ids.push(id.clone());
            self.records.push(Record {
                id,
                chunk: chunk.clone(),
                embedding,
            });
        }
        Ok(ids)
    }

    /// Store a chunk with a precomputed embedding; returns the record id.
    pub fn insert_embedded(&mut self, chunk: Chunk, embedding: Vec<f32>) -> Result<String> {
        let expected = self.dims.unwrap_or_else(|| embedding.len());
        if embedding.len() != expected {
            return Err(Error::DimensionMismatch {
                expected,
                got: embedding.len(),
            });
        }
        self.dims = Some(expected);
        let id = Uuid::new_v4().to_string();
        self.records.push(Record {
            id: id.clone(),
            chunk,
            embedding,
        });
        Ok(id)
    }

    /// Rank all stored records against a query embedding and return the top
    /// `min(k, len)` hits.
    ///
    /// `k == 0` is a configuration error. An empty store returns an empty
    /// vec. Ties keep insertion order (stable sort).
    pub fn search(&self, query: &[f32], k: usize, metric: Metric) -> Result<Vec<SearchHit>> {
        if k == 0 {
            return Err(Error::Configuration("k must be > 0".to_string()));
        }
        if self.records.is_empty() {
            return Ok(Vec::new());
        }
        let expected = self.dims.unwrap_or(0);
        if query.len() != expected {
            return Err(Error::DimensionMismatch {
                expected,
                got: query.len(),
            });
        }

        let mut hits: Vec<SearchHit> = self
            .records
            .iter()
            .map(|record| SearchHit {
                record: record.clone(),
                score: metric.score(query, &record.embedding),
            })
            .collect();
        hits.sort_by(|a, b| metric.rank(a.score, b.score));
        hits.truncate(k);
        Ok(hits)
    }

    /// Embed a query string and search with it.
    pub fn search_text(
        &self,
        query: &str,
        k: usize,
        metric: Metric,
        embedder: &dyn Embedder,
    ) -> Result<Vec<SearchHit>> {
        if k == 0 {
            return Err(Error::Configuration("k must be > 0".to_string()));
        }
        if self.records.is_empty() {
            return Ok(Vec::new());
        }
        let vectors = embedder.embed(&[query.to_string()])?;
        let query_vec = vectors
            .into_iter()
            .next()
            .ok_or_else(|| Error::Embedding(anyhow::anyhow!("empty embedding response")))?;
        self.search(&query_vec, k, metric)
    }
}
