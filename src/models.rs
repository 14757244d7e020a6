//! Core data types used throughout passage.
//!
//! These types represent the documents, chunks, and stored records that flow
//! through the splitting, embedding, and retrieval pipeline.

use serde::Serialize;

/// Free-form metadata attached to documents and chunks.
///
/// Loaders populate this with origin information (`source`, `page`);
/// the splitter copies it onto every derived chunk.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Immutable input unit supplied by a loader (or constructed directly).
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    /// Full text content.
    pub content: String,
    /// Origin metadata, copied onto derived chunks.
    pub metadata: Metadata,
}

impl Document {
    pub fn new(content: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            content: content.into(),
            metadata,
        }
    }

    /// A document with empty metadata, for plain-text inputs.
    pub fn from_text(content: impl Into<String>) -> Self {
        Self::new(content, Metadata::new())
    }
}

/// A bounded substring of a source document, tagged with its origin offset.
///
/// Produced by [`Splitter`](crate::chunk::Splitter); immutable once emitted.
/// `content` is an exact substring of the parent document, so concatenating
/// chunks (minus overlapped prefixes) reconstructs the original text.
#[derive(Debug, Clone, Serialize)]
pub struct Chunk {
    /// Chunk text, an exact substring of the parent document's content.
    pub content: String,
    /// Parent document metadata plus a `start_index` entry.
    pub metadata: Metadata,
    /// Byte offset of `content` within the parent document's full text.
    pub start_index: usize,
}

impl Chunk {
    pub fn new(content: impl Into<String>, parent_metadata: &Metadata, start_index: usize) -> Self {
        let mut metadata = parent_metadata.clone();
        metadata.insert("start_index".to_string(), start_index.into());
        Self {
            content: content.into(),
            metadata,
            start_index,
        }
    }
}

/// A chunk stored in a [`VectorStore`](crate::store::VectorStore) together
/// with its embedding vector. Lives for the store's lifetime; in-memory only.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    /// Opaque unique identifier (UUID v4), assigned on insertion.
    pub id: String,
    pub chunk: Chunk,
    /// Embedding vector; all records in one store share the same dimension.
    pub embedding: Vec<f32>,
}

/// A ranked search result.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub record: Record,
    /// Similarity score: higher is better for cosine/dot, lower for euclidean.
    pub score: f32,
}
