//! # passage
//!
//! Document chunking and in-memory semantic search.
//!
//! passage splits documents into overlapping text chunks with a recursive
//! character splitter that tracks each chunk's start offset, embeds the
//! chunks through a pluggable provider, and answers similarity queries
//! from an in-memory vector store with exact linear-scan ranking.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────┐   ┌──────────┐   ┌──────────┐   ┌─────────────┐
//! │ Loader  │──▶│ Splitter │──▶│ Embedder │──▶│ VectorStore │
//! │ PDF/txt │   │ overlap+ │   │ OpenAI/  │   │ linear-scan │
//! └─────────┘   │ offsets  │   │ Ollama   │   │ top-k       │
//!               └──────────┘   └──────────┘   └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use passage::chunk::Splitter;
//! use passage::models::Document;
//!
//! let splitter = Splitter::new(1000, 200).unwrap();
//! let doc = Document::from_text("Some long text...");
//! let chunks = splitter.split_document(&doc);
//! assert_eq!(chunks[0].start_index, 0);
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Core data types |
//! | [`chunk`] | Recursive character splitting with overlap |
//! | [`store`] | In-memory vector store and similarity search |
//! | [`embedding`] | Embedding providers and vector functions |
//! | [`loader`] | PDF and plain-text document loading |
//! | [`config`] | TOML configuration parsing |
//! | [`error`] | Core error taxonomy |
//! | [`pipeline`] | CLI command runners |

pub mod chunk;
pub mod config;
pub mod embedding;
pub mod error;
pub mod loader;
pub mod models;
pub mod pipeline;
pub mod store;

pub use error::Error;
