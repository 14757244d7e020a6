//! Error taxonomy for the splitter and vector store.
//!
//! The core fails fast at the point of the bad call and never retries or
//! recovers internally; retry policy for flaky embedding providers lives in
//! the provider implementations. Empty input is not an error anywhere —
//! empty documents yield zero chunks and empty stores yield empty results.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Invalid parameters at construction or call time
    /// (`chunk_overlap >= chunk_size`, `chunk_size == 0`, `k == 0`,
    /// unknown metric name).
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// An embedding vector's length disagrees with the store's established
    /// dimension.
    #[error("embedding dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// The embedding provider failed or returned a malformed response.
    #[error("embedding provider error: {0}")]
    Embedding(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
