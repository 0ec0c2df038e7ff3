//! Error types for the Bloom filter crate

use thiserror::Error;

/// Errors that can occur while decoding or combining filters
///
/// Construction, insertion and lookup never fail; only the serialized
/// forms and filter unions have error paths.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Binary serialization error: {0}")]
    Binary(#[from] bincode::Error),

    #[error(
        "Incompatible filters: m={m} k={k} strategy={strategy} vs m={other_m} k={other_k} strategy={other_strategy}"
    )]
    IncompatibleFilters {
        m: usize,
        k: usize,
        strategy: String,
        other_m: usize,
        other_k: usize,
        other_strategy: String,
    },
}
