//! Error taxonomy for the convolution layer
//!
//! All errors terminate the operation that raised them; the layer performs no
//! I/O during forward/backward, so nothing here is retryable.

use thiserror::Error;

/// Errors raised by [`ConvLayer`](crate::conv::ConvLayer) operations.
#[derive(Debug, Error)]
pub enum ConvError {
    /// The upstream gradient volume does not match the shape of the most
    /// recent forward output. Shapes are `(rows, cols, filters)`.
    #[error("upstream gradient shape {actual:?} does not match last forward output shape {expected:?}")]
    ShapeMismatch {
        expected: (usize, usize, usize),
        actual: (usize, usize, usize),
    },

    /// `backward` was called without a forward pass establishing a cached
    /// input (either never, or the cache was already consumed by a previous
    /// backward call).
    #[error("backward called with no cached input; run forward first")]
    StaleState,

    /// A filter bank failed validation (wrong weight count, zero filters,
    /// or non-finite weights).
    #[error("invalid filter bank: {0}")]
    InvalidFilterBank(String),

    /// File I/O failure while saving or loading filters.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failure while saving or loading filters.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
