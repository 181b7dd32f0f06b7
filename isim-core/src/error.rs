//! Shared error type for the isim workspace.

use thiserror::Error;

/// Errors produced by similarity, clustering, and selection operations.
///
/// Failures are synchronous: an operation either returns a complete result
/// or one of these, never partial output. Numeric edge cases (0/0 ratios
/// from zero-variance aggregates) are not errors — the NaN propagates to
/// the caller unclamped.
#[derive(Debug, Error)]
pub enum SimError {
    /// A caller-supplied argument is outside the operation's domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No qualifying element exists, e.g. an empty candidate pool.
    #[error("not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, SimError>;
