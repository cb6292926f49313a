//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
///
/// Every variant is an ordinary, locally-recoverable condition. Callers that
/// want to avoid branching on `NotFound` should prefer the non-failing
/// counterparts (`get_or`, `contains`).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key not found in cache
    #[error("key not found")]
    NotFound,

    /// Capacity must be a strictly positive entry count
    #[error("invalid capacity: {0}")]
    InvalidCapacity(usize),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
