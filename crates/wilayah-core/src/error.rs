// crates/wilayah-core/src/error.rs

//! Error types.
//!
//! Two families live here:
//!
//! - [`WilayahError`] covers everything that happens *before* serving:
//!   reading raw dumps, denormalizing them and (de)serializing the binary
//!   region cache. Any of these aborts the ingestion phase.
//! - [`SearchError`] is the closed set of outcomes a search can fail with.
//!   Front-ends (CLI, HTTP) match on it exhaustively.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, WilayahError>;

/// Errors raised while loading, building or persisting the region database.
#[derive(Debug, Error)]
pub enum WilayahError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary cache error: {0}")]
    Bincode(#[from] bincode::Error),

    #[cfg(feature = "builder")]
    #[error("download failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A dataset file or resource is missing.
    #[error("not found: {0}")]
    NotFound(String),

    /// The raw data is structurally valid but semantically unusable.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// A subdistrict references a province/city/district code that does not exist.
    #[error("subdistrict {code} has no {level} record (expected code {ancestor})")]
    MissingAncestor {
        code: String,
        level: &'static str,
        ancestor: String,
    },

    /// The SQL dump could not be tokenized.
    #[error("parse error at line {line}: {msg}")]
    Parse { line: usize, msg: String },
}

/// Why a search did not produce a result list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Missing or malformed parameter (empty query, non 5-digit postal code).
    #[error("{0}")]
    InvalidInput(String),

    /// Postal code lookup matched nothing.
    #[error("{0}")]
    NotFound(String),

    /// The region store could not be read. The message is safe to show to
    /// callers; the underlying cause is only logged.
    #[error("{0}")]
    StoreFailure(String),
}

impl SearchError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        SearchError::InvalidInput(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        SearchError::NotFound(msg.into())
    }

    /// Short machine-readable tag, handy for logs.
    pub fn code(&self) -> &'static str {
        match self {
            SearchError::InvalidInput(_) => "INVALID_INPUT",
            SearchError::NotFound(_) => "NOT_FOUND",
            SearchError::StoreFailure(_) => "STORE_FAILURE",
        }
    }
}
