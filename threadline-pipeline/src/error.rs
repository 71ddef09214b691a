//! Pipeline error types.
//!
//! Every failure mode has a named variant. No stringly-typed errors.
//!
//! Structural gaps (a required column missing from a source table, an
//! unreadable required file) abort the run before any artifact is written.
//! Value-level gaps never surface here — they are absorbed by coercion
//! defaults in `threadline-metrics::coerce`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EtlError {
    #[error("Missing required column '{column}' in {table} table")]
    MissingColumn { table: String, column: String },

    #[error("{table} table has no data rows")]
    EmptyTable { table: String },

    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV parse error in {table} table at line {line}: {message}")]
    Csv {
        table: String,
        line: usize,
        message: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for pipeline operations.
pub type EtlResult<T> = Result<T, EtlError>;
