//! Structured error types for the engine.
//!
//! Every variant is a local, recoverable condition. Hosts are expected to
//! turn these into placeholder states rather than abort.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    #[error("slide index {index} out of range (slide count {slide_count})")]
    OutOfRange { index: usize, slide_count: usize },

    #[error("collection is empty")]
    EmptyCollection,

    #[error("dataset has no points")]
    EmptyDataset,

    #[error("need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("unknown period '{0}'")]
    UnknownPeriod(String),

    #[error("value {value} is below every bucket floor")]
    NoMatchingBucket { value: f64 },

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("duplicate field '{0}' in schema")]
    DuplicateField(String),

    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("no series descriptor for field '{0}'")]
    MissingSeries(String),

    #[error("widgets per slide must be at least 1")]
    InvalidPageSize,

    #[error("field '{field}' sums to zero, shares are undefined")]
    ZeroTotal { field: String },
}

pub type Result<T> = std::result::Result<T, DashboardError>;
