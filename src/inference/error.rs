//! Error types for record ingestion
//!
//! Malformed records are skippable at the batch level; store rejections are
//! fatal for the record that triggered them, with no retry. The lattice,
//! the pairwise merger and the consistency trackers are total functions and
//! have no error paths. An unresolvable geometry content index is not an
//! error either: the resolver returns `None` and the feature is emitted
//! without geometry.

use thiserror::Error;

/// Errors that can occur during record ingestion
#[derive(Error, Debug, Clone)]
pub enum IngestError {
    /// Record lacks the expected shape; skip and continue
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// A field with this name already exists; callers must look up first
    #[error("field \"{name}\" already exists")]
    DuplicateField { name: String },

    /// Field index outside the registry
    #[error("field index {index} out of range ({len} fields)")]
    FieldIndexOutOfRange { index: usize, len: usize },

    /// The external store refused an operation; fatal for this record
    #[error("feature store rejected {operation}: {message}")]
    StoreRejection {
        operation: &'static str,
        message: String,
    },
}
