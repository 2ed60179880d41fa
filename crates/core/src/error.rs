//! Error types shared across the annotation pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort an annotation run.
///
/// Recoverable conditions (unrecognized documents, unresolved failure
/// locations, a missing check run) are not errors; they surface as `None`
/// or as a [`crate::PublishOutcome`] variant instead.
#[derive(Error, Debug)]
pub enum AnnotateError {
    #[error("Invalid report glob `{pattern}`: {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed report document {}: {reason}", path.display())]
    MalformedDocument { path: PathBuf, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("{0}")]
    Publish(String),
}
