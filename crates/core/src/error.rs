use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CourseprepError {
    #[error("No input supplied: pass --web and/or --youtube")]
    NoInputSupplied,

    #[error("No usable input: web={web}, youtube={youtube}")]
    NoUsableInput {
        web: &'static str,
        youtube: &'static str,
    },

    #[error("Malformed {document} document: {reason}")]
    MalformedInput {
        document: &'static str,
        reason: String,
    },

    #[error("Failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, CourseprepError>;
