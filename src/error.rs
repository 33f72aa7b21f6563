use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that stop a run before the population steps start.
#[derive(Debug, Error)]
pub enum FillError {
    #[error(
        "{} not found. Place it in the working directory or pass --tasks-file.",
        .path.display()
    )]
    TaskFileMissing { path: PathBuf },
    #[error("cannot read {}: {source}", .path.display())]
    TaskFileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} contains no task names", .path.display())]
    NoTaskNames { path: PathBuf },
    #[error("invalid target {target}: {reason}")]
    InvalidTarget { target: String, reason: String },
    #[error("cannot build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Outcome of a single creation request that did not produce a record.
#[derive(Debug, Error)]
pub enum CreateError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("bad JSON from server: {0}")]
    BadJson(#[source] serde_json::Error),
    #[error("unexpected data payload: {0}")]
    MalformedData(#[source] serde_json::Error),
    #[error("{}", .message.as_deref().unwrap_or("no message"))]
    Rejected { message: Option<String> },
}
