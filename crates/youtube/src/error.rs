use std::{process::ExitStatus, time::Duration};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InvocationError {
    #[error(transparent)]
    MissingExecutable(#[from] which::Error),

    #[error("Failed to spawn resolver: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Resolver exited with {status}: {stderr}")]
    Exit { status: ExitStatus, stderr: String },

    #[error("Resolver did not finish within {0:?}")]
    Timeout(Duration),
}

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Resolver failed: {0}")]
    Invocation(#[from] InvocationError),

    #[error("Invalid resolver output: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No stream URL found")]
    EmptyResult,

    #[error("Invalid stream URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

pub type ResolveResult<T> = Result<T, ResolveError>;
