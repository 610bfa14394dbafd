use thiserror::Error;

#[derive(Error, Debug)]
pub enum LiveError {
    #[error("URL has no host: {0}")]
    MissingHost(url::Url),

    #[error("No live platform registered for host: {0}")]
    UnsupportedHost(String),

    #[error("Domain already registered: {0}")]
    DuplicateDomain(String),

    #[error(transparent)]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to build live source: {0}")]
    Build(#[source] anyhow::Error),
}

pub type LiveResult<T> = Result<T, LiveError>;
