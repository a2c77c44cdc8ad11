use thiserror::Error;

#[derive(Error, Debug)]
pub enum TineError {
    #[error("upstream fetch failed: {0}")]
    UpstreamFetch(String),

    #[error("divergence fetch failed: {0}")]
    DiffFetch(String),

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("github error: {0}")]
    GitHub(String),

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TineError>;
