use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The caller did not supply the viewing agent, so there is nothing to
    /// root the hierarchy at.
    #[error("hierarchy has no root agent")]
    MissingRoot,

    #[error("invalid hierarchy input: {0}")]
    InvalidInput(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
