use thiserror::Error;

/// Errors raised while talking to Spotify or writing the popularity table.
///
/// An artist that cannot be found is not an error: lookups return `None` or an
/// empty result set instead.
#[derive(Error, Debug)]
pub enum Error {
    /// The token endpoint rejected the client credentials, or the API rejected
    /// the bearer token (invalid or expired).
    #[error("Authorization failed: {0}")]
    Auth(String),

    /// Network failure, timeout, unexpected status or a body that could not be
    /// parsed into the expected payload.
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Transport(format!("unexpected response body: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
