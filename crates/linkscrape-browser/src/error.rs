use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Browser error: {0}")]
    Browser(String),

    #[error("CDP error: {0}")]
    Cdp(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session cache error: {0}")]
    Session(#[from] serde_json::Error),

    #[error("Login failed: {0}")]
    Authentication(String),

    #[error("Profile unavailable: {0}")]
    Blocked(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Invalid proxy: {0}")]
    InvalidProxy(String),
}

impl From<chromiumoxide::error::CdpError> for Error {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Error::Cdp(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
