use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Schema violation: {0}")]
    Validation(String),

    #[error("Invalid profile URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("No profile URLs to scrape: {0}")]
    NoInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;
