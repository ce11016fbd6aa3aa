use thiserror::Error;

/// Errors raised while building or sending Harbor API requests
#[derive(Error, Debug)]
pub enum HarborError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, HarborError>;

impl From<serde_json::Error> for HarborError {
    fn from(err: serde_json::Error) -> Self {
        HarborError::Parse(err.to_string())
    }
}
