use harbor_core::HarborError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HttpError {
    #[error("HTTP error: {0}")]
    Transport(#[from] ureq::Error),
}

pub type Result<T> = std::result::Result<T, HttpError>;

impl From<HttpError> for HarborError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Transport(e) => HarborError::Http(e.to_string()),
        }
    }
}
