use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Invalid search host: {0}")]
    InvalidHost(String),

    #[error("Search request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Search index '{index}' returned HTTP {status}")]
    HttpStatus { status: u16, index: String },

    #[error("Malformed search response: {0}")]
    MalformedResponse(String),

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}
