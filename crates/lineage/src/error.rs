use crate::status::LoadingStatus;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LineageError>;

#[derive(Error, Debug)]
pub enum LineageError {
    #[error("Invalid loading transition from {from} to {to}")]
    InvalidTransition {
        from: LoadingStatus,
        to: LoadingStatus,
    },

    #[error("Unknown loading status: {0}")]
    UnknownStatus(String),

    #[error("Invalid lineage query: {0}")]
    Query(#[from] superglue_protocol::ProtocolError),

    #[error("Invalid lineage service URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Lineage request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Lineage service returned HTTP {status} for {path}")]
    HttpStatus { status: u16, path: String },

    #[error("Lineage request failed: {0}")]
    Transport(String),

    #[error(transparent)]
    Decode(#[from] superglue_graph::GraphError),

    #[error("No entity selected")]
    NoActiveQuery,

    #[error("Response to request #{0} was superseded by a newer request")]
    Superseded(u64),
}
