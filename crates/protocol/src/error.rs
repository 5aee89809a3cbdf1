use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProtocolError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Invalid depth '{0}': expected a positive integer or 'Full'")]
    InvalidDepth(String),

    #[error("Entity {0} must not be empty")]
    EmptyField(&'static str),

    #[error("Unknown response ordering '{0}'")]
    UnknownOrdering(String),
}
