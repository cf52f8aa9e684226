use actorx_io::ReadError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, WorldError>;

/// Any of these aborts the whole import; no partial world is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    #[error("truncated input: {0}")]
    Truncated(ReadError),

    #[error("{0}")]
    MalformedString(ReadError),

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("malformed record: {0}")]
    MalformedRecord(String),
}

impl From<ReadError> for WorldError {
    fn from(err: ReadError) -> Self {
        match err {
            ReadError::Truncated { .. } => WorldError::Truncated(err),
            ReadError::MalformedString { .. } => WorldError::MalformedString(err),
        }
    }
}

impl WorldError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        WorldError::MalformedRecord(msg.into())
    }
}
