use thiserror::Error;

/// Convenient result alias for the scenic navigation library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Lookups of missing spots, vertices or edges are not errors; they surface as
/// `None` or empty results. Only caller bugs (bad indices, mismatched argument
/// lists, out-of-domain settings) and dataset decoding failures end up here.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when an index-based collection or route operation is given an
    /// index outside the valid range.
    #[error("index {index} out of range for length {len}")]
    OutOfRange { index: usize, len: usize },

    /// Raised when arguments are inconsistent or outside their closed domain.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Raised when a persisted edge record names an unknown path type.
    #[error("unknown edge type: {value}")]
    UnknownEdgeType { value: String },

    /// Raised when a persisted spot record names an unknown category.
    #[error("unknown spot category: {value}")]
    UnknownCategory { value: String },

    /// Raised when dataset records fail validation.
    #[error("invalid dataset: {message}")]
    DatasetValidation { message: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for CSV decoding errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for JSON decoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            message: message.into(),
        }
    }
}
