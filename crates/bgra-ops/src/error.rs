//! Error types for image operations.

use thiserror::Error;

/// Error type for image operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Images that must match in size do not.
    #[error("size mismatch: {0}")]
    SizeMismatch(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A pixel buffer could not be wrapped or addressed.
    #[error(transparent)]
    Core(#[from] bgra_core::Error),
}

/// Result type for image operations.
pub type OpsResult<T> = Result<T, OpsError>;
