//! Error types for kronly operations.
//!
//! The hot-path kernels panic on contract violations like BLAS wrappers do.
//! These errors are returned by the validating layer, the configuration
//! loader and the leak tracker.

use thiserror::Error;

/// Errors that can occur during kronly operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KronlyError {
    /// A slice is shorter than the matrix shape it is supposed to hold.
    #[error("Buffer too small: `{operand}` needs {required} elements, got {actual}")]
    BufferError {
        /// Which operand was rejected (`a`, `b` or `dst`).
        operand: &'static str,
        /// Elements required by the shape.
        required: usize,
        /// Elements actually supplied.
        actual: usize,
    },
    /// An allocation id was released for more bytes than it has outstanding.
    #[error("Release error: id {id} releases {requested} bytes but only {outstanding} are outstanding")]
    ReleaseError {
        /// Allocation id supplied by the caller.
        id: i32,
        /// Bytes the release tried to return.
        requested: usize,
        /// Bytes recorded for the id at the time of the release.
        outstanding: usize,
    },
    /// Input validation error.
    #[error("Validation error: {message}")]
    ValidationError {
        /// Human-readable error message.
        message: String,
    },
}

/// Result type alias for kronly operations.
pub type Result<T> = std::result::Result<T, KronlyError>;

/// Creates a buffer error.
pub fn buffer_error(operand: &'static str, required: usize, actual: usize) -> KronlyError {
    KronlyError::BufferError {
        operand,
        required,
        actual,
    }
}

/// Creates a release error.
pub fn release_error(id: i32, requested: usize, outstanding: usize) -> KronlyError {
    KronlyError::ReleaseError {
        id,
        requested,
        outstanding,
    }
}

/// Creates a validation error.
pub fn validation_error(message: impl Into<String>) -> KronlyError {
    KronlyError::ValidationError {
        message: message.into(),
    }
}
