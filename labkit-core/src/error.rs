//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LabkitError {
    /// Positional access outside of the logical window `[-len, len)`.
    #[error("Index {index} is out of range for a buffer of length {len}")]
    IndexOutOfRange {
        /// The requested signed index.
        index: isize,
        /// Number of items in the buffer at the time of access.
        len: usize,
    },

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A bounded buffer was requested with a capacity that cannot hold anything.
    #[error("Capacity must be positive, got {0}")]
    InvalidCapacity(usize),

    /// Operation not permitted in the current state of an object.
    #[error("Invalid state: {0}")]
    InvalidState(String),
}
