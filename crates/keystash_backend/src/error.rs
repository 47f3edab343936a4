// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Error type for backend operations.

/// An error raised by a storage backend.
///
/// This is an opaque error type that wraps whatever went wrong inside the
/// store (I/O, corruption, a failed invalidation). Use
/// [`std::error::Error::source()`] to reach the underlying cause.
///
/// # Example
///
/// ```
/// use keystash_backend::Error;
///
/// let error = Error::from_message("disk full");
/// assert!(error.to_string().contains("disk full"));
/// ```
#[ohno::error]
pub struct Error {}

impl Error {
    /// Creates a new error from any type that can be converted to an error.
    ///
    /// This is the public API for creating backend errors from external crates.
    pub fn from_message(cause: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::caused_by(cause)
    }
}

/// A specialized [`Result`] type for backend operations.
pub type Result<T> = std::result::Result<T, Error>;
