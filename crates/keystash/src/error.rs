// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Error types for cache operations.

use std::fmt;

const INVALID_KEY: &str = "Invalid key! Key should be a non-empty string.";
const INVALID_TTL: &str = "Invalid TTL!";

/// The category of a cache [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The caller passed a malformed key. Raised before the backend is touched.
    InvalidArgument,
    /// The backend failed while reading, or the TTL could not be resolved.
    CacheOperation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument => f.write_str("invalid argument"),
            Self::CacheOperation => f.write_str("cache operation failed"),
        }
    }
}

/// An error from a cache operation.
///
/// Use [`Error::kind`] to tell caller mistakes from storage failures. When the
/// backend failed, the [`keystash_backend::Error`] is kept in the source chain:
///
/// ```
/// use keystash::{ErrorKind, SimpleCache};
/// use keystash_backend::testing::{BackendOp, MockBackend};
/// use ohno::ErrorExt;
/// use tick::Clock;
///
/// let backend = MockBackend::<i32>::new();
/// backend.fail_when(|op| matches!(op, BackendOp::Load(_)));
/// let cache = SimpleCache::<i32, _>::new(backend, Clock::new_frozen());
///
/// let error = cache.get("key", 0).unwrap_err();
/// assert_eq!(error.kind(), ErrorKind::CacheOperation);
/// assert!(error.find_source::<keystash_backend::Error>().is_some());
/// ```
#[ohno::error]
#[display("{kind}")]
pub struct Error {
    kind: ErrorKind,
}

impl Error {
    pub(crate) fn invalid_key() -> Self {
        Self::caused_by(ErrorKind::InvalidArgument, INVALID_KEY)
    }

    pub(crate) fn invalid_ttl() -> Self {
        Self::caused_by(ErrorKind::CacheOperation, INVALID_TTL)
    }

    pub(crate) fn backend(error: keystash_backend::Error) -> Self {
        Self::caused_by(ErrorKind::CacheOperation, error)
    }

    /// Returns the category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns `true` if this error wraps a backend failure.
    #[must_use]
    pub fn is_backend(&self) -> bool {
        use ohno::ErrorExt;
        self.find_source::<keystash_backend::Error>().is_some()
    }
}

/// A specialized [`Result`] type for cache operations.
pub type Result<T> = std::result::Result<T, Error>;
