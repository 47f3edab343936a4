// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::time::SystemTime;

/// When a stored entry stops being visible.
///
/// Backends only ever see absolute points in time; relative lifetimes are
/// resolved against a clock before they reach the store.
///
/// # Examples
///
/// ```
/// use std::time::{Duration, SystemTime};
///
/// use keystash_backend::Expiration;
///
/// let deadline = SystemTime::UNIX_EPOCH + Duration::from_secs(60);
/// let expiration = Expiration::At(deadline);
///
/// assert!(!expiration.is_expired_at(SystemTime::UNIX_EPOCH));
/// assert!(expiration.is_expired_at(deadline));
/// assert!(!Expiration::Never.is_expired_at(deadline));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Expiration {
    /// The entry lives until it is removed or evicted.
    #[default]
    Never,
    /// The entry is absent from this instant onwards.
    At(SystemTime),
}

impl Expiration {
    /// Returns the deadline, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<SystemTime> {
        match self {
            Self::Never => None,
            Self::At(at) => Some(*at),
        }
    }

    /// Returns `true` if an entry with this expiration is gone at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: SystemTime) -> bool {
        match self {
            Self::Never => false,
            Self::At(at) => *at <= now,
        }
    }
}

impl From<SystemTime> for Expiration {
    fn from(at: SystemTime) -> Self {
        Self::At(at)
    }
}

impl From<Option<SystemTime>> for Expiration {
    fn from(at: Option<SystemTime>) -> Self {
        at.map_or(Self::Never, Self::At)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn default_never_expires() {
        assert_eq!(Expiration::default(), Expiration::Never);
        assert!(Expiration::default().deadline().is_none());
    }

    #[test]
    fn deadline_is_inclusive() {
        let at = SystemTime::UNIX_EPOCH + Duration::from_secs(10);
        let expiration = Expiration::At(at);

        assert!(!expiration.is_expired_at(at - Duration::from_nanos(1)));
        assert!(expiration.is_expired_at(at));
        assert!(expiration.is_expired_at(at + Duration::from_secs(1)));
    }

    #[test]
    fn from_option() {
        let at = SystemTime::UNIX_EPOCH;
        assert_eq!(Expiration::from(Some(at)), Expiration::At(at));
        assert_eq!(Expiration::from(None), Expiration::Never);
    }
}
