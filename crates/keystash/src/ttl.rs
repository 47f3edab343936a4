// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Time-to-live values accepted by the cache.

use std::time::{Duration, SystemTime};

use keystash_backend::Expiration;

use crate::{Error, Result};

/// How long a value written with [`SimpleCache::set`](crate::SimpleCache::set) stays visible.
///
/// Every variant is resolved into an absolute [`Expiration`] before it reaches
/// the backend:
///
/// | `Ttl` | Expiration |
/// |---|---|
/// | `None`, `Seconds(0)` | never |
/// | `Seconds(n)` | now + `n` seconds |
/// | `Duration(d)` | now + `d` |
/// | `At(t)` | `t` |
///
/// # Examples
///
/// ```
/// use std::time::{Duration, SystemTime};
///
/// use keystash::Ttl;
/// use keystash_backend::Expiration;
///
/// let now = SystemTime::UNIX_EPOCH;
///
/// assert_eq!(Ttl::None.expiration(now)?, Expiration::Never);
/// assert_eq!(Ttl::Seconds(0).expiration(now)?, Expiration::Never);
/// assert_eq!(
///     Ttl::Seconds(30).expiration(now)?,
///     Expiration::At(now + Duration::from_secs(30)),
/// );
/// assert_eq!(Ttl::from(Duration::from_millis(1500)), Ttl::Duration(Duration::from_millis(1500)));
/// # Ok::<(), keystash::Error>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Ttl {
    /// The entry never expires.
    #[default]
    None,
    /// The entry expires this many seconds after the write. Zero means never.
    Seconds(u64),
    /// The entry expires this long after the write.
    Duration(Duration),
    /// The entry expires at this instant.
    At(SystemTime),
}

impl Ttl {
    /// Resolves this TTL against `now`.
    ///
    /// # Errors
    ///
    /// Returns a [`CacheOperation`](crate::ErrorKind::CacheOperation) error
    /// ("Invalid TTL!") if the deadline cannot be represented.
    pub fn expiration(self, now: SystemTime) -> Result<Expiration> {
        match self {
            Self::None | Self::Seconds(0) => Ok(Expiration::Never),
            Self::Seconds(secs) => after(now, Duration::from_secs(secs)),
            Self::Duration(duration) => after(now, duration),
            Self::At(at) => Ok(Expiration::At(at)),
        }
    }
}

fn after(now: SystemTime, duration: Duration) -> Result<Expiration> {
    now.checked_add(duration).map(Expiration::At).ok_or_else(Error::invalid_ttl)
}

impl From<u64> for Ttl {
    fn from(secs: u64) -> Self {
        Self::Seconds(secs)
    }
}

impl From<Duration> for Ttl {
    fn from(duration: Duration) -> Self {
        Self::Duration(duration)
    }
}

impl From<SystemTime> for Ttl {
    fn from(at: SystemTime) -> Self {
        Self::At(at)
    }
}

impl<T> From<Option<T>> for Ttl
where
    T: Into<Self>,
{
    fn from(ttl: Option<T>) -> Self {
        ttl.map_or(Self::None, Into::into)
    }
}
