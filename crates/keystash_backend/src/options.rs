// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;

use crate::{Expiration, Tags};

/// How a backend should store an entry.
///
/// # Examples
///
/// ```
/// use std::time::{Duration, SystemTime};
///
/// use keystash_backend::{Expiration, SaveOptions};
///
/// let at = SystemTime::UNIX_EPOCH + Duration::from_secs(300);
/// let options = SaveOptions::new()
///     .with_expiration(Expiration::At(at))
///     .sliding(false)
///     .with_tag("users");
///
/// assert_eq!(options.expiration(), Expiration::At(at));
/// assert!(!options.is_sliding());
/// assert!(options.tags().contains("users"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SaveOptions {
    expiration: Expiration,
    sliding: bool,
    tags: Tags,
}

impl SaveOptions {
    /// Options for an entry that never expires, does not slide, and has no tags.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the absolute expiration.
    #[must_use]
    pub fn with_expiration(mut self, expiration: impl Into<Expiration>) -> Self {
        self.expiration = expiration.into();
        self
    }

    /// Enables or disables sliding expiration.
    ///
    /// A sliding entry has its deadline pushed forward on every read by the
    /// window it was originally saved with.
    #[must_use]
    pub fn sliding(mut self, sliding: bool) -> Self {
        self.sliding = sliding;
        self
    }

    /// Adds a tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<Cow<'static, str>>) -> Self {
        self.tags.insert(tag);
        self
    }

    /// Replaces the tag set.
    #[must_use]
    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    /// The absolute expiration.
    #[must_use]
    pub fn expiration(&self) -> Expiration {
        self.expiration
    }

    /// Whether reads extend the expiration.
    #[must_use]
    pub fn is_sliding(&self) -> bool {
        self.sliding
    }

    /// The tags to attach.
    #[must_use]
    pub fn tags(&self) -> &Tags {
        &self.tags
    }
}
