// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;

/// Labels attached to stored entries for group invalidation.
///
/// Tags are kept in insertion order without duplicates. Most entries carry
/// one or two tags, so a plain vector beats a hash set here.
///
/// # Examples
///
/// ```
/// use keystash_backend::Tags;
///
/// let tags = Tags::single("users").with("sessions").with("users");
/// assert_eq!(tags.len(), 2);
/// assert!(tags.contains("sessions"));
/// assert!(tags.intersects(&Tags::single("users")));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Tags(Vec<Cow<'static, str>>);

impl Tags {
    /// Creates an empty tag set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tag set holding one tag.
    #[must_use]
    pub fn single(tag: impl Into<Cow<'static, str>>) -> Self {
        Self(vec![tag.into()])
    }

    /// Returns this set with `tag` added.
    #[must_use]
    pub fn with(mut self, tag: impl Into<Cow<'static, str>>) -> Self {
        self.insert(tag);
        self
    }

    /// Adds a tag, ignoring duplicates.
    pub fn insert(&mut self, tag: impl Into<Cow<'static, str>>) {
        let tag = tag.into();
        if !self.contains(&tag) {
            self.0.push(tag);
        }
    }

    /// Returns `true` if `tag` is in the set.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    /// Returns `true` if the two sets share at least one tag.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.0.iter().any(|t| other.contains(t))
    }

    /// Iterates over the tags in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(AsRef::as_ref)
    }

    /// Number of distinct tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> FromIterator<T> for Tags
where
    T: Into<Cow<'static, str>>,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tags = Self::new();
        for tag in iter {
            tags.insert(tag);
        }
        tags
    }
}

impl<T> Extend<T> for Tags
where
    T: Into<Cow<'static, str>>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for tag in iter {
            self.insert(tag);
        }
    }
}
