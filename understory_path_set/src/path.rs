// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path and name types, plus the [`PathQuery`] abstraction used by lookups.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::ops::Deref;

use smallvec::SmallVec;

/// Separator used by the string form of a [`Path`].
pub const SEPARATOR: char = '/';

/// Inline capacity for path segments before spilling to the heap.
const INLINE_SEGMENTS: usize = 8;

/// Error returned when text cannot be used as a path segment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NameError {
    /// The segment was empty.
    Empty,
    /// The segment contained the `/` separator.
    ContainsSeparator,
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("path segment is empty"),
            Self::ContainsSeparator => {
                write!(f, "path segment contains the `{SEPARATOR}` separator")
            }
        }
    }
}

impl core::error::Error for NameError {}

/// A single path segment.
///
/// Names share their text, so cloning one is a reference count bump. They
/// order and hash exactly like the underlying `str`, which lets sets look
/// names up by borrowed text.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name(Arc<str>);

impl Name {
    /// Creates a name from `text`.
    ///
    /// Fails if `text` is empty or contains [`SEPARATOR`], since either would
    /// make the string form of a path ambiguous.
    pub fn new(text: &str) -> Result<Self, NameError> {
        if text.is_empty() {
            return Err(NameError::Empty);
        }
        if text.contains(SEPARATOR) {
            return Err(NameError::ContainsSeparator);
        }
        Ok(Self::from_valid(text))
    }

    /// Creates a name from text already known to be a valid segment.
    pub(crate) fn from_valid(text: &str) -> Self {
        debug_assert!(
            !text.is_empty() && !text.contains(SEPARATOR),
            "invalid segment {text:?}"
        );
        Self(Arc::from(text))
    }

    /// Returns the segment text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Name {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Name").field(&&*self.0).finish()
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A location in a hierarchy: an ordered sequence of [`Name`]s.
///
/// The empty path is the root. The string form joins segments with `/` and
/// always starts with `/`, so the root prints as `/` and `[a, b]` as `/a/b`.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Path {
    names: SmallVec<[Name; INLINE_SEGMENTS]>,
}

impl Path {
    /// Returns the root path.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses the string form of a path.
    ///
    /// The text is split on `/` and empty tokens are dropped, so `"/a/b"`,
    /// `"a/b"` and `"/a//b/"` all produce the same path, while `""` and `"/"`
    /// produce the root. This never fails.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self {
            names: tokenize(text).map(Name::from_valid).collect(),
        }
    }

    /// Builds a path from individual segments, validating each one.
    pub fn from_names<I, S>(names: I) -> Result<Self, NameError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|name| Name::new(name.as_ref()))
            .collect::<Result<_, _>>()?;
        Ok(Self { names })
    }

    /// Returns the number of segments (the depth of the location).
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if this is the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.names.is_empty()
    }

    /// Alias for [`Path::is_root`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.is_root()
    }

    /// Returns the segments of this path.
    #[must_use]
    pub fn names(&self) -> &[Name] {
        &self.names
    }

    /// Returns the last segment, or `None` for the root.
    #[must_use]
    pub fn last(&self) -> Option<&Name> {
        self.names.last()
    }

    /// Appends a segment.
    pub fn push(&mut self, name: Name) {
        self.names.push(name);
    }

    /// Removes and returns the last segment.
    pub fn pop(&mut self) -> Option<Name> {
        self.names.pop()
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.names.truncate(len);
    }

    /// Returns the parent location, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let (_, parent) = self.names.split_last()?;
        Some(Self {
            names: parent.iter().cloned().collect(),
        })
    }

    /// Returns a new path with `name` appended.
    #[must_use]
    pub fn child(&self, name: Name) -> Self {
        let mut child = self.clone();
        child.push(name);
        child
    }

    /// Returns `true` if `self` is a proper prefix of `other`.
    #[must_use]
    pub fn is_ancestor_of(&self, other: &Self) -> bool {
        self.len() < other.len() && other.names.starts_with(&self.names)
    }

    /// Returns the root and every proper prefix of this path, shortest first.
    pub fn ancestors(&self) -> impl Iterator<Item = Self> + '_ {
        (0..self.len()).map(|len| Self {
            names: self.names[..len].iter().cloned().collect(),
        })
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Path({self})")
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.names.is_empty() {
            return f.write_str("/");
        }
        for name in &self.names {
            write!(f, "{SEPARATOR}{name}")?;
        }
        Ok(())
    }
}

impl From<&str> for Path {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl From<Name> for Path {
    fn from(name: Name) -> Self {
        Self {
            names: SmallVec::from_iter([name]),
        }
    }
}

impl FromIterator<Name> for Path {
    fn from_iter<I: IntoIterator<Item = Name>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(SEPARATOR).filter(|token| !token.is_empty())
}

/// Something that can be viewed as a sequence of path segments.
///
/// Queries such as [`PathSet::match_path`](crate::PathSet::match_path) accept
/// either a parsed [`Path`], a string in path form, or pre-split segments, and
/// give identical answers for equivalent inputs. String forms are tokenized
/// the same way as [`Path::parse`]. Pre-split segments are used as given; a
/// segment that could never be a [`Name`] simply matches nothing.
pub trait PathQuery {
    /// Returns the segments of the queried location, root first.
    fn segments(&self) -> impl Iterator<Item = &str>;
}

impl PathQuery for Path {
    fn segments(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(Name::as_str)
    }
}

impl PathQuery for [Name] {
    fn segments(&self) -> impl Iterator<Item = &str> {
        self.iter().map(Name::as_str)
    }
}

impl PathQuery for str {
    fn segments(&self) -> impl Iterator<Item = &str> {
        tokenize(self)
    }
}

impl PathQuery for String {
    fn segments(&self) -> impl Iterator<Item = &str> {
        tokenize(self)
    }
}

impl PathQuery for [&str] {
    fn segments(&self) -> impl Iterator<Item = &str> {
        self.iter().map(reborrow)
    }
}

impl<const N: usize> PathQuery for [&str; N] {
    fn segments(&self) -> impl Iterator<Item = &str> {
        self.iter().map(reborrow)
    }
}

impl PathQuery for Vec<&str> {
    fn segments(&self) -> impl Iterator<Item = &str> {
        self.iter().map(reborrow)
    }
}

// Shortens a borrowed segment to the lifetime of the container borrow.
fn reborrow<'a>(segment: &'a &str) -> &'a str {
    segment
}

impl<T: PathQuery + ?Sized> PathQuery for &T {
    fn segments(&self) -> impl Iterator<Item = &str> {
        (**self).segments()
    }
}
