//! Cache Key Module
//!
//! Hierarchical keys made of string segments. The rendered form joins the
//! segments with `:` and is what pattern invalidation and introspection see.

use std::fmt;

use serde::{Serialize, Serializer};

/// Separator used when rendering a key and when parsing one from a string.
pub const SEGMENT_SEPARATOR: char = ':';

// == Cache Key ==
/// An ordered list of segments identifying one cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
    segments: Vec<String>,
}

impl CacheKey {
    /// Builds a key from already separated segments.
    ///
    /// Segments are kept verbatim, so a segment may itself contain `:`
    /// (serialized query parameters, for instance).
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns this key extended by one more segment.
    pub fn child(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// True when `prefix`'s segments are the leading segments of this key.
    ///
    /// Matching is per segment: `collection:foo` is a prefix of
    /// `collection:foo:a` but not of `collection:foobar:a`.
    pub fn starts_with(&self, prefix: &CacheKey) -> bool {
        self.segments.starts_with(&prefix.segments)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.segments {
            if !first {
                write!(f, "{}", SEGMENT_SEPARATOR)?;
            }
            f.write_str(segment)?;
            first = false;
        }
        Ok(())
    }
}

impl From<&str> for CacheKey {
    fn from(raw: &str) -> Self {
        Self::new(raw.split(SEGMENT_SEPARATOR))
    }
}

impl From<String> for CacheKey {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<&String> for CacheKey {
    fn from(raw: &String) -> Self {
        Self::from(raw.as_str())
    }
}

impl Serialize for CacheKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
