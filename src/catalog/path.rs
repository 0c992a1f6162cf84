// Category path: `/`-separated, non-empty segments
use crate::error::CatalogError;
use serde::Serialize;
use std::borrow::Borrow;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CategoryPath(String);

impl CategoryPath {
    pub fn parse(raw: &str) -> Result<Self, CatalogError> {
        if raw.is_empty() || raw.split('/').any(str::is_empty) {
            return Err(CatalogError::InvalidCategoryPath(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    /// Number of segments, always >= 1
    pub fn depth(&self) -> usize {
        self.0.matches('/').count() + 1
    }

    /// Last segment
    pub fn name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Every prefix from the root segment down to (and including) this path
    pub fn prefixes(&self) -> Vec<CategoryPath> {
        let mut out = Vec::with_capacity(self.depth());
        for (idx, ch) in self.0.char_indices() {
            if ch == '/' {
                out.push(Self(self.0[..idx].to_string()));
            }
        }
        out.push(self.clone());
        out
    }

    /// `self` equals a segment prefix of `other` (including `other` itself)
    pub fn is_ancestor_or_self_of(&self, other: &CategoryPath) -> bool {
        self == other || self.is_strict_ancestor_of(other)
    }

    pub fn is_strict_ancestor_of(&self, other: &CategoryPath) -> bool {
        other.0.len() > self.0.len()
            && other.0.starts_with(&self.0)
            && other.0.as_bytes()[self.0.len()] == b'/'
    }
}

impl fmt::Display for CategoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CategoryPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CategoryPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}
