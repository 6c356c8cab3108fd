//! Dirty-set tracker
//!
//! Set of sections with outstanding local edits relative to the snapshot the
//! engine was initialized from. The set has no serde impl of its own; it
//! crosses persistence boundaries as an ordered list through
//! [`DirtySet::to_list`] / [`DirtySet::from_list`].

use crate::section::{SectionKey, UnknownSection};
use std::collections::BTreeSet;

/// Sections with outstanding edits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirtySet<S: SectionKey> {
    sections: BTreeSet<S>,
}

impl<S: SectionKey> DirtySet<S> {
    /// Empty set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            sections: BTreeSet::new(),
        }
    }

    /// Mark `section` modified (idempotent)
    ///
    /// Returns true if the section was clean before.
    #[inline]
    pub fn mark(&mut self, section: S) -> bool {
        self.sections.insert(section)
    }

    /// Whether `section` has outstanding edits
    #[inline]
    #[must_use]
    pub fn is_modified(&self, section: S) -> bool {
        self.sections.contains(&section)
    }

    /// Mark `section` clean (idempotent)
    ///
    /// Returns true if the section was dirty before.
    #[inline]
    pub fn clear(&mut self, section: S) -> bool {
        self.sections.remove(&section)
    }

    /// Mark everything clean
    #[inline]
    pub fn clear_all(&mut self) {
        self.sections.clear();
    }

    /// No outstanding edits
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Number of dirty sections
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Dirty sections in declaration order
    pub fn iter(&self) -> impl Iterator<Item = S> + '_ {
        self.sections.iter().copied()
    }

    /// Ordered list for persistence
    #[must_use]
    pub fn to_list(&self) -> Vec<S> {
        self.iter().collect()
    }

    /// Rebuild from a persisted list; duplicates collapse
    #[must_use]
    pub fn from_list<I>(sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        Self {
            sections: sections.into_iter().collect(),
        }
    }

    /// Wire names, in declaration order
    #[must_use]
    pub fn to_names(&self) -> Vec<&'static str> {
        self.iter().map(SectionKey::as_str).collect()
    }

    /// Rebuild from wire names
    ///
    /// # Errors
    /// Returns the first name that is not a section of `S`
    pub fn from_names<I, N>(names: I) -> Result<Self, UnknownSection>
    where
        I: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        let mut set = Self::new();
        for name in names {
            let name = name.as_ref();
            let section = S::from_name(name).ok_or_else(|| UnknownSection(name.to_string()))?;
            set.mark(section);
        }
        Ok(set)
    }
}

impl<S: SectionKey> Default for DirtySet<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SectionKey> FromIterator<S> for DirtySet<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_list(iter)
    }
}
