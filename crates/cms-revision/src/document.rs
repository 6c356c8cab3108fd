//! Document trait
//!
//! Defines what the generic [`RevisionEngine`](crate::RevisionEngine) needs
//! to know about a revisable document type. This is a sealed trait: the
//! implementations are [`ProgramProposal`](crate::ProgramProposal) and
//! [`CourseSyllabus`](crate::CourseSyllabus).

use crate::registry::SectionRegistry;
use crate::section::SectionKey;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// A hierarchical document edited section by section
///
/// # Contract
/// - `transform` must be pure and deterministic: the reset engine re-runs it
///   against the original snapshot and relies on getting the same state back
/// - `transform` must not fail; missing nested structure becomes empty
///   collections
/// - `restore_section` copies exactly one section from `pristine` into `state`
/// - `purge` removes references to `removed` from one section and reports how
///   many records changed (0 when the section does not reference it)
pub trait Document: Debug + Send + Sync + 'static + private::Sealed {
    /// Section identifiers
    type Section: SectionKey;

    /// Nested server document
    type Source: Clone + Debug + Send + Sync + 'static;

    /// Normalized, section-keyed state
    type State: Clone + Debug + PartialEq + Send + Sync + Serialize + DeserializeOwned + 'static;

    /// Entity whose removal cascades through the registry
    type Removal: Debug;

    /// Document type identifier, stable across releases
    const DOCUMENT_TYPE: &'static str;

    /// Dependency graph between sections
    fn registry() -> &'static SectionRegistry<Self::Section>;

    /// Server id of the document
    fn document_id(source: &Self::Source) -> u64;

    /// Flatten the nested document into section-keyed state
    fn transform(source: &Self::Source) -> Self::State;

    /// Replace one section of `state` with its value in `pristine`
    fn restore_section(state: &mut Self::State, pristine: &Self::State, section: Self::Section);

    /// Current value of one section as JSON
    ///
    /// # Errors
    /// Returns error if the section value cannot be serialized
    fn section_value(
        state: &Self::State,
        section: Self::Section,
    ) -> Result<serde_json::Value, serde_json::Error>;

    /// Drop references to `removed` from `section`; returns records changed
    fn purge(state: &mut Self::State, section: Self::Section, removed: &Self::Removal) -> usize;
}

/// Sealed trait - prevents external implementations
#[doc(hidden)]
pub mod private {
    /// Sealed trait marker
    pub trait Sealed {}
}

/// Keep elements matching `keep`; returns how many were dropped
pub(crate) fn retain_count<T>(items: &mut Vec<T>, mut keep: impl FnMut(&T) -> bool) -> usize {
    let before = items.len();
    items.retain(|item| keep(item));
    before - items.len()
}

/// Append `item` unless already present
pub(crate) fn push_unique<T: PartialEq>(items: &mut Vec<T>, item: T) -> bool {
    if items.contains(&item) {
        return false;
    }
    items.push(item);
    true
}

/// Flip presence of `item`; returns the new presence
pub(crate) fn toggle<T: PartialEq>(items: &mut Vec<T>, item: T) -> bool {
    if let Some(pos) = items.iter().position(|existing| *existing == item) {
        items.remove(pos);
        false
    } else {
        items.push(item);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retain_count_reports_removed() {
        let mut items = vec![1, 2, 3, 2];
        assert_eq!(retain_count(&mut items, |x| *x != 2), 2);
        assert_eq!(items, vec![1, 3]);
        assert_eq!(retain_count(&mut items, |x| *x != 9), 0);
    }

    #[test]
    fn push_unique_skips_duplicates() {
        let mut items = vec![1];
        assert!(!push_unique(&mut items, 1));
        assert!(push_unique(&mut items, 2));
        assert_eq!(items, vec![1, 2]);
    }

    #[test]
    fn toggle_flips_presence() {
        let mut items = vec!["a"];
        assert!(toggle(&mut items, "b"));
        assert!(!toggle(&mut items, "a"));
        assert_eq!(items, vec!["b"]);
    }
}
