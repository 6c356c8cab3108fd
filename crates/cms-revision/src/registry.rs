//! Section registry
//!
//! Declarative dependency graph between the sections of a document. Cascade
//! and reset behavior is read from this table instead of being coded into
//! each mutator.

use crate::section::{ProposalSection, SectionKey, SyllabusSection};

/// How a dependent section relates to its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// Dependent records exist only through the parent: removal purges them
    /// and resetting the parent resets the dependent too
    Owned,

    /// Dependent records point at the parent: removal purges them, reset does
    /// not follow the edge
    Reference,
}

/// One `parent → dependent` edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge<S> {
    /// Section whose entities are referenced
    pub parent: S,
    /// Section holding the references
    pub dependent: S,
    /// Relationship
    pub kind: EdgeKind,
}

impl<S> Edge<S> {
    /// Owned edge
    #[inline]
    #[must_use]
    pub const fn owned(parent: S, dependent: S) -> Self {
        Self {
            parent,
            dependent,
            kind: EdgeKind::Owned,
        }
    }

    /// Reference edge
    #[inline]
    #[must_use]
    pub const fn reference(parent: S, dependent: S) -> Self {
        Self {
            parent,
            dependent,
            kind: EdgeKind::Reference,
        }
    }
}

/// Static edge table for one document type
#[derive(Debug, Clone, Copy)]
pub struct SectionRegistry<S: 'static> {
    edges: &'static [Edge<S>],
}

impl<S: SectionKey> SectionRegistry<S> {
    /// Create registry over an edge table
    #[inline]
    #[must_use]
    pub const fn new(edges: &'static [Edge<S>]) -> Self {
        Self { edges }
    }

    /// All edges, in declaration order
    #[inline]
    #[must_use]
    pub fn edges(&self) -> &'static [Edge<S>] {
        self.edges
    }

    /// Sections that must be purged when an entity of `parent` is removed
    pub fn cascade_targets(&self, parent: S) -> impl Iterator<Item = S> + '_ {
        self.edges
            .iter()
            .filter(move |e| e.parent == parent)
            .map(|e| e.dependent)
    }

    /// Direct dependents of `parent` through edges of `kind`
    #[must_use]
    pub fn dependents(&self, parent: S, kind: EdgeKind) -> Vec<S> {
        self.edges
            .iter()
            .filter(|e| e.parent == parent && e.kind == kind)
            .map(|e| e.dependent)
            .collect()
    }

    /// Sections that hold references into `section`
    #[must_use]
    pub fn parents_of(&self, section: S) -> Vec<S> {
        self.edges
            .iter()
            .filter(|e| e.dependent == section)
            .map(|e| e.parent)
            .collect()
    }

    /// `section` followed by its transitive `Owned` closure
    ///
    /// Each section appears once; order is breadth-first in declaration order.
    #[must_use]
    pub fn reset_group(&self, section: S) -> Vec<S> {
        let mut group = vec![section];
        let mut cursor = 0;
        while cursor < group.len() {
            let current = group[cursor];
            for dependent in self.dependents(current, EdgeKind::Owned) {
                if !group.contains(&dependent) {
                    group.push(dependent);
                }
            }
            cursor += 1;
        }
        group
    }

    /// Number of edges
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the table has no edges
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Program proposal dependency graph
pub static PROPOSAL_REGISTRY: SectionRegistry<ProposalSection> = SectionRegistry::new(&[
    Edge::owned(ProposalSection::Peos, ProposalSection::PeoMissionMappings),
    Edge::owned(ProposalSection::Peos, ProposalSection::GaPeoMappings),
    Edge::reference(ProposalSection::Peos, ProposalSection::PoPeoMappings),
    Edge::owned(ProposalSection::Pos, ProposalSection::PoPeoMappings),
    Edge::owned(ProposalSection::Pos, ProposalSection::PoGaMappings),
    Edge::reference(ProposalSection::Pos, ProposalSection::CoursePoMappings),
    Edge::owned(
        ProposalSection::CurriculumCourses,
        ProposalSection::CoursePoMappings,
    ),
]);

/// Course syllabus dependency graph
pub static SYLLABUS_REGISTRY: SectionRegistry<SyllabusSection> = SectionRegistry::new(&[
    Edge::owned(SyllabusSection::CourseOutcomes, SyllabusSection::Abcd),
    Edge::owned(SyllabusSection::CourseOutcomes, SyllabusSection::Cpa),
    Edge::owned(SyllabusSection::CourseOutcomes, SyllabusSection::CoPoMappings),
    Edge::owned(SyllabusSection::CourseOutcomes, SyllabusSection::AssessmentTasks),
    Edge::owned(SyllabusSection::CourseOutcomes, SyllabusSection::TlMappings),
    Edge::reference(SyllabusSection::TeachingMethods, SyllabusSection::TlMappings),
    Edge::reference(SyllabusSection::LearningResources, SyllabusSection::TlMappings),
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peo_cascade_covers_all_peo_references() {
        let targets: Vec<_> = PROPOSAL_REGISTRY
            .cascade_targets(ProposalSection::Peos)
            .collect();
        assert_eq!(
            targets,
            vec![
                ProposalSection::PeoMissionMappings,
                ProposalSection::GaPeoMappings,
                ProposalSection::PoPeoMappings,
            ]
        );
    }

    #[test]
    fn peo_reset_group_follows_owned_edges_only() {
        assert_eq!(
            PROPOSAL_REGISTRY.reset_group(ProposalSection::Peos),
            vec![
                ProposalSection::Peos,
                ProposalSection::PeoMissionMappings,
                ProposalSection::GaPeoMappings,
            ]
        );
    }

    #[test]
    fn po_reset_group() {
        assert_eq!(
            PROPOSAL_REGISTRY.reset_group(ProposalSection::Pos),
            vec![
                ProposalSection::Pos,
                ProposalSection::PoPeoMappings,
                ProposalSection::PoGaMappings,
            ]
        );
    }

    #[test]
    fn leaf_reset_group_is_itself() {
        assert_eq!(
            PROPOSAL_REGISTRY.reset_group(ProposalSection::GaPeoMappings),
            vec![ProposalSection::GaPeoMappings]
        );
        assert_eq!(
            PROPOSAL_REGISTRY.reset_group(ProposalSection::Program),
            vec![ProposalSection::Program]
        );
    }

    #[test]
    fn po_peo_has_two_parents() {
        assert_eq!(
            PROPOSAL_REGISTRY.parents_of(ProposalSection::PoPeoMappings),
            vec![ProposalSection::Peos, ProposalSection::Pos]
        );
    }

    #[test]
    fn course_outcome_owns_every_per_co_section() {
        let owned = SYLLABUS_REGISTRY.dependents(SyllabusSection::CourseOutcomes, EdgeKind::Owned);
        assert_eq!(owned.len(), 5);
        assert!(owned.contains(&SyllabusSection::TlMappings));
        assert!(SYLLABUS_REGISTRY
            .dependents(SyllabusSection::TeachingMethods, EdgeKind::Owned)
            .is_empty());
    }

    #[test]
    fn registries_are_acyclic() {
        for section in ProposalSection::ALL {
            let group = PROPOSAL_REGISTRY.reset_group(*section);
            assert_eq!(group[0], *section);
            assert!(!group[1..].contains(section));
        }
        assert_eq!(PROPOSAL_REGISTRY.len(), 7);
        assert!(!SYLLABUS_REGISTRY.is_empty());
    }
}
