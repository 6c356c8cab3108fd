//! Course syllabus document
//!
//! The course-outcome wizard: each CO with its ABCD breakdown, CPA domain,
//! PO contribution levels, TLA tasks and teaching/learning selections.

mod edit;
mod mutators;
mod transform;

pub use edit::SyllabusEdit;

use crate::document::{private, retain_count, Document};
use crate::registry::{SectionRegistry, SYLLABUS_REGISTRY};
use crate::section::SyllabusSection;
use cms_model::{
    Abcd, AssessmentTask, CoAbcd, CoCpa, CoPoMapping, ContributionLevel, CourseOutcome,
    CourseOutcomeId, CourseSyllabusResponse, CpaDomain, LearningResource, LearningResourceId,
    PoId, TeachingMethod, TeachingMethodId, TlMapping,
};
use serde::{Deserialize, Serialize};

/// Course syllabus document type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseSyllabus;

/// Normalized course syllabus
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyllabusState {
    /// Server id of the syllabus
    pub syllabus_id: u64,
    /// Course code
    pub course_code: String,
    /// Course title
    pub course_title: String,
    /// `course_outcomes` section
    pub course_outcomes: Vec<CourseOutcome>,
    /// `abcd` section
    pub abcd: Vec<CoAbcd>,
    /// `cpa` section
    pub cpa: Vec<CoCpa>,
    /// `co_po_mappings` section
    pub co_po_mappings: Vec<CoPoMapping>,
    /// `assessment_tasks` section
    pub assessment_tasks: Vec<AssessmentTask>,
    /// `teaching_methods` section
    pub teaching_methods: Vec<TeachingMethod>,
    /// `learning_resources` section
    pub learning_resources: Vec<LearningResource>,
    /// `tl_mappings` section; COs with no selection have no entry
    pub tl_mappings: Vec<TlMapping>,
}

impl SyllabusState {
    /// CO by id
    #[must_use]
    pub fn find_course_outcome(&self, id: CourseOutcomeId) -> Option<&CourseOutcome> {
        self.course_outcomes.iter().find(|co| co.id == id)
    }

    /// ABCD breakdown of a CO
    #[must_use]
    pub fn abcd_for(&self, co: CourseOutcomeId) -> Option<&Abcd> {
        self.abcd
            .iter()
            .find(|a| a.course_outcome_id == co)
            .map(|a| &a.abcd)
    }

    /// CPA domain of a CO
    #[must_use]
    pub fn cpa_for(&self, co: CourseOutcomeId) -> Option<CpaDomain> {
        self.cpa
            .iter()
            .find(|c| c.course_outcome_id == co)
            .map(|c| c.domain)
    }

    /// Contribution level of a CO to a PO
    #[must_use]
    pub fn co_po_level(&self, co: CourseOutcomeId, po: PoId) -> Option<ContributionLevel> {
        self.co_po_mappings
            .iter()
            .find(|m| m.course_outcome_id == co && m.program_outcome_id == po)
            .map(|m| m.contribution_level)
    }

    /// TLA tasks of a CO
    pub fn tasks_for(&self, co: CourseOutcomeId) -> impl Iterator<Item = &AssessmentTask> + '_ {
        self.assessment_tasks
            .iter()
            .filter(move |t| t.course_outcome_id == co)
    }

    /// Sum of task weights of a CO
    #[must_use]
    pub fn task_weight_total(&self, co: CourseOutcomeId) -> f32 {
        self.tasks_for(co).map(|t| t.weight).sum()
    }

    /// Teaching/learning selections of a CO
    #[must_use]
    pub fn tl_mapping(&self, co: CourseOutcomeId) -> Option<&TlMapping> {
        self.tl_mappings.iter().find(|m| m.course_outcome_id == co)
    }

    /// Whether `id` is in the teaching method catalog
    #[must_use]
    pub fn has_teaching_method(&self, id: TeachingMethodId) -> bool {
        self.teaching_methods.iter().any(|m| m.id == id)
    }

    /// Whether `id` is in the learning resource catalog
    #[must_use]
    pub fn has_learning_resource(&self, id: LearningResourceId) -> bool {
        self.learning_resources.iter().any(|r| r.id == id)
    }
}

/// Entity whose removal cascades through the syllabus registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyllabusRemoval {
    /// A course outcome
    CourseOutcome(CourseOutcomeId),
    /// A teaching method catalog entry
    TeachingMethod(TeachingMethodId),
    /// A learning resource catalog entry
    LearningResource(LearningResourceId),
}

/// Strip `id` from every selection list; returns the number of mappings changed
///
/// Mappings left with no selection are dropped.
fn strip_selection<T: PartialEq>(
    mappings: &mut Vec<TlMapping>,
    list: impl Fn(&mut TlMapping) -> &mut Vec<T>,
    id: &T,
) -> usize {
    let mut changed = 0;
    for mapping in mappings.iter_mut() {
        let selected = list(mapping);
        let before = selected.len();
        selected.retain(|x| x != id);
        if selected.len() != before {
            changed += 1;
        }
    }
    mappings.retain(|m| !m.is_empty());
    changed
}

impl private::Sealed for CourseSyllabus {}

impl Document for CourseSyllabus {
    type Section = SyllabusSection;
    type Source = CourseSyllabusResponse;
    type State = SyllabusState;
    type Removal = SyllabusRemoval;

    const DOCUMENT_TYPE: &'static str = "course_syllabus";

    fn registry() -> &'static SectionRegistry<SyllabusSection> {
        &SYLLABUS_REGISTRY
    }

    fn document_id(source: &CourseSyllabusResponse) -> u64 {
        source.id
    }

    fn transform(source: &CourseSyllabusResponse) -> SyllabusState {
        transform::transform(source)
    }

    fn restore_section(state: &mut SyllabusState, pristine: &SyllabusState, section: SyllabusSection) {
        use SyllabusSection as S;
        match section {
            S::CourseOutcomes => state.course_outcomes.clone_from(&pristine.course_outcomes),
            S::Abcd => state.abcd.clone_from(&pristine.abcd),
            S::Cpa => state.cpa.clone_from(&pristine.cpa),
            S::CoPoMappings => state.co_po_mappings.clone_from(&pristine.co_po_mappings),
            S::AssessmentTasks => state.assessment_tasks.clone_from(&pristine.assessment_tasks),
            S::TeachingMethods => state.teaching_methods.clone_from(&pristine.teaching_methods),
            S::LearningResources => state
                .learning_resources
                .clone_from(&pristine.learning_resources),
            S::TlMappings => state.tl_mappings.clone_from(&pristine.tl_mappings),
        }
    }

    fn section_value(
        state: &SyllabusState,
        section: SyllabusSection,
    ) -> Result<serde_json::Value, serde_json::Error> {
        use SyllabusSection as S;
        match section {
            S::CourseOutcomes => serde_json::to_value(&state.course_outcomes),
            S::Abcd => serde_json::to_value(&state.abcd),
            S::Cpa => serde_json::to_value(&state.cpa),
            S::CoPoMappings => serde_json::to_value(&state.co_po_mappings),
            S::AssessmentTasks => serde_json::to_value(&state.assessment_tasks),
            S::TeachingMethods => serde_json::to_value(&state.teaching_methods),
            S::LearningResources => serde_json::to_value(&state.learning_resources),
            S::TlMappings => serde_json::to_value(&state.tl_mappings),
        }
    }

    fn purge(state: &mut SyllabusState, section: SyllabusSection, removed: &SyllabusRemoval) -> usize {
        use SyllabusRemoval as R;
        use SyllabusSection as S;
        match (section, *removed) {
            (S::Abcd, R::CourseOutcome(co)) => {
                retain_count(&mut state.abcd, |a| a.course_outcome_id != co)
            }
            (S::Cpa, R::CourseOutcome(co)) => {
                retain_count(&mut state.cpa, |c| c.course_outcome_id != co)
            }
            (S::CoPoMappings, R::CourseOutcome(co)) => {
                retain_count(&mut state.co_po_mappings, |m| m.course_outcome_id != co)
            }
            (S::AssessmentTasks, R::CourseOutcome(co)) => {
                retain_count(&mut state.assessment_tasks, |t| t.course_outcome_id != co)
            }
            (S::TlMappings, R::CourseOutcome(co)) => {
                retain_count(&mut state.tl_mappings, |m| m.course_outcome_id != co)
            }
            (S::TlMappings, R::TeachingMethod(id)) => {
                strip_selection(&mut state.tl_mappings, |m| &mut m.teaching_methods, &id)
            }
            (S::TlMappings, R::LearningResource(id)) => {
                strip_selection(&mut state.tl_mappings, |m| &mut m.learning_resources, &id)
            }
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(co: u32, methods: &[u32], resources: &[u32]) -> TlMapping {
        TlMapping {
            course_outcome_id: CourseOutcomeId(co),
            teaching_methods: methods.iter().copied().map(TeachingMethodId).collect(),
            learning_resources: resources.iter().copied().map(LearningResourceId).collect(),
            assessment_method: None,
        }
    }

    #[test]
    fn stripping_a_method_counts_changed_mappings() {
        let mut state = SyllabusState {
            tl_mappings: vec![mapping(1, &[1, 2], &[]), mapping(2, &[2], &[]), mapping(3, &[1], &[4])],
            ..SyllabusState::default()
        };
        let removed = SyllabusRemoval::TeachingMethod(TeachingMethodId(2));
        assert_eq!(
            CourseSyllabus::purge(&mut state, SyllabusSection::TlMappings, &removed),
            2
        );
        // CO 2 had nothing else selected
        assert_eq!(state.tl_mappings, vec![mapping(1, &[1], &[]), mapping(3, &[1], &[4])]);
    }

    #[test]
    fn stripping_unused_resource_changes_nothing() {
        let mut state = SyllabusState {
            tl_mappings: vec![mapping(1, &[1], &[1])],
            ..SyllabusState::default()
        };
        let removed = SyllabusRemoval::LearningResource(LearningResourceId(9));
        assert_eq!(
            CourseSyllabus::purge(&mut state, SyllabusSection::TlMappings, &removed),
            0
        );
        assert_eq!(state.tl_mappings.len(), 1);
    }

    #[test]
    fn task_weights_sum_per_co() {
        let task = |id: u32, co: u32, weight: f32| AssessmentTask {
            id: cms_model::TaskId(id),
            course_outcome_id: CourseOutcomeId(co),
            code: format!("T{id}"),
            name: String::new(),
            tool: String::new(),
            weight,
        };
        let state = SyllabusState {
            assessment_tasks: vec![task(1, 1, 30.0), task(2, 1, 20.0), task(3, 2, 100.0)],
            ..SyllabusState::default()
        };
        assert!((state.task_weight_total(CourseOutcomeId(1)) - 50.0).abs() < f32::EPSILON);
        assert_eq!(state.tasks_for(CourseOutcomeId(2)).count(), 1);
    }
}
