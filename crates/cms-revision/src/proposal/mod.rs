//! Program proposal document
//!
//! Program → PEOs → POs → curriculum → courses → course/PO contributions,
//! flattened into eleven independently revisable sections.

mod edit;
mod mutators;
mod transform;

pub use edit::ProposalEdit;

use crate::document::{private, retain_count, Document};
use crate::registry::{SectionRegistry, PROPOSAL_REGISTRY};
use crate::section::ProposalSection;
use cms_model::{
    ContributionLevel, CourseCategory, CoursePoMapping, Curriculum, CurriculumCourse,
    GaPeoMapping, GraduateAttributeRef, MissionRef, Peo, PeoId, PeoMissionMapping, PoGaMapping,
    PoId, PoPeoMapping, Program, ProgramOutcome, ProgramProposalResponse, ProposalStatus,
    SemesterSlot,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Program proposal document type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramProposal;

/// Normalized program proposal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProposalState {
    /// Server id of the proposal
    pub proposal_id: u64,
    /// Review status at load time
    pub status: ProposalStatus,
    /// `program` section
    pub program: Program,
    /// `peos` section
    pub peos: Vec<Peo>,
    /// `peo_mission_mappings` section
    pub peo_mission_mappings: Vec<PeoMissionMapping>,
    /// `ga_peo_mappings` section
    pub ga_peo_mappings: Vec<GaPeoMapping>,
    /// `pos` section
    pub pos: Vec<ProgramOutcome>,
    /// `po_peo_mappings` section
    pub po_peo_mappings: Vec<PoPeoMapping>,
    /// `po_ga_mappings` section
    pub po_ga_mappings: Vec<PoGaMapping>,
    /// `curriculum` section
    pub curriculum: Curriculum,
    /// `course_categories` section
    pub course_categories: Vec<CourseCategory>,
    /// `curriculum_courses` section
    pub curriculum_courses: Vec<CurriculumCourse>,
    /// `course_po_mappings` section
    pub course_po_mappings: Vec<CoursePoMapping>,
    /// Missions seen in the snapshot (read-only, for display)
    pub missions: Vec<MissionRef>,
    /// Graduate attributes seen in the snapshot (read-only, for display)
    pub graduate_attributes: Vec<GraduateAttributeRef>,
}

impl ProposalState {
    /// PEO by id
    #[must_use]
    pub fn find_peo(&self, id: PeoId) -> Option<&Peo> {
        self.peos.iter().find(|p| p.id == id)
    }

    /// PO by id
    #[must_use]
    pub fn find_po(&self, id: PoId) -> Option<&ProgramOutcome> {
        self.pos.iter().find(|p| p.id == id)
    }

    /// Category by code (case-insensitive)
    #[must_use]
    pub fn find_category(&self, code: &str) -> Option<&CourseCategory> {
        self.course_categories.iter().find(|c| c.code_matches(code))
    }

    /// Number of curriculum courses filed under `code`
    #[must_use]
    pub fn courses_in_category(&self, code: &str) -> usize {
        let code = code.trim();
        self.curriculum_courses
            .iter()
            .filter(|c| c.category_code.eq_ignore_ascii_case(code))
            .count()
    }

    /// Curriculum courses grouped by semester, slots in ascending order
    #[must_use]
    pub fn courses_by_semester(&self) -> BTreeMap<SemesterSlot, Vec<&CurriculumCourse>> {
        let mut grouped: BTreeMap<SemesterSlot, Vec<&CurriculumCourse>> = BTreeMap::new();
        for course in &self.curriculum_courses {
            grouped.entry(course.slot()).or_default().push(course);
        }
        grouped
    }

    /// Total units per semester
    #[must_use]
    pub fn units_by_semester(&self) -> BTreeMap<SemesterSlot, f32> {
        let mut totals: BTreeMap<SemesterSlot, f32> = BTreeMap::new();
        for course in &self.curriculum_courses {
            *totals.entry(course.slot()).or_default() += course.units;
        }
        totals
    }

    /// Parsed contribution levels of `course_code` to `po_id`
    #[must_use]
    pub fn course_po_levels(&self, course_code: &str, po_id: PoId) -> Vec<ContributionLevel> {
        self.course_po_mappings
            .iter()
            .find(|m| same_course(&m.course_code, course_code) && m.po_id == po_id)
            .map(CoursePoMapping::levels)
            .unwrap_or_default()
    }
}

/// Course codes match ignoring ASCII case and surrounding whitespace
pub(crate) fn same_course(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// Entity whose removal cascades through the proposal registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProposalRemoval {
    /// A PEO
    Peo(PeoId),
    /// A PO
    Po(PoId),
    /// The last occurrence of a curriculum course
    Course(String),
}

impl private::Sealed for ProgramProposal {}

impl Document for ProgramProposal {
    type Section = ProposalSection;
    type Source = ProgramProposalResponse;
    type State = ProposalState;
    type Removal = ProposalRemoval;

    const DOCUMENT_TYPE: &'static str = "program_proposal";

    fn registry() -> &'static SectionRegistry<ProposalSection> {
        &PROPOSAL_REGISTRY
    }

    fn document_id(source: &ProgramProposalResponse) -> u64 {
        source.id
    }

    fn transform(source: &ProgramProposalResponse) -> ProposalState {
        transform::transform(source)
    }

    fn restore_section(state: &mut ProposalState, pristine: &ProposalState, section: ProposalSection) {
        use ProposalSection as S;
        match section {
            S::Program => state.program.clone_from(&pristine.program),
            S::Peos => state.peos.clone_from(&pristine.peos),
            S::PeoMissionMappings => state
                .peo_mission_mappings
                .clone_from(&pristine.peo_mission_mappings),
            S::GaPeoMappings => state.ga_peo_mappings.clone_from(&pristine.ga_peo_mappings),
            S::Pos => state.pos.clone_from(&pristine.pos),
            S::PoPeoMappings => state.po_peo_mappings.clone_from(&pristine.po_peo_mappings),
            S::PoGaMappings => state.po_ga_mappings.clone_from(&pristine.po_ga_mappings),
            S::Curriculum => state.curriculum.clone_from(&pristine.curriculum),
            S::CourseCategories => state
                .course_categories
                .clone_from(&pristine.course_categories),
            S::CurriculumCourses => state
                .curriculum_courses
                .clone_from(&pristine.curriculum_courses),
            S::CoursePoMappings => state
                .course_po_mappings
                .clone_from(&pristine.course_po_mappings),
        }
    }

    fn section_value(
        state: &ProposalState,
        section: ProposalSection,
    ) -> Result<serde_json::Value, serde_json::Error> {
        use ProposalSection as S;
        match section {
            S::Program => serde_json::to_value(&state.program),
            S::Peos => serde_json::to_value(&state.peos),
            S::PeoMissionMappings => serde_json::to_value(&state.peo_mission_mappings),
            S::GaPeoMappings => serde_json::to_value(&state.ga_peo_mappings),
            S::Pos => serde_json::to_value(&state.pos),
            S::PoPeoMappings => serde_json::to_value(&state.po_peo_mappings),
            S::PoGaMappings => serde_json::to_value(&state.po_ga_mappings),
            S::Curriculum => serde_json::to_value(&state.curriculum),
            S::CourseCategories => serde_json::to_value(&state.course_categories),
            S::CurriculumCourses => serde_json::to_value(&state.curriculum_courses),
            S::CoursePoMappings => serde_json::to_value(&state.course_po_mappings),
        }
    }

    fn purge(state: &mut ProposalState, section: ProposalSection, removed: &ProposalRemoval) -> usize {
        use ProposalRemoval as R;
        use ProposalSection as S;
        match (section, removed) {
            (S::PeoMissionMappings, R::Peo(id)) => {
                retain_count(&mut state.peo_mission_mappings, |m| m.peo_id != *id)
            }
            (S::GaPeoMappings, R::Peo(id)) => {
                retain_count(&mut state.ga_peo_mappings, |m| m.peo_id != *id)
            }
            (S::PoPeoMappings, R::Peo(id)) => {
                retain_count(&mut state.po_peo_mappings, |m| m.peo_id != *id)
            }
            (S::PoPeoMappings, R::Po(id)) => {
                retain_count(&mut state.po_peo_mappings, |m| m.po_id != *id)
            }
            (S::PoGaMappings, R::Po(id)) => {
                retain_count(&mut state.po_ga_mappings, |m| m.po_id != *id)
            }
            (S::CoursePoMappings, R::Po(id)) => {
                retain_count(&mut state.course_po_mappings, |m| m.po_id != *id)
            }
            (S::CoursePoMappings, R::Course(code)) => {
                retain_count(&mut state.course_po_mappings, |m| {
                    !same_course(&m.course_code, code)
                })
            }
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cms_model::{MissionId, Semester};

    fn course(code: &str, year: u8, sem: Semester, units: f32) -> CurriculumCourse {
        CurriculumCourse {
            course_code: code.to_string(),
            category_code: "GE".to_string(),
            semester_year: year,
            semester_name: sem,
            units,
        }
    }

    #[test]
    fn purge_ignores_unrelated_sections() {
        let mut state = ProposalState {
            peo_mission_mappings: vec![PeoMissionMapping {
                peo_id: PeoId(1),
                mission_id: MissionId(5),
            }],
            ..ProposalState::default()
        };
        let removed = ProposalRemoval::Po(PoId(1));
        assert_eq!(
            ProgramProposal::purge(&mut state, ProposalSection::PeoMissionMappings, &removed),
            0
        );
        assert_eq!(state.peo_mission_mappings.len(), 1);
    }

    #[test]
    fn restore_copies_one_section() {
        let pristine = ProposalState {
            peos: vec![Peo {
                id: PeoId(1),
                statement: "A".to_string(),
            }],
            ..ProposalState::default()
        };
        let mut state = ProposalState::default();
        state.program.name = "Edited".to_string();

        ProgramProposal::restore_section(&mut state, &pristine, ProposalSection::Peos);
        assert_eq!(state.peos, pristine.peos);
        assert_eq!(state.program.name, "Edited");
    }

    #[test]
    fn courses_group_by_sorted_slot() {
        let state = ProposalState {
            curriculum_courses: vec![
                course("CS201", 2, Semester::First, 3.0),
                course("CS102", 1, Semester::Midyear, 3.0),
                course("CS101", 1, Semester::First, 3.0),
                course("GE101", 1, Semester::First, 2.0),
            ],
            ..ProposalState::default()
        };

        let grouped = state.courses_by_semester();
        let slots: Vec<_> = grouped.keys().copied().collect();
        assert_eq!(
            slots,
            vec![
                SemesterSlot::new(1, Semester::First),
                SemesterSlot::new(1, Semester::Midyear),
                SemesterSlot::new(2, Semester::First),
            ]
        );
        assert_eq!(grouped[&SemesterSlot::new(1, Semester::First)].len(), 2);
        assert!(
            (state.units_by_semester()[&SemesterSlot::new(1, Semester::First)] - 5.0).abs()
                < f32::EPSILON
        );
    }
}
