use super::ProgramProposal;
use crate::edit::DocumentEdit;
use crate::engine::RevisionEngine;
use crate::error::RevisionError;
use crate::section::ProposalSection;
use cms_model::{
    ContributionLevel, CurriculumCourse, GaId, MissionId, PeoId, PoId, Semester, SemesterSlot,
};
use serde::{Deserialize, Serialize};

/// Replayable program proposal edit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ProposalEdit {
    /// [`RevisionEngine::update_program`]
    UpdateProgram {
        /// Program name
        name: String,
        /// Abbreviation
        abbreviation: String,
    },
    /// [`RevisionEngine::add_peo`]
    AddPeo {
        /// Statement
        statement: String,
    },
    /// [`RevisionEngine::update_peo`]
    UpdatePeo {
        /// PEO id
        id: PeoId,
        /// New statement
        statement: String,
    },
    /// [`RevisionEngine::remove_peo`]
    RemovePeo {
        /// PEO id
        id: PeoId,
    },
    /// [`RevisionEngine::add_po`]
    AddPo {
        /// Short name
        name: String,
        /// Statement
        statement: String,
    },
    /// [`RevisionEngine::update_po`]
    UpdatePo {
        /// PO id
        id: PoId,
        /// New name
        name: String,
        /// New statement
        statement: String,
    },
    /// [`RevisionEngine::remove_po`]
    RemovePo {
        /// PO id
        id: PoId,
    },
    /// [`RevisionEngine::toggle_peo_mission_mapping`]
    TogglePeoMission {
        /// PEO id
        peo_id: PeoId,
        /// Mission id
        mission_id: MissionId,
    },
    /// [`RevisionEngine::toggle_ga_peo_mapping`]
    ToggleGaPeo {
        /// GA id
        ga_id: GaId,
        /// PEO id
        peo_id: PeoId,
    },
    /// [`RevisionEngine::toggle_po_peo_mapping`]
    TogglePoPeo {
        /// PO id
        po_id: PoId,
        /// PEO id
        peo_id: PeoId,
    },
    /// [`RevisionEngine::toggle_po_ga_mapping`]
    TogglePoGa {
        /// PO id
        po_id: PoId,
        /// GA id
        ga_id: GaId,
    },
    /// [`RevisionEngine::update_curriculum`]
    UpdateCurriculum {
        /// Curriculum name
        name: String,
    },
    /// [`RevisionEngine::add_course_category`]
    AddCourseCategory {
        /// Category name
        name: String,
        /// Category code
        code: String,
    },
    /// [`RevisionEngine::update_course_category`]
    UpdateCourseCategory {
        /// Current code
        code: String,
        /// New name
        name: String,
        /// New code
        new_code: String,
    },
    /// [`RevisionEngine::remove_course_category`]
    RemoveCourseCategory {
        /// Category code
        code: String,
    },
    /// [`RevisionEngine::add_curriculum_course`]
    AddCurriculumCourse {
        /// Course code
        course_code: String,
        /// Category code, empty for uncategorized
        #[serde(default)]
        category_code: String,
        /// Curriculum year
        year: u8,
        /// Term
        sem: Semester,
        /// Units
        units: f32,
    },
    /// [`RevisionEngine::update_curriculum_course_units`]
    UpdateCourseUnits {
        /// Course code
        course_code: String,
        /// Curriculum year
        year: u8,
        /// Term
        sem: Semester,
        /// New units
        units: f32,
    },
    /// [`RevisionEngine::remove_curriculum_course`]
    RemoveCurriculumCourse {
        /// Course code
        course_code: String,
        /// Curriculum year
        year: u8,
        /// Term
        sem: Semester,
    },
    /// [`RevisionEngine::set_course_po_levels`]
    SetCoursePoLevels {
        /// Course code
        course_code: String,
        /// PO id
        po_id: PoId,
        /// Levels; empty removes the record
        #[serde(default)]
        levels: Vec<ContributionLevel>,
    },
    /// [`RevisionEngine::reset_section`]
    Reset {
        /// Section to restore
        section: ProposalSection,
    },
    /// [`RevisionEngine::reset_all`]
    ResetAll,
}

impl DocumentEdit for ProposalEdit {
    type Target = ProgramProposal;

    fn apply(&self, engine: &mut RevisionEngine<ProgramProposal>) -> Result<(), RevisionError> {
        match self {
            Self::UpdateProgram { name, abbreviation } => engine.update_program(name, abbreviation)?,
            Self::AddPeo { statement } => {
                engine.add_peo(statement)?;
            }
            Self::UpdatePeo { id, statement } => {
                engine.update_peo(*id, statement)?;
            }
            Self::RemovePeo { id } => {
                engine.remove_peo(*id);
            }
            Self::AddPo { name, statement } => {
                engine.add_po(name, statement)?;
            }
            Self::UpdatePo {
                id,
                name,
                statement,
            } => {
                engine.update_po(*id, name, statement)?;
            }
            Self::RemovePo { id } => {
                engine.remove_po(*id);
            }
            Self::TogglePeoMission { peo_id, mission_id } => {
                engine.toggle_peo_mission_mapping(*peo_id, *mission_id);
            }
            Self::ToggleGaPeo { ga_id, peo_id } => {
                engine.toggle_ga_peo_mapping(*ga_id, *peo_id);
            }
            Self::TogglePoPeo { po_id, peo_id } => {
                engine.toggle_po_peo_mapping(*po_id, *peo_id);
            }
            Self::TogglePoGa { po_id, ga_id } => {
                engine.toggle_po_ga_mapping(*po_id, *ga_id);
            }
            Self::UpdateCurriculum { name } => engine.update_curriculum(name)?,
            Self::AddCourseCategory { name, code } => engine.add_course_category(name, code)?,
            Self::UpdateCourseCategory {
                code,
                name,
                new_code,
            } => {
                engine.update_course_category(code, name, new_code)?;
            }
            Self::RemoveCourseCategory { code } => {
                engine.remove_course_category(code)?;
            }
            Self::AddCurriculumCourse {
                course_code,
                category_code,
                year,
                sem,
                units,
            } => engine.add_curriculum_course(CurriculumCourse {
                course_code: course_code.clone(),
                category_code: category_code.clone(),
                semester_year: *year,
                semester_name: *sem,
                units: *units,
            })?,
            Self::UpdateCourseUnits {
                course_code,
                year,
                sem,
                units,
            } => {
                engine.update_curriculum_course_units(
                    course_code,
                    SemesterSlot::new(*year, *sem),
                    *units,
                )?;
            }
            Self::RemoveCurriculumCourse {
                course_code,
                year,
                sem,
            } => {
                engine.remove_curriculum_course(course_code, SemesterSlot::new(*year, *sem));
            }
            Self::SetCoursePoLevels {
                course_code,
                po_id,
                levels,
            } => {
                engine.set_course_po_levels(course_code, *po_id, levels);
            }
            Self::Reset { section } => {
                engine.reset_section(*section);
            }
            Self::ResetAll => engine.reset_all(),
        }
        Ok(())
    }
}
