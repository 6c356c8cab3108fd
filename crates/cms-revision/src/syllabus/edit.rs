use super::CourseSyllabus;
use crate::edit::DocumentEdit;
use crate::engine::RevisionEngine;
use crate::error::RevisionError;
use crate::section::SyllabusSection;
use cms_model::{
    Abcd, ContributionLevel, CourseOutcomeId, CpaDomain, LearningResourceId, PoId, TaskId,
    TeachingMethodId,
};
use serde::{Deserialize, Serialize};

/// Replayable course syllabus edit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SyllabusEdit {
    /// Add a course outcome
    AddCourseOutcome {
        /// Name; blank for the default `CO<id>`
        #[serde(default)]
        name: String,
        /// Statement
        statement: String,
    },
    /// Update a course outcome
    UpdateCourseOutcome {
        /// CO id
        id: CourseOutcomeId,
        /// New name
        name: String,
        /// New statement
        statement: String,
    },
    /// Remove a course outcome
    RemoveCourseOutcome {
        /// CO id
        id: CourseOutcomeId,
    },
    /// Store an ABCD breakdown
    SetAbcd {
        /// CO id
        co: CourseOutcomeId,
        /// Breakdown
        abcd: Abcd,
    },
    /// Set or clear a CPA domain
    SetCpa {
        /// CO id
        co: CourseOutcomeId,
        /// Domain; absent clears
        #[serde(default)]
        domain: Option<CpaDomain>,
    },
    /// Set or clear a CO → PO contribution level
    SetCoPoLevel {
        /// CO id
        co: CourseOutcomeId,
        /// PO id
        po: PoId,
        /// Level; absent clears
        #[serde(default)]
        level: Option<ContributionLevel>,
    },
    /// Add a TLA task
    AddAssessmentTask {
        /// Owning CO
        co: CourseOutcomeId,
        /// Task code
        code: String,
        /// Task name
        #[serde(default)]
        name: String,
        /// Assessment tool
        #[serde(default)]
        tool: String,
        /// Weight in percent
        weight: f32,
    },
    /// Update a TLA task
    UpdateAssessmentTask {
        /// Task id
        id: TaskId,
        /// Task code
        code: String,
        /// Task name
        #[serde(default)]
        name: String,
        /// Assessment tool
        #[serde(default)]
        tool: String,
        /// Weight in percent
        weight: f32,
    },
    /// Remove a TLA task
    RemoveAssessmentTask {
        /// Task id
        id: TaskId,
    },
    /// Add a teaching method
    AddTeachingMethod {
        /// Name
        name: String,
    },
    /// Remove a teaching method
    RemoveTeachingMethod {
        /// Method id
        id: TeachingMethodId,
    },
    /// Add a learning resource
    AddLearningResource {
        /// Name
        name: String,
    },
    /// Remove a learning resource
    RemoveLearningResource {
        /// Resource id
        id: LearningResourceId,
    },
    /// Flip a teaching method selection
    ToggleTeachingMethod {
        /// CO id
        co: CourseOutcomeId,
        /// Method id
        id: TeachingMethodId,
    },
    /// Flip a learning resource selection
    ToggleLearningResource {
        /// CO id
        co: CourseOutcomeId,
        /// Resource id
        id: LearningResourceId,
    },
    /// Set or clear the TLA assessment method
    SetAssessmentMethod {
        /// CO id
        co: CourseOutcomeId,
        /// Method; absent or blank clears
        #[serde(default)]
        method: Option<String>,
    },
    /// Restore one section and the sections it owns
    Reset {
        /// Section to restore
        section: SyllabusSection,
    },
    /// Restore every section
    ResetAll,
}

impl DocumentEdit for SyllabusEdit {
    type Target = CourseSyllabus;

    fn apply(&self, engine: &mut RevisionEngine<CourseSyllabus>) -> Result<(), RevisionError> {
        match self {
            Self::AddCourseOutcome { name, statement } => {
                engine.add_course_outcome(name, statement)?;
            }
            Self::UpdateCourseOutcome {
                id,
                name,
                statement,
            } => {
                engine.update_course_outcome(*id, name, statement)?;
            }
            Self::RemoveCourseOutcome { id } => {
                engine.remove_course_outcome(*id);
            }
            Self::SetAbcd { co, abcd } => {
                engine.set_abcd(*co, abcd.clone());
            }
            Self::SetCpa { co, domain } => {
                engine.set_cpa(*co, *domain);
            }
            Self::SetCoPoLevel { co, po, level } => {
                engine.set_co_po_level(*co, *po, *level);
            }
            Self::AddAssessmentTask {
                co,
                code,
                name,
                tool,
                weight,
            } => {
                engine.add_assessment_task(*co, code, name, tool, *weight)?;
            }
            Self::UpdateAssessmentTask {
                id,
                code,
                name,
                tool,
                weight,
            } => {
                engine.update_assessment_task(*id, code, name, tool, *weight)?;
            }
            Self::RemoveAssessmentTask { id } => {
                engine.remove_assessment_task(*id);
            }
            Self::AddTeachingMethod { name } => {
                engine.add_teaching_method(name)?;
            }
            Self::RemoveTeachingMethod { id } => {
                engine.remove_teaching_method(*id);
            }
            Self::AddLearningResource { name } => {
                engine.add_learning_resource(name)?;
            }
            Self::RemoveLearningResource { id } => {
                engine.remove_learning_resource(*id);
            }
            Self::ToggleTeachingMethod { co, id } => {
                engine.toggle_teaching_method(*co, *id);
            }
            Self::ToggleLearningResource { co, id } => {
                engine.toggle_learning_resource(*co, *id);
            }
            Self::SetAssessmentMethod { co, method } => {
                engine.set_assessment_method(*co, method.as_deref());
            }
            Self::Reset { section } => {
                engine.reset_section(*section);
            }
            Self::ResetAll => engine.reset_all(),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cms_model::CourseSyllabusResponse;
    use serde_json::json;

    #[test]
    fn wizard_log_replays() {
        let edits: Vec<SyllabusEdit> = serde_json::from_value(json!([
            {"op": "add_course_outcome", "statement": "Explain recursion"},
            {"op": "set_cpa", "co": 1, "domain": "C"},
            {"op": "set_co_po_level", "co": 1, "po": 2, "level": "E"},
            {"op": "add_teaching_method", "name": "Lecture"},
            {"op": "toggle_teaching_method", "co": 1, "id": 1},
            {"op": "add_assessment_task", "co": 1, "code": "Q1", "weight": 25.0},
            {"op": "set_co_po_level", "co": 1, "po": 2}
        ]))
        .unwrap();

        let mut engine =
            RevisionEngine::<CourseSyllabus>::initialize(CourseSyllabusResponse::default());
        assert_eq!(engine.apply_edits(&edits).unwrap(), 7);

        let state = engine.state();
        assert_eq!(state.course_outcomes[0].name, "CO1");
        assert_eq!(state.cpa_for(CourseOutcomeId(1)), Some(CpaDomain::Cognitive));
        assert!(state.co_po_mappings.is_empty());
        assert_eq!(state.tl_mappings.len(), 1);
        assert_eq!(state.assessment_tasks.len(), 1);
    }
}
