//! Course syllabus mutators
//!
//! Per-CO setters on a CO that does not exist are silent no-ops returning
//! `false`; creating a TLA task under an unknown CO is an error.

use super::{CourseSyllabus, SyllabusRemoval, SyllabusState};
use crate::document::{retain_count, toggle};
use crate::engine::RevisionEngine;
use crate::error::{RevisionError, ValidationError};
use crate::section::SyllabusSection;
use cms_model::{
    Abcd, AbcdError, AssessmentTask, CoAbcd, CoCpa, CoPoMapping, ContributionLevel, CourseOutcome,
    CourseOutcomeId, CpaDomain, LearningResource, LearningResourceId, PoId, SequentialId, TaskId,
    TeachingMethod, TeachingMethodId, TlMapping,
};

fn rejected(err: ValidationError) -> RevisionError {
    tracing::warn!("Rejected syllabus edit: {}", err);
    RevisionError::Validation(err)
}

fn required(value: &str, field: &'static str) -> Result<String, RevisionError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(rejected(ValidationError::MissingField(field)));
    }
    Ok(value.to_string())
}

fn valid_weight(weight: f32) -> Result<f32, RevisionError> {
    if weight.is_finite() && weight > 0.0 && weight <= 100.0 {
        Ok(weight)
    } else {
        Err(rejected(ValidationError::InvalidWeight(weight)))
    }
}

/// Selection entry of `co`, created on demand
fn tl_entry(state: &mut SyllabusState, co: CourseOutcomeId) -> &mut TlMapping {
    let index = match state
        .tl_mappings
        .iter()
        .position(|m| m.course_outcome_id == co)
    {
        Some(index) => index,
        None => {
            state.tl_mappings.push(TlMapping::empty(co));
            state.tl_mappings.len() - 1
        }
    };
    &mut state.tl_mappings[index]
}

fn drop_empty_tl(state: &mut SyllabusState) {
    state.tl_mappings.retain(|m| !m.is_empty());
}

impl RevisionEngine<CourseSyllabus> {
    fn has_course_outcome(&self, co: CourseOutcomeId) -> bool {
        self.state().find_course_outcome(co).is_some()
    }

    /// Append a CO with id `max + 1`
    ///
    /// A blank name defaults to `CO<id>`.
    ///
    /// # Errors
    /// Returns [`ValidationError::MissingField`] for a blank statement
    pub fn add_course_outcome(
        &mut self,
        name: &str,
        statement: &str,
    ) -> Result<CourseOutcomeId, RevisionError> {
        let statement = required(statement, "course_outcome.statement")?;
        let id = CourseOutcomeId::next_after(self.state().course_outcomes.iter().map(|co| co.id));
        let name = match name.trim() {
            "" => format!("CO{}", id.get()),
            name => name.to_string(),
        };
        self.state_mut()
            .course_outcomes
            .push(CourseOutcome { id, name, statement });
        self.mark(SyllabusSection::CourseOutcomes);
        Ok(id)
    }

    /// Replace a CO's name and statement; `Ok(false)` if the id is unknown
    ///
    /// # Errors
    /// Returns [`ValidationError::MissingField`] for a blank name or statement
    pub fn update_course_outcome(
        &mut self,
        id: CourseOutcomeId,
        name: &str,
        statement: &str,
    ) -> Result<bool, RevisionError> {
        let name = required(name, "course_outcome.name")?;
        let statement = required(statement, "course_outcome.statement")?;
        let Some(co) = self
            .state_mut()
            .course_outcomes
            .iter_mut()
            .find(|co| co.id == id)
        else {
            return Ok(false);
        };
        co.name = name;
        co.statement = statement;
        self.mark(SyllabusSection::CourseOutcomes);
        Ok(true)
    }

    /// Remove a CO and everything it owns
    pub fn remove_course_outcome(&mut self, id: CourseOutcomeId) -> bool {
        if retain_count(&mut self.state_mut().course_outcomes, |co| co.id != id) == 0 {
            return false;
        }
        self.mark(SyllabusSection::CourseOutcomes);
        self.cascade_removal(
            SyllabusSection::CourseOutcomes,
            &SyllabusRemoval::CourseOutcome(id),
        );
        true
    }

    /// Store the ABCD breakdown of a CO
    ///
    /// Stored as given; use [`RevisionEngine::validate_abcd`] for the
    /// substring rules.
    pub fn set_abcd(&mut self, co: CourseOutcomeId, abcd: Abcd) -> bool {
        if !self.has_course_outcome(co) {
            return false;
        }
        let records = &mut self.state_mut().abcd;
        match records.iter_mut().find(|a| a.course_outcome_id == co) {
            Some(record) => record.abcd = abcd,
            None => records.push(CoAbcd {
                course_outcome_id: co,
                abcd,
            }),
        }
        self.mark(SyllabusSection::Abcd);
        true
    }

    /// Check a CO's ABCD breakdown against its statement
    ///
    /// `None` for an unknown CO. A CO with no breakdown validates as empty.
    #[must_use]
    pub fn validate_abcd(&self, co: CourseOutcomeId) -> Option<Result<(), AbcdError>> {
        let outcome = self.state().find_course_outcome(co)?;
        let empty = Abcd::default();
        let abcd = self.state().abcd_for(co).unwrap_or(&empty);
        Some(abcd.validate(&outcome.statement))
    }

    /// Set or clear the CPA domain of a CO
    pub fn set_cpa(&mut self, co: CourseOutcomeId, domain: Option<CpaDomain>) -> bool {
        if !self.has_course_outcome(co) {
            return false;
        }
        let records = &mut self.state_mut().cpa;
        let existing = records.iter().position(|c| c.course_outcome_id == co);
        match (existing, domain) {
            (None, None) => return false,
            (Some(index), None) => {
                records.remove(index);
            }
            (Some(index), Some(domain)) => records[index].domain = domain,
            (None, Some(domain)) => records.push(CoCpa {
                course_outcome_id: co,
                domain,
            }),
        }
        self.mark(SyllabusSection::Cpa);
        true
    }

    /// Set or clear the contribution level of a CO to a PO
    ///
    /// `None` deletes the record; there is never more than one record per
    /// (CO, PO). Setting the current level again still counts as an edit.
    /// Returns `false` when nothing was written.
    pub fn set_co_po_level(
        &mut self,
        co: CourseOutcomeId,
        po: PoId,
        level: Option<ContributionLevel>,
    ) -> bool {
        if !self.has_course_outcome(co) {
            return false;
        }
        let records = &mut self.state_mut().co_po_mappings;
        let existing = records
            .iter()
            .position(|m| m.course_outcome_id == co && m.program_outcome_id == po);
        match (existing, level) {
            (None, None) => return false,
            (Some(index), None) => {
                records.remove(index);
            }
            (Some(index), Some(level)) => records[index].contribution_level = level,
            (None, Some(level)) => records.push(CoPoMapping {
                course_outcome_id: co,
                program_outcome_id: po,
                contribution_level: level,
            }),
        }
        self.mark(SyllabusSection::CoPoMappings);
        true
    }

    /// Add a TLA task under a CO with id `max + 1`
    ///
    /// # Errors
    /// - [`ValidationError::UnknownCourseOutcome`] if the CO does not exist
    /// - [`ValidationError::MissingField`] for a blank code
    /// - [`ValidationError::InvalidWeight`] unless `0 < weight <= 100`
    pub fn add_assessment_task(
        &mut self,
        co: CourseOutcomeId,
        code: &str,
        name: &str,
        tool: &str,
        weight: f32,
    ) -> Result<TaskId, RevisionError> {
        if !self.has_course_outcome(co) {
            return Err(rejected(ValidationError::UnknownCourseOutcome(co)));
        }
        let code = required(code, "assessment_task.code")?;
        let weight = valid_weight(weight)?;
        let id = TaskId::next_after(self.state().assessment_tasks.iter().map(|t| t.id));
        self.state_mut().assessment_tasks.push(AssessmentTask {
            id,
            course_outcome_id: co,
            code,
            name: name.trim().to_string(),
            tool: tool.trim().to_string(),
            weight,
        });
        self.mark(SyllabusSection::AssessmentTasks);
        Ok(id)
    }

    /// Replace a task's fields; `Ok(false)` if the id is unknown
    ///
    /// # Errors
    /// Same rules as [`RevisionEngine::add_assessment_task`] for code and weight
    pub fn update_assessment_task(
        &mut self,
        id: TaskId,
        code: &str,
        name: &str,
        tool: &str,
        weight: f32,
    ) -> Result<bool, RevisionError> {
        let code = required(code, "assessment_task.code")?;
        let weight = valid_weight(weight)?;
        let Some(task) = self
            .state_mut()
            .assessment_tasks
            .iter_mut()
            .find(|t| t.id == id)
        else {
            return Ok(false);
        };
        task.code = code;
        task.name = name.trim().to_string();
        task.tool = tool.trim().to_string();
        task.weight = weight;
        self.mark(SyllabusSection::AssessmentTasks);
        Ok(true)
    }

    /// Remove a TLA task
    pub fn remove_assessment_task(&mut self, id: TaskId) -> bool {
        if retain_count(&mut self.state_mut().assessment_tasks, |t| t.id != id) == 0 {
            return false;
        }
        self.mark(SyllabusSection::AssessmentTasks);
        true
    }

    /// Add a teaching method to the catalog
    ///
    /// # Errors
    /// Returns [`ValidationError::MissingField`] for a blank name
    pub fn add_teaching_method(&mut self, name: &str) -> Result<TeachingMethodId, RevisionError> {
        let name = required(name, "teaching_method.name")?;
        let id = TeachingMethodId::next_after(self.state().teaching_methods.iter().map(|m| m.id));
        self.state_mut()
            .teaching_methods
            .push(TeachingMethod { id, name });
        self.mark(SyllabusSection::TeachingMethods);
        Ok(id)
    }

    /// Remove a teaching method and strip it from every CO selection
    pub fn remove_teaching_method(&mut self, id: TeachingMethodId) -> bool {
        if retain_count(&mut self.state_mut().teaching_methods, |m| m.id != id) == 0 {
            return false;
        }
        self.mark(SyllabusSection::TeachingMethods);
        self.cascade_removal(
            SyllabusSection::TeachingMethods,
            &SyllabusRemoval::TeachingMethod(id),
        );
        true
    }

    /// Add a learning resource to the catalog
    ///
    /// # Errors
    /// Returns [`ValidationError::MissingField`] for a blank name
    pub fn add_learning_resource(&mut self, name: &str) -> Result<LearningResourceId, RevisionError> {
        let name = required(name, "learning_resource.name")?;
        let id =
            LearningResourceId::next_after(self.state().learning_resources.iter().map(|r| r.id));
        self.state_mut()
            .learning_resources
            .push(LearningResource { id, name });
        self.mark(SyllabusSection::LearningResources);
        Ok(id)
    }

    /// Remove a learning resource and strip it from every CO selection
    pub fn remove_learning_resource(&mut self, id: LearningResourceId) -> bool {
        if retain_count(&mut self.state_mut().learning_resources, |r| r.id != id) == 0 {
            return false;
        }
        self.mark(SyllabusSection::LearningResources);
        self.cascade_removal(
            SyllabusSection::LearningResources,
            &SyllabusRemoval::LearningResource(id),
        );
        true
    }

    /// Flip a teaching method in a CO's selection
    ///
    /// Returns the new presence, or `None` if the CO or the method is unknown.
    pub fn toggle_teaching_method(
        &mut self,
        co: CourseOutcomeId,
        id: TeachingMethodId,
    ) -> Option<bool> {
        if !self.has_course_outcome(co) || !self.state().has_teaching_method(id) {
            return None;
        }
        let state = self.state_mut();
        let present = toggle(&mut tl_entry(state, co).teaching_methods, id);
        drop_empty_tl(state);
        self.mark(SyllabusSection::TlMappings);
        Some(present)
    }

    /// Flip a learning resource in a CO's selection
    ///
    /// Returns the new presence, or `None` if the CO or the resource is unknown.
    pub fn toggle_learning_resource(
        &mut self,
        co: CourseOutcomeId,
        id: LearningResourceId,
    ) -> Option<bool> {
        if !self.has_course_outcome(co) || !self.state().has_learning_resource(id) {
            return None;
        }
        let state = self.state_mut();
        let present = toggle(&mut tl_entry(state, co).learning_resources, id);
        drop_empty_tl(state);
        self.mark(SyllabusSection::TlMappings);
        Some(present)
    }

    /// Set or clear a CO's TLA assessment method
    ///
    /// A blank method clears it.
    pub fn set_assessment_method(&mut self, co: CourseOutcomeId, method: Option<&str>) -> bool {
        if !self.has_course_outcome(co) {
            return false;
        }
        let method = method
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string);
        let state = self.state_mut();
        if method.is_none() && state.tl_mapping(co).is_none() {
            return false;
        }
        tl_entry(state, co).assessment_method = method;
        drop_empty_tl(state);
        self.mark(SyllabusSection::TlMappings);
        true
    }
}
