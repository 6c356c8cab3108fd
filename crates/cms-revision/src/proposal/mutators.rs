//! Program proposal mutators
//!
//! Validation failures return [`ValidationError`] and leave state and dirty
//! flags untouched. Updates and removals of ids that do not exist return
//! `false` and mark nothing.

use super::{same_course, ProgramProposal, ProposalRemoval};
use crate::document::{retain_count, toggle};
use crate::engine::RevisionEngine;
use crate::error::{RevisionError, ValidationError};
use crate::section::ProposalSection;
use cms_model::{
    ContributionLevel, CourseCategory, CoursePoMapping, CurriculumCourse, GaId, GaPeoMapping,
    MissionId, Peo, PeoId, PeoMissionMapping, PoGaMapping, PoId, PoPeoMapping, ProgramOutcome,
    SemesterSlot, SequentialId,
};

fn rejected(err: ValidationError) -> RevisionError {
    tracing::warn!("Rejected proposal edit: {}", err);
    RevisionError::Validation(err)
}

fn required(value: &str, field: &'static str) -> Result<String, RevisionError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(rejected(ValidationError::MissingField(field)));
    }
    Ok(value.to_string())
}

fn valid_units(units: f32) -> Result<f32, RevisionError> {
    if units.is_finite() && units > 0.0 {
        Ok(units)
    } else {
        Err(rejected(ValidationError::InvalidUnits(units)))
    }
}

impl RevisionEngine<ProgramProposal> {
    /// Replace program name and abbreviation
    ///
    /// # Errors
    /// Returns [`ValidationError::MissingField`] if either is blank
    pub fn update_program(&mut self, name: &str, abbreviation: &str) -> Result<(), RevisionError> {
        let name = required(name, "program.name")?;
        let abbreviation = required(abbreviation, "program.abbreviation")?;
        let program = &mut self.state_mut().program;
        program.name = name;
        program.abbreviation = abbreviation;
        self.mark(ProposalSection::Program);
        Ok(())
    }

    /// Append a PEO with id `max + 1`
    ///
    /// # Errors
    /// Returns [`ValidationError::MissingField`] for a blank statement
    pub fn add_peo(&mut self, statement: &str) -> Result<PeoId, RevisionError> {
        let statement = required(statement, "peo.statement")?;
        let id = PeoId::next_after(self.state().peos.iter().map(|p| p.id));
        self.state_mut().peos.push(Peo { id, statement });
        self.mark(ProposalSection::Peos);
        Ok(id)
    }

    /// Replace a PEO statement; `Ok(false)` if the id is unknown
    ///
    /// # Errors
    /// Returns [`ValidationError::MissingField`] for a blank statement
    pub fn update_peo(&mut self, id: PeoId, statement: &str) -> Result<bool, RevisionError> {
        let statement = required(statement, "peo.statement")?;
        let Some(peo) = self.state_mut().peos.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };
        peo.statement = statement;
        self.mark(ProposalSection::Peos);
        Ok(true)
    }

    /// Remove a PEO and every mapping that references it
    pub fn remove_peo(&mut self, id: PeoId) -> bool {
        if retain_count(&mut self.state_mut().peos, |p| p.id != id) == 0 {
            return false;
        }
        self.mark(ProposalSection::Peos);
        self.cascade_removal(ProposalSection::Peos, &ProposalRemoval::Peo(id));
        true
    }

    /// Append a PO with id `max + 1`
    ///
    /// # Errors
    /// Returns [`ValidationError::MissingField`] for a blank name or statement
    pub fn add_po(&mut self, name: &str, statement: &str) -> Result<PoId, RevisionError> {
        let name = required(name, "po.name")?;
        let statement = required(statement, "po.statement")?;
        let id = PoId::next_after(self.state().pos.iter().map(|p| p.id));
        self.state_mut()
            .pos
            .push(ProgramOutcome { id, name, statement });
        self.mark(ProposalSection::Pos);
        Ok(id)
    }

    /// Replace a PO's name and statement; `Ok(false)` if the id is unknown
    ///
    /// # Errors
    /// Returns [`ValidationError::MissingField`] for a blank name or statement
    pub fn update_po(&mut self, id: PoId, name: &str, statement: &str) -> Result<bool, RevisionError> {
        let name = required(name, "po.name")?;
        let statement = required(statement, "po.statement")?;
        let Some(po) = self.state_mut().pos.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };
        po.name = name;
        po.statement = statement;
        self.mark(ProposalSection::Pos);
        Ok(true)
    }

    /// Remove a PO and every mapping that references it
    pub fn remove_po(&mut self, id: PoId) -> bool {
        if retain_count(&mut self.state_mut().pos, |p| p.id != id) == 0 {
            return false;
        }
        self.mark(ProposalSection::Pos);
        self.cascade_removal(ProposalSection::Pos, &ProposalRemoval::Po(id));
        true
    }

    fn has_peo(&self, id: PeoId) -> bool {
        self.state().find_peo(id).is_some()
    }

    fn has_po(&self, id: PoId) -> bool {
        self.state().find_po(id).is_some()
    }

    /// Flip a PEO → mission edge
    ///
    /// Returns the new presence, or `None` if the PEO is unknown.
    pub fn toggle_peo_mission_mapping(&mut self, peo_id: PeoId, mission_id: MissionId) -> Option<bool> {
        if !self.has_peo(peo_id) {
            return None;
        }
        let present = toggle(
            &mut self.state_mut().peo_mission_mappings,
            PeoMissionMapping { peo_id, mission_id },
        );
        self.mark(ProposalSection::PeoMissionMappings);
        Some(present)
    }

    /// Flip a GA → PEO edge
    ///
    /// Returns the new presence, or `None` if the PEO is unknown.
    pub fn toggle_ga_peo_mapping(&mut self, ga_id: GaId, peo_id: PeoId) -> Option<bool> {
        if !self.has_peo(peo_id) {
            return None;
        }
        let present = toggle(
            &mut self.state_mut().ga_peo_mappings,
            GaPeoMapping { ga_id, peo_id },
        );
        self.mark(ProposalSection::GaPeoMappings);
        Some(present)
    }

    /// Flip a PO → PEO edge
    ///
    /// Returns the new presence, or `None` if the PO or PEO is unknown.
    pub fn toggle_po_peo_mapping(&mut self, po_id: PoId, peo_id: PeoId) -> Option<bool> {
        if !self.has_po(po_id) || !self.has_peo(peo_id) {
            return None;
        }
        let present = toggle(
            &mut self.state_mut().po_peo_mappings,
            PoPeoMapping { po_id, peo_id },
        );
        self.mark(ProposalSection::PoPeoMappings);
        Some(present)
    }

    /// Flip a PO → GA edge
    ///
    /// Returns the new presence, or `None` if the PO is unknown.
    pub fn toggle_po_ga_mapping(&mut self, po_id: PoId, ga_id: GaId) -> Option<bool> {
        if !self.has_po(po_id) {
            return None;
        }
        let present = toggle(
            &mut self.state_mut().po_ga_mappings,
            PoGaMapping { po_id, ga_id },
        );
        self.mark(ProposalSection::PoGaMappings);
        Some(present)
    }

    /// Rename the curriculum
    ///
    /// # Errors
    /// Returns [`ValidationError::MissingField`] for a blank name
    pub fn update_curriculum(&mut self, name: &str) -> Result<(), RevisionError> {
        let name = required(name, "curriculum.name")?;
        self.state_mut().curriculum.name = name;
        self.mark(ProposalSection::Curriculum);
        Ok(())
    }

    /// Add a course category
    ///
    /// # Errors
    /// - [`ValidationError::MissingField`] for a blank name or code
    /// - [`ValidationError::DuplicateCategoryCode`] if the code exists (case-insensitive)
    pub fn add_course_category(&mut self, name: &str, code: &str) -> Result<(), RevisionError> {
        let name = required(name, "course_category.name")?;
        let code = required(code, "course_category.code")?;
        if self.state().find_category(&code).is_some() {
            return Err(rejected(ValidationError::DuplicateCategoryCode { code }));
        }
        self.state_mut()
            .course_categories
            .push(CourseCategory { id: None, name, code });
        self.mark(ProposalSection::CourseCategories);
        Ok(())
    }

    /// Rename a category and optionally change its code
    ///
    /// A code change is propagated to every curriculum course filed under the
    /// old code. Returns `Ok(false)` if no category has `code`.
    ///
    /// # Errors
    /// - [`ValidationError::MissingField`] for a blank name or new code
    /// - [`ValidationError::DuplicateCategoryCode`] if another category has `new_code`
    pub fn update_course_category(
        &mut self,
        code: &str,
        name: &str,
        new_code: &str,
    ) -> Result<bool, RevisionError> {
        let Some(index) = self
            .state()
            .course_categories
            .iter()
            .position(|c| c.code_matches(code))
        else {
            return Ok(false);
        };
        let name = required(name, "course_category.name")?;
        let new_code = required(new_code, "course_category.code")?;
        let clash = self
            .state()
            .course_categories
            .iter()
            .enumerate()
            .any(|(i, c)| i != index && c.code_matches(&new_code));
        if clash {
            return Err(rejected(ValidationError::DuplicateCategoryCode { code: new_code }));
        }

        let category = &mut self.state_mut().course_categories[index];
        let old_code = std::mem::replace(&mut category.code, new_code.clone());
        category.name = name;
        self.mark(ProposalSection::CourseCategories);

        if old_code != new_code {
            let mut moved = 0;
            for course in &mut self.state_mut().curriculum_courses {
                if course.category_code.eq_ignore_ascii_case(&old_code) {
                    course.category_code.clone_from(&new_code);
                    moved += 1;
                }
            }
            if moved > 0 {
                tracing::debug!("Moved {} course(s) from {} to {}", moved, old_code, new_code);
                self.mark(ProposalSection::CurriculumCourses);
            }
        }
        Ok(true)
    }

    /// Remove an unused category; `Ok(false)` if no category has `code`
    ///
    /// # Errors
    /// Returns [`ValidationError::CategoryInUse`] while courses are filed under it
    pub fn remove_course_category(&mut self, code: &str) -> Result<bool, RevisionError> {
        let Some(category) = self.state().find_category(code) else {
            return Ok(false);
        };
        let category_code = category.code.clone();
        let courses = self.state().courses_in_category(&category_code);
        if courses > 0 {
            return Err(rejected(ValidationError::CategoryInUse {
                code: category_code,
                courses,
            }));
        }
        retain_count(&mut self.state_mut().course_categories, |c| {
            !c.code_matches(&category_code)
        });
        self.mark(ProposalSection::CourseCategories);
        Ok(true)
    }

    /// Place a course in a semester
    ///
    /// An empty `category_code` files the course as uncategorized.
    ///
    /// # Errors
    /// - [`ValidationError::MissingField`] for a blank course code
    /// - [`ValidationError::InvalidUnits`] unless units are positive
    /// - [`ValidationError::UnknownCategory`] for a category that does not exist
    /// - [`ValidationError::DuplicateCourseInSemester`] if the code is already in that slot
    pub fn add_curriculum_course(&mut self, course: CurriculumCourse) -> Result<(), RevisionError> {
        let course_code = required(&course.course_code, "curriculum_course.course_code")?;
        let units = valid_units(course.units)?;

        let category_code = match course.category_code.trim() {
            "" => String::new(),
            code => match self.state().find_category(code) {
                Some(category) => category.code.clone(),
                None => {
                    return Err(rejected(ValidationError::UnknownCategory {
                        code: code.to_string(),
                    }))
                }
            },
        };

        let slot = course.slot();
        let duplicate = self
            .state()
            .curriculum_courses
            .iter()
            .any(|c| same_course(&c.course_code, &course_code) && c.slot() == slot);
        if duplicate {
            return Err(rejected(ValidationError::DuplicateCourseInSemester {
                course_code,
                slot,
            }));
        }

        self.state_mut().curriculum_courses.push(CurriculumCourse {
            course_code,
            category_code,
            units,
            ..course
        });
        self.mark(ProposalSection::CurriculumCourses);
        Ok(())
    }

    /// Change the units of a placed course; `Ok(false)` if not placed in `slot`
    ///
    /// Course codes match ignoring ASCII case, here and in every other
    /// course lookup.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidUnits`] unless units are positive
    pub fn update_curriculum_course_units(
        &mut self,
        course_code: &str,
        slot: SemesterSlot,
        units: f32,
    ) -> Result<bool, RevisionError> {
        let units = valid_units(units)?;
        let Some(course) = self
            .state_mut()
            .curriculum_courses
            .iter_mut()
            .find(|c| same_course(&c.course_code, course_code) && c.slot() == slot)
        else {
            return Ok(false);
        };
        course.units = units;
        self.mark(ProposalSection::CurriculumCourses);
        Ok(true)
    }

    /// Remove a course from one semester
    ///
    /// When no other semester still holds the course, its PO contributions
    /// are removed as well.
    pub fn remove_curriculum_course(&mut self, course_code: &str, slot: SemesterSlot) -> bool {
        let removed = retain_count(&mut self.state_mut().curriculum_courses, |c| {
            !(same_course(&c.course_code, course_code) && c.slot() == slot)
        });
        if removed == 0 {
            return false;
        }
        self.mark(ProposalSection::CurriculumCourses);

        let still_placed = self
            .state()
            .curriculum_courses
            .iter()
            .any(|c| same_course(&c.course_code, course_code));
        if !still_placed {
            self.cascade_removal(
                ProposalSection::CurriculumCourses,
                &ProposalRemoval::Course(course_code.to_string()),
            );
        }
        true
    }

    /// Set the contribution levels of a course to a PO
    ///
    /// An empty `levels` deletes the record; there is never more than one
    /// record per (course, PO). Returns whether a record exists afterwards.
    /// A course that is not placed in the curriculum, or an unknown PO, is a
    /// no-op.
    pub fn set_course_po_levels(
        &mut self,
        course_code: &str,
        po_id: PoId,
        levels: &[ContributionLevel],
    ) -> bool {
        let placed = self
            .state()
            .curriculum_courses
            .iter()
            .find(|c| same_course(&c.course_code, course_code))
            .map(|c| c.course_code.clone());
        let Some(course_code) = placed else {
            return false;
        };
        if !self.has_po(po_id) {
            return false;
        }

        let mut codes: Vec<String> = Vec::with_capacity(levels.len());
        for level in levels {
            let code = level.code().to_string();
            if !codes.contains(&code) {
                codes.push(code);
            }
        }

        let mappings = &mut self.state_mut().course_po_mappings;
        let existing = mappings
            .iter()
            .position(|m| same_course(&m.course_code, &course_code) && m.po_id == po_id);

        match (existing, codes.is_empty()) {
            (None, true) => return false,
            (Some(index), true) => {
                mappings.remove(index);
            }
            (Some(index), false) => mappings[index].ied = codes,
            (None, false) => mappings.push(CoursePoMapping {
                course_code,
                po_id,
                ied: codes,
            }),
        }
        self.mark(ProposalSection::CoursePoMappings);
        !levels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cms_model::{ProgramProposalResponse, Semester};
    use serde_json::json;

    fn engine() -> RevisionEngine<ProgramProposal> {
        let source: ProgramProposalResponse = serde_json::from_value(json!({
            "id": 1,
            "program": {"name": "Computer Science", "abbreviation": "BSCS"},
            "peos": [
                {
                    "id": 3,
                    "statement": "Lead",
                    "graduate_attributes": [{"id": 1, "name": "GA1"}, {"id": 2, "name": "GA2"}]
                },
                {"id": 4, "statement": "Learn"}
            ],
            "pos": [
                {"id": 1, "name": "PO1", "statement": "Apply", "peos": [{"id": 3, "statement": "Lead"}]}
            ],
            "curriculum": {
                "id": 2,
                "name": "2025",
                "courses": [
                    {
                        "course_code": "CS101",
                        "units": 3.0,
                        "category": {"id": 1, "name": "Core", "code": "CORE"},
                        "semester": {"year": 1, "sem": "first"},
                        "po_mappings": [{"po_id": 1, "ied": ["I"]}]
                    }
                ]
            }
        }))
        .unwrap();
        RevisionEngine::initialize(source)
    }

    fn course(code: &str, category: &str, slot: SemesterSlot) -> CurriculumCourse {
        CurriculumCourse {
            course_code: code.to_string(),
            category_code: category.to_string(),
            semester_year: slot.year,
            semester_name: slot.sem,
            units: 3.0,
        }
    }

    #[test]
    fn add_peo_mints_max_plus_one() {
        let mut engine = engine();
        assert_eq!(engine.add_peo("Serve").unwrap(), PeoId(5));
        assert!(engine.is_modified(ProposalSection::Peos));
    }

    #[test]
    fn blank_statement_is_rejected_without_marking() {
        let mut engine = engine();
        let err = engine.add_peo("   ").unwrap_err();
        assert!(err.is_validation());
        assert!(!engine.has_changes());
        assert_eq!(engine.state().peos.len(), 2);
    }

    #[test]
    fn update_unknown_peo_is_silent() {
        let mut engine = engine();
        assert!(!engine.update_peo(PeoId(99), "x").unwrap());
        assert!(!engine.has_changes());
        assert!(!engine.remove_peo(PeoId(99)));
        assert!(!engine.has_changes());
    }

    #[test]
    fn remove_peo_marks_only_sections_that_lost_records() {
        let mut engine = engine();
        assert!(engine.remove_peo(PeoId(3)));

        let state = engine.state();
        assert!(state.ga_peo_mappings.iter().all(|m| m.peo_id != PeoId(3)));
        assert!(state.po_peo_mappings.iter().all(|m| m.peo_id != PeoId(3)));
        assert_eq!(
            engine.modified_sections(),
            vec![
                ProposalSection::Peos,
                ProposalSection::GaPeoMappings,
                ProposalSection::PoPeoMappings,
            ]
        );
    }

    #[test]
    fn remove_unreferenced_peo_leaves_mappings_clean() {
        let mut engine = engine();
        assert!(engine.remove_peo(PeoId(4)));
        assert_eq!(engine.modified_sections(), vec![ProposalSection::Peos]);
    }

    #[test]
    fn remove_po_cascades_to_course_mappings() {
        let mut engine = engine();
        assert!(engine.remove_po(PoId(1)));
        assert!(engine.state().course_po_mappings.is_empty());
        assert!(engine.is_modified(ProposalSection::CoursePoMappings));
        assert!(engine.is_modified(ProposalSection::PoPeoMappings));
        assert!(!engine.is_modified(ProposalSection::PoGaMappings));
    }

    #[test]
    fn toggles_flip_and_mark() {
        let mut engine = engine();
        assert_eq!(engine.toggle_ga_peo_mapping(GaId(1), PeoId(3)), Some(false));
        assert_eq!(engine.toggle_ga_peo_mapping(GaId(1), PeoId(3)), Some(true));
        assert_eq!(engine.toggle_po_ga_mapping(PoId(1), GaId(2)), Some(true));
        assert_eq!(engine.toggle_peo_mission_mapping(PeoId(4), MissionId(1)), Some(true));
        assert_eq!(engine.toggle_po_peo_mapping(PoId(1), PeoId(3)), Some(false));
        assert_eq!(engine.modified_sections().len(), 4);
    }

    #[test]
    fn toggles_on_unknown_parents_are_silent() {
        let mut engine = engine();
        assert_eq!(engine.toggle_ga_peo_mapping(GaId(1), PeoId(99)), None);
        assert_eq!(engine.toggle_po_peo_mapping(PoId(9), PeoId(3)), None);
        assert_eq!(engine.toggle_po_ga_mapping(PoId(9), GaId(1)), None);
        assert!(!engine.set_course_po_levels("CS101", PoId(9), &[ContributionLevel::Development]));
        assert!(!engine.has_changes());
    }

    #[test]
    fn duplicate_category_code_rejected_case_insensitive() {
        let mut engine = engine();
        let err = engine.add_course_category("Core again", "core").unwrap_err();
        assert!(matches!(
            err,
            RevisionError::Validation(ValidationError::DuplicateCategoryCode { .. })
        ));
        assert_eq!(engine.state().course_categories.len(), 1);
        assert!(!engine.has_changes());
    }

    #[test]
    fn category_code_change_moves_courses() {
        let mut engine = engine();
        assert!(engine.update_course_category("core", "Core", "CC").unwrap());
        assert_eq!(engine.state().curriculum_courses[0].category_code, "CC");
        assert!(engine.is_modified(ProposalSection::CourseCategories));
        assert!(engine.is_modified(ProposalSection::CurriculumCourses));
    }

    #[test]
    fn category_rename_keeps_courses_clean() {
        let mut engine = engine();
        assert!(engine.update_course_category("CORE", "Core courses", "CORE").unwrap());
        assert!(!engine.is_modified(ProposalSection::CurriculumCourses));
    }

    #[test]
    fn category_in_use_cannot_be_removed() {
        let mut engine = engine();
        let err = engine.remove_course_category("CORE").unwrap_err();
        assert!(matches!(
            err,
            RevisionError::Validation(ValidationError::CategoryInUse { courses: 1, .. })
        ));

        engine.add_course_category("Electives", "EL").unwrap();
        assert!(engine.remove_course_category("el").unwrap());
        assert!(!engine.remove_course_category("EL").unwrap());
    }

    #[test]
    fn duplicate_course_in_semester_rejected() {
        let mut engine = engine();
        let first = SemesterSlot::new(1, Semester::First);
        let err = engine
            .add_curriculum_course(course("CS101", "CORE", first))
            .unwrap_err();
        assert!(matches!(
            err,
            RevisionError::Validation(ValidationError::DuplicateCourseInSemester { .. })
        ));
        assert!(!engine.has_changes());

        let second = SemesterSlot::new(1, Semester::Second);
        engine
            .add_curriculum_course(course("CS101", "core", second))
            .unwrap();
        assert_eq!(engine.state().curriculum_courses[1].category_code, "CORE");
    }

    #[test]
    fn unknown_category_and_bad_units_rejected() {
        let mut engine = engine();
        let slot = SemesterSlot::new(2, Semester::First);
        assert!(engine
            .add_curriculum_course(course("CS201", "NOPE", slot))
            .is_err());
        let mut zero = course("CS201", "", slot);
        zero.units = 0.0;
        assert!(matches!(
            engine.add_curriculum_course(zero),
            Err(RevisionError::Validation(ValidationError::InvalidUnits(_)))
        ));
        assert!(!engine.has_changes());
    }

    #[test]
    fn removing_last_placement_drops_po_contributions() {
        let mut engine = engine();
        let first = SemesterSlot::new(1, Semester::First);
        let midyear = SemesterSlot::new(1, Semester::Midyear);
        engine
            .add_curriculum_course(course("CS101", "CORE", midyear))
            .unwrap();

        assert!(engine.remove_curriculum_course("CS101", first));
        assert_eq!(engine.state().course_po_mappings.len(), 1);
        assert!(!engine.is_modified(ProposalSection::CoursePoMappings));

        assert!(engine.remove_curriculum_course("CS101", midyear));
        assert!(engine.state().course_po_mappings.is_empty());
        assert!(engine.is_modified(ProposalSection::CoursePoMappings));
    }

    #[test]
    fn course_po_levels_keep_one_record() {
        use ContributionLevel::{Enabling, Introductory};
        let mut engine = engine();

        assert!(engine.set_course_po_levels("CS101", PoId(1), &[Introductory, Enabling, Enabling]));
        assert_eq!(engine.state().course_po_mappings.len(), 1);
        assert_eq!(
            engine.state().course_po_levels("CS101", PoId(1)),
            vec![Introductory, Enabling]
        );

        assert!(!engine.set_course_po_levels("CS101", PoId(1), &[]));
        assert!(engine.state().course_po_mappings.is_empty());
    }

    #[test]
    fn clearing_absent_course_levels_is_noop() {
        let mut engine = engine();
        assert!(!engine.set_course_po_levels("CS999", PoId(1), &[]));
        assert!(!engine.has_changes());
    }

    #[test]
    fn units_update_by_slot() {
        let mut engine = engine();
        let first = SemesterSlot::new(1, Semester::First);
        assert!(engine.update_curriculum_course_units("CS101", first, 4.0).unwrap());
        assert!(!engine
            .update_curriculum_course_units("CS101", SemesterSlot::new(3, Semester::First), 4.0)
            .unwrap());
        assert!(engine.update_curriculum_course_units("CS101", first, -1.0).is_err());
    }

    #[test]
    fn program_and_curriculum_updates() {
        let mut engine = engine();
        engine.update_program("Computer Science", "CS").unwrap();
        engine.update_curriculum("2026").unwrap();
        assert!(engine.update_program("", "CS").is_err());
        assert_eq!(engine.state().program.abbreviation, "CS");
        assert_eq!(
            engine.modified_sections(),
            vec![ProposalSection::Program, ProposalSection::Curriculum]
        );
    }

    #[test]
    fn po_lifecycle() {
        let mut engine = engine();
        let id = engine.add_po("PO2", "Communicate").unwrap();
        assert_eq!(id, PoId(2));
        assert!(engine.update_po(id, "PO2", "Communicate well").unwrap());
        assert!(!engine.update_po(PoId(42), "PO", "x").unwrap());
        assert_eq!(engine.state().find_po(id).unwrap().statement, "Communicate well");
    }

    #[test]
    fn course_lookups_ignore_case() {
        let mut engine = engine();
        let first = SemesterSlot::new(1, Semester::First);
        assert!(engine.add_curriculum_course(course("cs101", "CORE", first)).is_err());

        assert!(engine.update_curriculum_course_units("cs101", first, 4.0).unwrap());
        assert!(engine.set_course_po_levels("Cs101", PoId(1), &[ContributionLevel::Enabling]));
        assert_eq!(engine.state().course_po_mappings.len(), 1);
        assert_eq!(engine.state().course_po_mappings[0].course_code, "CS101");
        assert_eq!(
            engine.state().course_po_levels("cs101", PoId(1)),
            vec![ContributionLevel::Enabling]
        );

        assert!(engine.remove_curriculum_course("cs101", first));
        assert!(engine.state().curriculum_courses.is_empty());
        assert!(engine.state().course_po_mappings.is_empty());
    }
}
