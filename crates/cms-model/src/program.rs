//! Program proposal entities
//!
//! Normalized (flat) records for one program proposal: the program itself,
//! PEOs, POs, the curriculum and its courses, and the mapping edges between
//! them. Mapping edges have no identity beyond their key fields.

use crate::ids::{CategoryId, GaId, MissionId, PeoId, PoId};
use crate::outcome::ContributionLevel;
use crate::semester::{Semester, SemesterSlot};
use serde::{Deserialize, Serialize};

/// Program header (one per proposal)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Full program name
    #[serde(default)]
    pub name: String,
    /// Short code, e.g. `BSCS`
    #[serde(default)]
    pub abbreviation: String,
}

/// Program educational objective
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Peo {
    /// Id
    pub id: PeoId,
    /// Objective statement
    pub statement: String,
}

/// Program outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramOutcome {
    /// Id
    pub id: PoId,
    /// Short label, e.g. `PO-a`
    pub name: String,
    /// Outcome statement
    pub statement: String,
}

/// PEO → institutional mission edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeoMissionMapping {
    /// PEO
    pub peo_id: PeoId,
    /// Mission
    pub mission_id: MissionId,
}

/// Graduate attribute → PEO edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GaPeoMapping {
    /// Graduate attribute
    pub ga_id: GaId,
    /// PEO
    pub peo_id: PeoId,
}

/// PO → PEO edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoPeoMapping {
    /// PO
    pub po_id: PoId,
    /// PEO
    pub peo_id: PeoId,
}

/// PO → graduate attribute edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoGaMapping {
    /// PO
    pub po_id: PoId,
    /// Graduate attribute
    pub ga_id: GaId,
}

/// Curriculum header
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Curriculum {
    /// Server id
    #[serde(default)]
    pub id: u64,
    /// Display name
    #[serde(default)]
    pub name: String,
}

/// Course category within a curriculum
///
/// `code` is unique within the curriculum, compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseCategory {
    /// Server id; `None` for categories created locally
    #[serde(default)]
    pub id: Option<CategoryId>,
    /// Display name
    pub name: String,
    /// Short code, e.g. `GE`, `CORE`
    pub code: String,
}

impl CourseCategory {
    /// Case-insensitive code comparison
    #[inline]
    #[must_use]
    pub fn code_matches(&self, code: &str) -> bool {
        self.code.eq_ignore_ascii_case(code.trim())
    }
}

/// Course placed in a curriculum semester
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurriculumCourse {
    /// Course code, e.g. `CS 101`
    pub course_code: String,
    /// Owning category code
    pub category_code: String,
    /// Curriculum year
    pub semester_year: u8,
    /// Term within the year
    pub semester_name: Semester,
    /// Credit units
    pub units: f32,
}

impl CurriculumCourse {
    /// Grouping / sort key
    #[inline]
    #[must_use]
    pub fn slot(&self) -> SemesterSlot {
        SemesterSlot::new(self.semester_year, self.semester_name)
    }
}

/// Course → PO contribution record
///
/// `ied` is carried exactly as received; use [`CoursePoMapping::levels`] for
/// the recognised values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoursePoMapping {
    /// Course code
    pub course_code: String,
    /// PO
    pub po_id: PoId,
    /// Raw contribution levels (`I`, `E`, `D`)
    pub ied: Vec<String>,
}

impl CoursePoMapping {
    /// Recognised contribution levels, in stored order
    #[must_use]
    pub fn levels(&self) -> Vec<ContributionLevel> {
        self.ied
            .iter()
            .filter_map(|raw| raw.parse().ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_code_match_ignores_case_and_padding() {
        let cat = CourseCategory {
            id: None,
            name: "General Education".to_string(),
            code: "GE".to_string(),
        };
        assert!(cat.code_matches("ge"));
        assert!(cat.code_matches(" Ge "));
        assert!(!cat.code_matches("GEN"));
    }

    #[test]
    fn course_slot_from_fields() {
        let course = CurriculumCourse {
            course_code: "CS 101".to_string(),
            category_code: "CORE".to_string(),
            semester_year: 2,
            semester_name: Semester::Midyear,
            units: 3.0,
        };
        assert_eq!(course.slot(), SemesterSlot::new(2, Semester::Midyear));
    }

    #[test]
    fn course_po_levels_skip_unknown() {
        let mapping = CoursePoMapping {
            course_code: "CS 101".to_string(),
            po_id: PoId(1),
            ied: vec!["I".to_string(), "x".to_string(), "D".to_string()],
        };
        assert_eq!(
            mapping.levels(),
            vec![ContributionLevel::Introductory, ContributionLevel::Development]
        );
    }
}
