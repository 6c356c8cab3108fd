//! Course outcome entities
//!
//! Normalized records for one course syllabus. Every per-CO record carries
//! the owning `course_outcome_id`, so removing a CO can purge them by key.

use crate::abcd::Abcd;
use crate::ids::{CourseOutcomeId, LearningResourceId, PoId, TaskId, TeachingMethodId};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Strength of a contribution to a program outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ContributionLevel {
    /// Introductory
    #[serde(rename = "I")]
    Introductory,
    /// Enabling
    #[serde(rename = "E")]
    Enabling,
    /// Development
    #[serde(rename = "D")]
    Development,
}

impl ContributionLevel {
    /// One-letter wire code
    #[inline]
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Introductory => "I",
            Self::Enabling => "E",
            Self::Development => "D",
        }
    }
}

impl Display for ContributionLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ContributionLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "I" | "INTRODUCTORY" => Ok(Self::Introductory),
            "E" | "ENABLING" => Ok(Self::Enabling),
            "D" | "DEVELOPMENT" => Ok(Self::Development),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/// Unrecognised contribution level
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown contribution level: {0:?}")]
pub struct ParseLevelError(pub String);

/// Cognitive / psychomotor / affective classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CpaDomain {
    /// Cognitive
    #[serde(rename = "C", alias = "cognitive")]
    Cognitive,
    /// Psychomotor
    #[serde(rename = "P", alias = "psychomotor")]
    Psychomotor,
    /// Affective
    #[serde(rename = "A", alias = "affective")]
    Affective,
}

/// Course outcome header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseOutcome {
    /// Id
    pub id: CourseOutcomeId,
    /// Short label, e.g. `CO1`
    pub name: String,
    /// Outcome statement
    pub statement: String,
}

/// ABCD breakdown owned by one CO
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoAbcd {
    /// Owning CO
    pub course_outcome_id: CourseOutcomeId,
    /// The four fields
    #[serde(flatten)]
    pub abcd: Abcd,
}

/// CPA classification owned by one CO
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoCpa {
    /// Owning CO
    pub course_outcome_id: CourseOutcomeId,
    /// Domain
    pub domain: CpaDomain,
}

/// CO → PO contribution
///
/// At most one record exists per (CO, PO) pair. "No mapping" is the absence
/// of a record, never a null level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoPoMapping {
    /// Course outcome
    pub course_outcome_id: CourseOutcomeId,
    /// Program outcome
    pub program_outcome_id: PoId,
    /// Contribution level
    pub contribution_level: ContributionLevel,
}

/// Assessed teaching-learning activity of one CO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentTask {
    /// Id
    pub id: TaskId,
    /// Owning CO
    pub course_outcome_id: CourseOutcomeId,
    /// Short code, e.g. `Q1`
    pub code: String,
    /// Task name
    pub name: String,
    /// Assessment tool, e.g. rubric
    pub tool: String,
    /// Weight in percent
    pub weight: f32,
}

/// Teaching method catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeachingMethod {
    /// Id
    pub id: TeachingMethodId,
    /// Free-form name
    pub name: String,
}

/// Learning resource catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningResource {
    /// Id
    pub id: LearningResourceId,
    /// Free-form name
    pub name: String,
}

/// Teaching/learning selections of one CO
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlMapping {
    /// Owning CO
    pub course_outcome_id: CourseOutcomeId,
    /// Selected teaching methods
    pub teaching_methods: Vec<TeachingMethodId>,
    /// Selected learning resources
    pub learning_resources: Vec<LearningResourceId>,
    /// TLA assessment method
    pub assessment_method: Option<String>,
}

impl TlMapping {
    /// Empty selection for a CO
    #[inline]
    #[must_use]
    pub fn empty(course_outcome_id: CourseOutcomeId) -> Self {
        Self {
            course_outcome_id,
            teaching_methods: Vec::new(),
            learning_resources: Vec::new(),
            assessment_method: None,
        }
    }

    /// Nothing selected
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.teaching_methods.is_empty()
            && self.learning_resources.is_empty()
            && self.assessment_method.is_none()
    }
}
