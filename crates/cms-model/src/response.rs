//! Server document shapes
//!
//! Nested documents exactly as the backend returns them. Every collection and
//! optional record defaults when absent or `null` so a sparse document still parses;
//! the transformers flatten these into section-keyed state.

use crate::abcd::Abcd;
use crate::ids::{
    CategoryId, CourseOutcomeId, GaId, LearningResourceId, MissionId, PeoId, PoId, TaskId,
    TeachingMethodId,
};
use crate::outcome::{ContributionLevel, CpaDomain, LearningResource, TeachingMethod};
use crate::program::Program;
use crate::semester::SemesterSlot;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{self, Display, Formatter};

/// Treat an explicit `null` like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Review state of a proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    /// Being drafted by the department
    #[default]
    Draft,
    /// Submitted, awaiting review
    Pending,
    /// Returned to the department for changes
    ForRevision,
    /// Accepted by the reviewer
    Approved,
    /// Declined by the reviewer
    Rejected,
    /// Status string this client does not recognise
    #[serde(other)]
    Unknown,
}

impl ProposalStatus {
    /// Whether a department user may edit sections
    #[inline]
    #[must_use]
    pub const fn accepts_revisions(self) -> bool {
        matches!(self, Self::Draft | Self::ForRevision)
    }
}

impl Display for ProposalStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::ForRevision => "for_revision",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Unknown => "unknown",
        })
    }
}

/// Full program proposal as served
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgramProposalResponse {
    /// Proposal id
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    /// Review state
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ProposalStatus,
    /// Program header
    #[serde(default, deserialize_with = "null_as_default")]
    pub program: Program,
    /// PEOs with nested mission / GA links
    #[serde(default, deserialize_with = "null_as_default")]
    pub peos: Vec<PeoResponse>,
    /// POs with nested PEO / GA links
    #[serde(default, deserialize_with = "null_as_default")]
    pub pos: Vec<PoResponse>,
    /// Curriculum with nested courses
    #[serde(default, deserialize_with = "null_as_default")]
    pub curriculum: CurriculumResponse,
}

impl ProgramProposalResponse {
    /// Parse from JSON text
    ///
    /// # Errors
    /// Returns error if the text is not a proposal document
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Nested PEO
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeoResponse {
    /// Id
    pub id: PeoId,
    /// Statement
    #[serde(default, deserialize_with = "null_as_default")]
    pub statement: String,
    /// Linked missions
    #[serde(default, deserialize_with = "null_as_default")]
    pub missions: Vec<MissionRef>,
    /// Linked graduate attributes
    #[serde(default, deserialize_with = "null_as_default")]
    pub graduate_attributes: Vec<GraduateAttributeRef>,
}

/// Mission reference with display text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionRef {
    /// Id
    pub id: MissionId,
    /// Mission statement
    #[serde(default, deserialize_with = "null_as_default")]
    pub statement: String,
}

/// Graduate attribute reference with display text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraduateAttributeRef {
    /// Id
    pub id: GaId,
    /// Attribute name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// PEO reference with display text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeoRef {
    /// Id
    pub id: PeoId,
    /// Statement
    #[serde(default, deserialize_with = "null_as_default")]
    pub statement: String,
}

/// Nested PO
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoResponse {
    /// Id
    pub id: PoId,
    /// Label
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Statement
    #[serde(default, deserialize_with = "null_as_default")]
    pub statement: String,
    /// Linked PEOs
    #[serde(default, deserialize_with = "null_as_default")]
    pub peos: Vec<PeoRef>,
    /// Linked graduate attributes
    #[serde(default, deserialize_with = "null_as_default")]
    pub graduate_attributes: Vec<GraduateAttributeRef>,
}

/// Curriculum with nested courses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurriculumResponse {
    /// Server id
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    /// Name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Placed courses
    #[serde(default, deserialize_with = "null_as_default")]
    pub courses: Vec<CurriculumCourseResponse>,
}

/// Nested curriculum course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurriculumCourseResponse {
    /// Course code
    pub course_code: String,
    /// Descriptive title
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Credit units
    #[serde(default, deserialize_with = "null_as_default")]
    pub units: f32,
    /// Category the course is filed under
    #[serde(default)]
    pub category: Option<CategoryResponse>,
    /// Placement
    #[serde(default)]
    pub semester: Option<SemesterSlot>,
    /// Contributions to POs
    #[serde(default, deserialize_with = "null_as_default")]
    pub po_mappings: Vec<CoursePoMappingResponse>,
}

/// Nested category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResponse {
    /// Id
    pub id: CategoryId,
    /// Name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Code
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
}

/// Nested course → PO contribution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoursePoMappingResponse {
    /// PO
    pub po_id: PoId,
    /// Raw contribution levels
    #[serde(default, deserialize_with = "null_as_default")]
    pub ied: Vec<String>,
}

/// Course syllabus (course outcome wizard) as served
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseSyllabusResponse {
    /// Course id
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    /// Course code
    #[serde(default, deserialize_with = "null_as_default")]
    pub course_code: String,
    /// Course title
    #[serde(default, deserialize_with = "null_as_default")]
    pub course_title: String,
    /// Outcomes with nested ABCD, CPA, mappings and tasks
    #[serde(default, deserialize_with = "null_as_default")]
    pub course_outcomes: Vec<CourseOutcomeResponse>,
    /// Teaching method catalog
    #[serde(default, deserialize_with = "null_as_default")]
    pub teaching_methods: Vec<TeachingMethod>,
    /// Learning resource catalog
    #[serde(default, deserialize_with = "null_as_default")]
    pub learning_resources: Vec<LearningResource>,
}

impl CourseSyllabusResponse {
    /// Parse from JSON text
    ///
    /// # Errors
    /// Returns error if the text is not a syllabus document
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Nested course outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseOutcomeResponse {
    /// Id
    pub id: CourseOutcomeId,
    /// Label
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Statement
    #[serde(default, deserialize_with = "null_as_default")]
    pub statement: String,
    /// ABCD breakdown
    #[serde(default)]
    pub abcd: Option<Abcd>,
    /// CPA domain
    #[serde(default)]
    pub cpa: Option<CpaDomain>,
    /// CO → PO contributions
    #[serde(default, deserialize_with = "null_as_default")]
    pub po_mappings: Vec<CoPoMappingResponse>,
    /// Assessed tasks
    #[serde(default, deserialize_with = "null_as_default")]
    pub tla_tasks: Vec<AssessmentTaskResponse>,
    /// Assessment method
    #[serde(default)]
    pub tla_assessment_method: Option<String>,
    /// Selected teaching methods
    #[serde(default, deserialize_with = "null_as_default")]
    pub teaching_methods: Vec<TeachingMethodId>,
    /// Selected learning resources
    #[serde(default, deserialize_with = "null_as_default")]
    pub learning_resources: Vec<LearningResourceId>,
}

/// Nested CO → PO contribution; a null level means "not mapped"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoPoMappingResponse {
    /// PO
    pub program_outcome_id: PoId,
    /// Level, if mapped
    #[serde(default)]
    pub contribution_level: Option<ContributionLevel>,
}

/// Nested assessment task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentTaskResponse {
    /// Id
    pub id: TaskId,
    /// Code
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    /// Name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Tool
    #[serde(default, deserialize_with = "null_as_default")]
    pub tool: String,
    /// Weight in percent
    #[serde(default, deserialize_with = "null_as_default")]
    pub weight: f32,
}
