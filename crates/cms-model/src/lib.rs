//! CMS Data Model
//!
//! Typed records for the two documents a department revises: a program
//! proposal and a course syllabus.
//!
//! # Core Concepts
//!
//! - Typed ids ([`PeoId`], [`PoId`], [`CourseOutcomeId`], ...) minted as
//!   `max + 1` through [`SequentialId`]
//! - Normalized entities and mapping edges ([`Peo`], [`PoPeoMapping`], [`CoPoMapping`], ...)
//! - Server document shapes ([`ProgramProposalResponse`], [`CourseSyllabusResponse`])
//! - The ABCD validity predicate ([`Abcd::validate`])
//!
//! # Example
//!
//! ```rust,ignore
//! use cms_model::{Abcd, ProgramProposalResponse};
//!
//! let doc = ProgramProposalResponse::from_json(text)?;
//! println!("{} PEOs", doc.peos.len());
//! ```

#![warn(unreachable_pub)]

mod abcd;
mod ids;
mod outcome;
mod program;
mod response;
mod semester;

pub use abcd::{Abcd, AbcdError, AbcdField};
pub use ids::{
    CategoryId, CourseOutcomeId, GaId, LearningResourceId, MissionId, PeoId, PoId, SequentialId,
    TaskId, TeachingMethodId,
};
pub use outcome::{
    AssessmentTask, CoAbcd, CoCpa, CoPoMapping, ContributionLevel, CourseOutcome, CpaDomain,
    LearningResource, ParseLevelError, TeachingMethod, TlMapping,
};
pub use program::{
    CourseCategory, CoursePoMapping, Curriculum, CurriculumCourse, GaPeoMapping, Peo,
    PeoMissionMapping, PoGaMapping, PoPeoMapping, Program, ProgramOutcome,
};
pub use response::{
    AssessmentTaskResponse, CategoryResponse, CoPoMappingResponse, CourseOutcomeResponse,
    CoursePoMappingResponse, CourseSyllabusResponse, CurriculumCourseResponse,
    CurriculumResponse, GraduateAttributeRef, MissionRef, PeoRef, PeoResponse, PoResponse,
    ProgramProposalResponse, ProposalStatus,
};
pub use semester::{Semester, SemesterSlot};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
