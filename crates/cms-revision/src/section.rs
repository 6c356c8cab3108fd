//! Section identifiers
//!
//! A section is one independently revisable part of a document. Each document
//! has a closed enum of sections; the snake_case name of a section is also its
//! key in the submission payload and in persisted dirty lists.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::str::FromStr;

/// Closed set of section identifiers for one document type
pub trait SectionKey:
    Copy
    + Eq
    + Ord
    + Hash
    + Debug
    + Display
    + Send
    + Sync
    + Serialize
    + DeserializeOwned
    + 'static
{
    /// Every section, in declaration order
    const ALL: &'static [Self];

    /// Wire name
    fn as_str(self) -> &'static str;

    /// Look up by wire name
    #[must_use]
    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.as_str() == name)
    }
}

/// Section name not known to the document type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown section: {0}")]
pub struct UnknownSection(pub String);

macro_rules! define_sections {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant ),+
        }

        impl SectionKey for $name {
            const ALL: &'static [Self] = &[ $( Self::$variant ),+ ];

            #[inline]
            fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $wire ),+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownSection;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_name(s.trim()).ok_or_else(|| UnknownSection(s.to_string()))
            }
        }
    };
}

define_sections!(
    /// Sections of a program proposal
    ProposalSection {
        /// Program name and abbreviation
        Program => "program",
        /// Program educational objectives
        Peos => "peos",
        /// PEO → mission edges
        PeoMissionMappings => "peo_mission_mappings",
        /// GA → PEO edges
        GaPeoMappings => "ga_peo_mappings",
        /// Program outcomes
        Pos => "pos",
        /// PO → PEO edges
        PoPeoMappings => "po_peo_mappings",
        /// PO → GA edges
        PoGaMappings => "po_ga_mappings",
        /// Curriculum header
        Curriculum => "curriculum",
        /// Course categories
        CourseCategories => "course_categories",
        /// Courses placed in semesters
        CurriculumCourses => "curriculum_courses",
        /// Course → PO contributions
        CoursePoMappings => "course_po_mappings",
    }
);

define_sections!(
    /// Sections of a course syllabus
    SyllabusSection {
        /// Course outcome headers
        CourseOutcomes => "course_outcomes",
        /// ABCD breakdowns
        Abcd => "abcd",
        /// CPA classifications
        Cpa => "cpa",
        /// CO → PO contribution levels
        CoPoMappings => "co_po_mappings",
        /// TLA tasks
        AssessmentTasks => "assessment_tasks",
        /// Teaching method catalog
        TeachingMethods => "teaching_methods",
        /// Learning resource catalog
        LearningResources => "learning_resources",
        /// Per-CO teaching/learning selections
        TlMappings => "tl_mappings",
    }
);
