//! CMS Revision - section-level revision tracking
//!
//! Lets a department edit a hierarchical academic document piecemeal:
//! - Normalizes a nested server document into independently revisable sections
//! - Tracks which sections diverge from the server snapshot
//! - Cascades removals through a declarative section dependency graph
//! - Resets a section (and the sections it owns) from the snapshot
//! - Packages only the dirty sections into a partial-update payload
//!
//! # Example
//!
//! ```rust,ignore
//! use cms_revision::{ProgramProposal, ProposalSection, RevisionEngine};
//!
//! let mut engine = RevisionEngine::<ProgramProposal>::initialize(snapshot);
//! let id = engine.add_peo("Graduates lead multidisciplinary teams")?;
//! engine.remove_peo(id);
//! assert!(engine.is_modified(ProposalSection::Peos));
//!
//! let payload = engine.build_submission_payload()?;
//! println!("{}", payload.to_json());
//! ```

#![warn(unreachable_pub)]

// Core modules
pub mod config;
pub mod dirty;
pub mod document;
pub mod edit;
pub mod engine;
pub mod error;
pub mod registry;
pub mod section;
pub mod submission;

// Documents
pub mod proposal;
pub mod syllabus;

// Re-exports for convenience
pub use config::EngineConfig;
pub use dirty::DirtySet;
pub use document::Document;
pub use edit::DocumentEdit;
pub use engine::RevisionEngine;
pub use error::{ClientError, RevisionError, ValidationError};
pub use proposal::{ProgramProposal, ProposalEdit, ProposalRemoval, ProposalState};
pub use registry::{Edge, EdgeKind, SectionRegistry, PROPOSAL_REGISTRY, SYLLABUS_REGISTRY};
pub use section::{ProposalSection, SectionKey, SyllabusSection, UnknownSection};
pub use submission::{
    shared, DocumentRef, PendingSubmission, ProposalClient, SharedEngine, SubmissionPayload,
    SubmitOutcome, Submitter,
};
pub use syllabus::{CourseSyllabus, SyllabusEdit, SyllabusRemoval, SyllabusState};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving a revision engine
    pub use crate::{
        ClientError, CourseSyllabus, DocumentEdit, EngineConfig, ProgramProposal, ProposalClient,
        ProposalSection, RevisionEngine, RevisionError, SectionKey, Submitter, SyllabusSection,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
