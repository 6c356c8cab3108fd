//! Error types for CMS revision
//!
//! Provides error handling for:
//! - Rejected mutator calls (validation)
//! - Submission guard and client failures
//! - Section serialization
//! - Configuration loading

use cms_model::{CourseOutcomeId, SemesterSlot};

/// Main revision error type
#[derive(Debug, thiserror::Error)]
pub enum RevisionError {
    /// Mutator call rejected; state is unchanged
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Another submission for the same document has not resolved yet
    #[error("submission already in flight for {document_type} {id}")]
    SubmissionInFlight {
        /// Document type
        document_type: &'static str,
        /// Document id
        id: u64,
    },

    /// Submission client failed; dirty flags are preserved
    #[error("submission failed: {0}")]
    Submission(#[from] ClientError),

    /// Section could not be rendered as JSON
    #[error("failed to serialize section {section}: {source}")]
    Serialization {
        /// Section wire name
        section: &'static str,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl RevisionError {
    /// Check if the error came from a rejected mutator call
    #[inline]
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if retrying the same call may succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::SubmissionInFlight { .. } => true,
            Self::Submission(e) => e.is_retryable(),
            _ => false,
        }
    }
}

/// Reasons a mutator call is rejected
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Required text left blank
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Category code already used in this curriculum
    #[error("course category code {code:?} already exists")]
    DuplicateCategoryCode {
        /// Rejected code
        code: String,
    },

    /// Category still referenced by curriculum courses
    #[error("course category {code:?} is used by {courses} curriculum course(s)")]
    CategoryInUse {
        /// Category code
        code: String,
        /// Number of referencing courses
        courses: usize,
    },

    /// Course refers to a category that does not exist
    #[error("unknown course category {code:?}")]
    UnknownCategory {
        /// Missing code
        code: String,
    },

    /// Course already placed in this semester
    #[error("course {course_code:?} is already in {slot}")]
    DuplicateCourseInSemester {
        /// Course code
        course_code: String,
        /// Semester slot
        slot: SemesterSlot,
    },

    /// Units must be positive
    #[error("invalid units: {0}")]
    InvalidUnits(f32),

    /// Parent course outcome does not exist
    #[error("unknown course outcome {0}")]
    UnknownCourseOutcome(CourseOutcomeId),

    /// Task weight outside (0, 100]
    #[error("invalid task weight: {0} (expected 0 < weight <= 100)")]
    InvalidWeight(f32),
}

/// Submission client errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// Server answered with a rejection
    #[error("rejected by server ({status}): {message}")]
    Rejected {
        /// HTTP-like status code
        status: u16,
        /// Server message
        message: String,
    },

    /// Request never got an answer
    #[error("transport error: {0}")]
    Transport(String),

    /// Request exceeded the configured timeout
    #[error("submission timed out after {0}s")]
    Timeout(u64),
}

impl ClientError {
    /// Server-side and transport failures are worth retrying; 4xx rejections are not
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Rejected { status, .. } => *status >= 500,
            Self::Transport(_) | Self::Timeout(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_rejections_below_500_are_final() {
        let bad_request = ClientError::Rejected {
            status: 422,
            message: "invalid".to_string(),
        };
        let unavailable = ClientError::Rejected {
            status: 503,
            message: "down".to_string(),
        };
        assert!(!bad_request.is_retryable());
        assert!(unavailable.is_retryable());
        assert!(ClientError::Timeout(30).is_retryable());
    }

    #[test]
    fn revision_error_classification() {
        let err = RevisionError::from(ValidationError::MissingField("statement"));
        assert!(err.is_validation());
        assert!(!err.is_retryable());

        let err = RevisionError::from(ClientError::Transport("reset".to_string()));
        assert!(err.is_retryable());
    }

    #[test]
    fn messages_name_the_offender() {
        let err = ValidationError::DuplicateCategoryCode {
            code: "GE".to_string(),
        };
        assert_eq!(err.to_string(), "course category code \"GE\" already exists");
    }
}
