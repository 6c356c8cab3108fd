//! Testing utilities for CMS workspace
//!
//! Shared fixtures and a recording submission client.

#![allow(missing_docs)]

use async_trait::async_trait;
use cms_model::{CourseSyllabusResponse, ProgramProposalResponse};
use cms_revision::{
    ClientError, CourseSyllabus, DocumentRef, ProgramProposal, ProposalClient, RevisionEngine,
};
use parking_lot::Mutex;
use serde_json::{json, Value};

pub const SAMPLE_PROPOSAL_JSON: &str = r#"{
  "id": 42,
  "status": "for_revision",
  "program": {"name": "Bachelor of Science in Computer Science", "abbreviation": "BSCS"},
  "peos": [
    {
      "id": 1,
      "statement": "Graduates lead multidisciplinary teams",
      "missions": [{"id": 1, "statement": "Produce leaders"}],
      "graduate_attributes": [{"id": 1, "name": "Leadership"}]
    },
    {
      "id": 2,
      "statement": "Graduates pursue lifelong learning",
      "missions": [{"id": 2, "statement": "Foster inquiry"}]
    }
  ],
  "pos": [
    {
      "id": 1,
      "name": "PO1",
      "statement": "Apply computing knowledge",
      "peos": [{"id": 1, "statement": "Graduates lead multidisciplinary teams"}],
      "graduate_attributes": [{"id": 1, "name": "Leadership"}]
    },
    {
      "id": 2,
      "name": "PO2",
      "statement": "Communicate effectively",
      "peos": [{"id": 2, "statement": "Graduates pursue lifelong learning"}]
    }
  ],
  "curriculum": {
    "id": 7,
    "name": "BSCS 2025",
    "courses": [
      {
        "course_code": "CS101",
        "title": "Introduction to Computing",
        "units": 3.0,
        "category": {"id": 1, "name": "Core", "code": "CORE"},
        "semester": {"year": 1, "sem": "first"},
        "po_mappings": [{"po_id": 1, "ied": ["I"]}, {"po_id": 2, "ied": ["I", "E"]}]
      },
      {
        "course_code": "GE101",
        "title": "Purposive Communication",
        "units": 3.0,
        "category": {"id": 2, "name": "General Education", "code": "GE"},
        "semester": {"year": 1, "sem": "first"},
        "po_mappings": [{"po_id": 2, "ied": ["D"]}]
      },
      {
        "course_code": "CS102",
        "title": "Programming 1",
        "units": 3.0,
        "category": {"id": 1, "name": "Core", "code": "CORE"},
        "semester": {"year": 1, "sem": "second"}
      }
    ]
  }
}"#;

pub const SAMPLE_SYLLABUS_JSON: &str = r#"{
  "id": 101,
  "course_code": "CS101",
  "course_title": "Introduction to Computing",
  "teaching_methods": [{"id": 1, "name": "Lecture"}, {"id": 2, "name": "Laboratory"}],
  "learning_resources": [{"id": 1, "name": "Textbook"}, {"id": 2, "name": "Online videos"}],
  "course_outcomes": [
    {
      "id": 1,
      "name": "CO1",
      "statement": "Given a problem, students write a program with no syntax errors",
      "abcd": {
        "audience": "students",
        "behavior": "write a program",
        "condition": "Given a problem",
        "degree": "with no syntax errors"
      },
      "cpa": "P",
      "po_mappings": [
        {"program_outcome_id": 1, "contribution_level": "E"},
        {"program_outcome_id": 2, "contribution_level": null}
      ],
      "tla_tasks": [
        {"id": 1, "code": "LE1", "name": "Lab exercise", "tool": "Rubric", "weight": 60.0},
        {"id": 2, "code": "Q1", "name": "Quiz", "tool": "Answer key", "weight": 40.0}
      ],
      "tla_assessment_method": "Practical exam",
      "teaching_methods": [1, 2],
      "learning_resources": [1]
    },
    {
      "id": 2,
      "name": "CO2",
      "statement": "Explain the parts of a computer",
      "cpa": "C",
      "po_mappings": [{"program_outcome_id": 1, "contribution_level": "I"}],
      "teaching_methods": [1]
    }
  ]
}"#;

pub fn sample_proposal() -> ProgramProposalResponse {
    ProgramProposalResponse::from_json(SAMPLE_PROPOSAL_JSON).unwrap()
}

pub fn sample_syllabus() -> CourseSyllabusResponse {
    CourseSyllabusResponse::from_json(SAMPLE_SYLLABUS_JSON).unwrap()
}

/// PEO 1 "A" with mission 5, PEO 2 "B"
pub fn scenario_proposal() -> ProgramProposalResponse {
    serde_json::from_value(json!({
        "id": 1,
        "program": {"name": "Program", "abbreviation": "P"},
        "peos": [
            {"id": 1, "statement": "A", "missions": [{"id": 5, "statement": "M5"}]},
            {"id": 2, "statement": "B"}
        ]
    }))
    .unwrap()
}

/// PEO 3 referenced by two GA-PEO mappings and one PO-PEO mapping; PEO 4 unreferenced
pub fn cascade_proposal() -> ProgramProposalResponse {
    serde_json::from_value(json!({
        "id": 2,
        "peos": [
            {
                "id": 3,
                "statement": "Referenced",
                "graduate_attributes": [{"id": 1, "name": "GA1"}, {"id": 2, "name": "GA2"}]
            },
            {"id": 4, "statement": "Unreferenced"}
        ],
        "pos": [
            {"id": 1, "name": "PO1", "statement": "Apply", "peos": [{"id": 3, "statement": "Referenced"}]}
        ]
    }))
    .unwrap()
}

pub fn proposal_engine() -> RevisionEngine<ProgramProposal> {
    RevisionEngine::initialize(sample_proposal())
}

pub fn syllabus_engine() -> RevisionEngine<CourseSyllabus> {
    RevisionEngine::initialize(sample_syllabus())
}

/// Submission client that records every call
///
/// Answers `Ok(())` unless a failure has been set.
#[derive(Debug, Default)]
pub struct RecordingClient {
    calls: Mutex<Vec<(DocumentRef, Value)>>,
    failure: Mutex<Option<ClientError>>,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(error: ClientError) -> Self {
        let client = Self::new();
        client.set_failure(Some(error));
        client
    }

    pub fn set_failure(&self, error: Option<ClientError>) {
        *self.failure.lock() = error;
    }

    pub fn calls(&self) -> Vec<(DocumentRef, Value)> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn last_payload(&self) -> Option<Value> {
        self.calls.lock().last().map(|(_, payload)| payload.clone())
    }
}

#[async_trait]
impl ProposalClient for RecordingClient {
    async fn submit_sections(&self, document: DocumentRef, payload: Value) -> Result<(), ClientError> {
        self.calls.lock().push((document, payload));
        match self.failure.lock().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
