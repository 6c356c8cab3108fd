//! Submission packaging and commit
//!
//! The payload maps each dirty section to its whole current value (not a
//! patch). [`Submitter`] sends it through an injected [`ProposalClient`] and
//! reports back to the engine; the engine's in-flight guard keeps two
//! submissions for the same document from overlapping.

use crate::document::Document;
use crate::engine::RevisionEngine;
use crate::error::{ClientError, RevisionError};
use crate::section::SectionKey;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::Arc;

/// Type and id of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DocumentRef {
    /// Document type identifier
    pub document_type: &'static str,
    /// Server id
    pub id: u64,
}

impl DocumentRef {
    /// Create reference
    #[inline]
    #[must_use]
    pub const fn new(document_type: &'static str, id: u64) -> Self {
        Self { document_type, id }
    }
}

impl Display for DocumentRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.document_type, self.id)
    }
}

/// Dirty section → current whole-section value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SubmissionPayload<S: SectionKey> {
    sections: BTreeMap<S, Value>,
}

impl<S: SectionKey> SubmissionPayload<S> {
    #[inline]
    pub(crate) fn new() -> Self {
        Self {
            sections: BTreeMap::new(),
        }
    }

    #[inline]
    pub(crate) fn insert(&mut self, section: S, value: Value) {
        self.sections.insert(section, value);
    }

    /// Nothing to submit
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Number of sections
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Value of one section, if included
    #[inline]
    #[must_use]
    pub fn get(&self, section: S) -> Option<&Value> {
        self.sections.get(&section)
    }

    /// Whether `section` is included
    #[inline]
    #[must_use]
    pub fn contains(&self, section: S) -> bool {
        self.sections.contains_key(&section)
    }

    /// Included sections in declaration order
    pub fn sections(&self) -> impl Iterator<Item = S> + '_ {
        self.sections.keys().copied()
    }

    /// (section, value) pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (S, &Value)> + '_ {
        self.sections.iter().map(|(s, v)| (*s, v))
    }

    /// JSON object keyed by section wire name
    #[must_use]
    pub fn to_json(&self) -> Value {
        let object: Map<String, Value> = self
            .sections
            .iter()
            .map(|(s, v)| (s.as_str().to_string(), v.clone()))
            .collect();
        Value::Object(object)
    }
}

/// Payload packaged by [`RevisionEngine::begin_submission`]
#[derive(Debug, Clone)]
pub struct PendingSubmission<S: SectionKey> {
    document: DocumentRef,
    payload: SubmissionPayload<S>,
}

impl<S: SectionKey> PendingSubmission<S> {
    #[inline]
    pub(crate) fn new(document: DocumentRef, payload: SubmissionPayload<S>) -> Self {
        Self { document, payload }
    }

    /// Target document
    #[inline]
    #[must_use]
    pub fn document(&self) -> DocumentRef {
        self.document
    }

    /// Packaged sections
    #[inline]
    #[must_use]
    pub fn payload(&self) -> &SubmissionPayload<S> {
        &self.payload
    }
}

/// Result of [`Submitter::submit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome<S> {
    /// No section was dirty; no request was sent
    NothingToSubmit,

    /// Server accepted the payload
    Submitted {
        /// Sections that were sent
        sections: Vec<S>,
        /// Sections that became clean
        cleared: Vec<S>,
    },
}

impl<S> SubmitOutcome<S> {
    /// Whether a request was sent
    #[inline]
    #[must_use]
    pub fn was_sent(&self) -> bool {
        matches!(self, Self::Submitted { .. })
    }
}

/// Backend boundary for partial updates
///
/// Method and path are the implementation's concern.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProposalClient: Send + Sync {
    /// Send a section-keyed partial update
    async fn submit_sections(&self, document: DocumentRef, payload: Value)
        -> Result<(), ClientError>;
}

#[async_trait]
impl<C: ProposalClient + ?Sized> ProposalClient for Arc<C> {
    async fn submit_sections(
        &self,
        document: DocumentRef,
        payload: Value,
    ) -> Result<(), ClientError> {
        (**self).submit_sections(document, payload).await
    }
}

/// Engine shared between UI callbacks and a submitter
pub type SharedEngine<D> = Arc<Mutex<RevisionEngine<D>>>;

/// Wrap an engine for sharing
#[inline]
#[must_use]
pub fn shared<D: Document>(engine: RevisionEngine<D>) -> SharedEngine<D> {
    Arc::new(Mutex::new(engine))
}

/// Commits dirty sections of a shared engine through a client
pub struct Submitter<D: Document, C> {
    engine: SharedEngine<D>,
    client: C,
}

impl<D: Document, C: ProposalClient> Submitter<D, C> {
    /// Create submitter
    #[inline]
    #[must_use]
    pub fn new(engine: SharedEngine<D>, client: C) -> Self {
        Self { engine, client }
    }

    /// Shared engine
    #[inline]
    #[must_use]
    pub fn engine(&self) -> &SharedEngine<D> {
        &self.engine
    }

    /// Client
    #[inline]
    #[must_use]
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Submit every dirty section
    ///
    /// The engine lock is released while the request is in flight; the
    /// engine's guard rejects a concurrent call instead. Dropping the future
    /// before it resolves lowers the guard and keeps every dirty flag. A request that
    /// exceeds `submission_timeout_secs` fails with [`ClientError::Timeout`].
    ///
    /// # Errors
    /// - [`RevisionError::SubmissionInFlight`] if another submission is unresolved
    /// - [`RevisionError::Submission`] if the client fails; dirty flags are kept
    pub async fn submit(&self) -> Result<SubmitOutcome<D::Section>, RevisionError> {
        let (pending, timeout) = {
            let mut engine = self.engine.lock();
            let timeout = engine.config().submission_timeout();
            match engine.begin_submission()? {
                Some(pending) => (pending, timeout),
                None => return Ok(SubmitOutcome::NothingToSubmit),
            }
        };

        let mut guard = InFlightGuard {
            engine: &self.engine,
            armed: true,
        };
        let body = pending.payload().to_json();
        let sections: Vec<D::Section> = pending.payload().sections().collect();

        let result = match tokio::time::timeout(
            timeout,
            self.client.submit_sections(pending.document(), body),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(ClientError::Timeout(timeout.as_secs())),
        };

        guard.armed = false;
        let cleared = self.engine.lock().finish_submission(pending, &result);
        result?;
        Ok(SubmitOutcome::Submitted { sections, cleared })
    }
}

/// Lowers the engine's in-flight guard if `submit` is dropped mid-request
struct InFlightGuard<'a, D: Document> {
    engine: &'a SharedEngine<D>,
    armed: bool,
}

impl<D: Document> Drop for InFlightGuard<'_, D> {
    fn drop(&mut self) {
        if self.armed {
            self.engine.lock().abort_submission();
        }
    }
}

impl<D: Document, C> Debug for Submitter<D, C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Submitter")
            .field("document_type", &D::DOCUMENT_TYPE)
            .finish_non_exhaustive()
    }
}
