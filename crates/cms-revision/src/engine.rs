//! Revision engine
//!
//! One [`RevisionEngine`] per open document. It owns:
//! - the immutable server snapshot captured at initialization
//! - the normalized, locally edited state
//! - the dirty set of sections that diverge from the snapshot
//!
//! Each section moves `Pristine → Dirty` on any mutator that affects it and
//! back to `Pristine` on reset or on a successful submission of that section.

use crate::config::EngineConfig;
use crate::dirty::DirtySet;
use crate::document::Document;
use crate::error::{ClientError, RevisionError};
use crate::section::SectionKey;
use crate::submission::{DocumentRef, PendingSubmission, SubmissionPayload};
use std::sync::Arc;

/// Section-level revision state for one document
#[derive(Debug)]
pub struct RevisionEngine<D: Document> {
    /// Snapshot the engine was initialized from; never mutated
    original: Arc<D::Source>,
    /// Locally edited state
    state: D::State,
    /// Sections with outstanding edits
    dirty: DirtySet<D::Section>,
    /// Configuration
    config: EngineConfig,
    /// A submission has been packaged and not yet resolved
    in_flight: bool,
}

impl<D: Document> RevisionEngine<D> {
    /// Create engine from a server snapshot with default configuration
    #[must_use]
    pub fn initialize(source: D::Source) -> Self {
        Self::with_config(source, EngineConfig::default())
    }

    /// Create engine from a server snapshot
    #[must_use]
    pub fn with_config(source: D::Source, config: EngineConfig) -> Self {
        let state = D::transform(&source);
        tracing::info!(
            "Initialized {} {} revision engine",
            D::DOCUMENT_TYPE,
            D::document_id(&source)
        );
        Self {
            original: Arc::new(source),
            state,
            dirty: DirtySet::new(),
            config,
            in_flight: false,
        }
    }

    /// Rebuild an engine from persisted state
    ///
    /// `state` and `dirty` come from a previous session; `source` must be the
    /// snapshot that session was initialized from, since resets derive from it.
    #[must_use]
    pub fn restore(
        source: D::Source,
        state: D::State,
        dirty: DirtySet<D::Section>,
        config: EngineConfig,
    ) -> Self {
        tracing::info!(
            "Restored {} {} with {} modified section(s)",
            D::DOCUMENT_TYPE,
            D::document_id(&source),
            dirty.len()
        );
        Self {
            original: Arc::new(source),
            state,
            dirty,
            config,
            in_flight: false,
        }
    }

    /// Replace the snapshot (e.g. after reloading from the server)
    ///
    /// Discards all local edits.
    pub fn reinitialize(&mut self, source: D::Source) {
        self.state = D::transform(&source);
        self.original = Arc::new(source);
        self.dirty.clear_all();
        tracing::info!("Reinitialized {} {}", D::DOCUMENT_TYPE, self.document_id());
    }

    /// Current (possibly edited) state
    #[inline]
    #[must_use]
    pub fn state(&self) -> &D::State {
        &self.state
    }

    /// Snapshot the engine was initialized from
    #[inline]
    #[must_use]
    pub fn original(&self) -> &D::Source {
        &self.original
    }

    /// State derived fresh from the original snapshot
    #[inline]
    #[must_use]
    pub fn pristine_state(&self) -> D::State {
        D::transform(&self.original)
    }

    /// Dirty set
    #[inline]
    #[must_use]
    pub fn dirty(&self) -> &DirtySet<D::Section> {
        &self.dirty
    }

    /// Whether `section` has outstanding edits
    #[inline]
    #[must_use]
    pub fn is_modified(&self, section: D::Section) -> bool {
        self.dirty.is_modified(section)
    }

    /// Whether any section has outstanding edits
    #[inline]
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Modified sections in declaration order
    #[inline]
    #[must_use]
    pub fn modified_sections(&self) -> Vec<D::Section> {
        self.dirty.to_list()
    }

    /// Configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Server id of the document
    #[inline]
    #[must_use]
    pub fn document_id(&self) -> u64 {
        D::document_id(&self.original)
    }

    /// Type and id of the document
    #[inline]
    #[must_use]
    pub fn document_ref(&self) -> DocumentRef {
        DocumentRef::new(D::DOCUMENT_TYPE, self.document_id())
    }

    /// Whether a submission is awaiting its result
    #[inline]
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    #[inline]
    pub(crate) fn state_mut(&mut self) -> &mut D::State {
        &mut self.state
    }

    /// Record an edit to `section`
    pub(crate) fn mark(&mut self, section: D::Section) {
        if self.dirty.mark(section) {
            tracing::debug!("{} section {} modified", D::DOCUMENT_TYPE, section);
        }
    }

    /// Purge `removed` from every section the registry lists under `parent`
    ///
    /// A dependent section is marked only when it actually lost or changed
    /// records. Returns the sections that changed.
    pub(crate) fn cascade_removal(
        &mut self,
        parent: D::Section,
        removed: &D::Removal,
    ) -> Vec<D::Section> {
        let mut affected = Vec::new();
        for target in D::registry().cascade_targets(parent) {
            let changed = D::purge(&mut self.state, target, removed);
            if changed > 0 {
                tracing::debug!(
                    "Cascade from {} removed {} record(s) in {} for {:?}",
                    parent,
                    changed,
                    target,
                    removed
                );
                self.mark(target);
                affected.push(target);
            }
        }
        affected
    }

    /// Restore `section` and the sections it owns from the original snapshot
    ///
    /// Always a whole-section replace; there is no field-level undo. Returns
    /// the sections that were reset.
    ///
    /// Restored sections equal their pristine value exactly, so they may
    /// reference entities that were removed from a parent that is not part of
    /// the reset group (e.g. resetting `pos` after removing a PEO brings back
    /// its `po_peo_mappings` rows). Resetting that parent as well restores a
    /// consistent document.
    pub fn reset_section(&mut self, section: D::Section) -> Vec<D::Section> {
        let group = D::registry().reset_group(section);
        let pristine = D::transform(&self.original);
        for target in &group {
            D::restore_section(&mut self.state, &pristine, *target);
            self.dirty.clear(*target);
        }
        tracing::info!(
            "Reset {} section {} ({} section(s) restored)",
            D::DOCUMENT_TYPE,
            section,
            group.len()
        );
        group
    }

    /// Restore every section from the original snapshot
    pub fn reset_all(&mut self) {
        self.state = D::transform(&self.original);
        self.dirty.clear_all();
        tracing::info!("Reset all sections of {} {}", D::DOCUMENT_TYPE, self.document_id());
    }

    /// Current value of one section
    ///
    /// # Errors
    /// Returns error if the section cannot be serialized
    pub fn section_value(&self, section: D::Section) -> Result<serde_json::Value, RevisionError> {
        D::section_value(&self.state, section).map_err(|source| RevisionError::Serialization {
            section: section.as_str(),
            source,
        })
    }

    /// Whole-section values of every dirty section
    ///
    /// An empty payload means there is nothing to submit.
    ///
    /// # Errors
    /// Returns error if a section cannot be serialized
    pub fn build_submission_payload(&self) -> Result<SubmissionPayload<D::Section>, RevisionError> {
        let mut payload = SubmissionPayload::new();
        for section in self.dirty.iter() {
            payload.insert(section, self.section_value(section)?);
        }
        Ok(payload)
    }

    /// Package the dirty sections and raise the in-flight guard
    ///
    /// Returns `None` (and raises no guard) when nothing is dirty. State is
    /// not modified.
    ///
    /// # Errors
    /// Returns [`RevisionError::SubmissionInFlight`] while an earlier
    /// submission is unresolved
    pub fn begin_submission(
        &mut self,
    ) -> Result<Option<PendingSubmission<D::Section>>, RevisionError> {
        if self.in_flight {
            return Err(RevisionError::SubmissionInFlight {
                document_type: D::DOCUMENT_TYPE,
                id: self.document_id(),
            });
        }

        let payload = self.build_submission_payload()?;
        if payload.is_empty() {
            tracing::debug!("Nothing to submit for {} {}", D::DOCUMENT_TYPE, self.document_id());
            return Ok(None);
        }

        self.in_flight = true;
        tracing::info!(
            "Submitting {} section(s) of {} {}",
            payload.len(),
            D::DOCUMENT_TYPE,
            self.document_id()
        );
        Ok(Some(PendingSubmission::new(self.document_ref(), payload)))
    }

    /// Lower the in-flight guard without resolving the submission
    ///
    /// Used when the request is abandoned before an answer arrives. Dirty
    /// flags are untouched, as after a failure. Returns true if a submission
    /// was in flight.
    pub fn abort_submission(&mut self) -> bool {
        let was_in_flight = std::mem::take(&mut self.in_flight);
        if was_in_flight {
            tracing::warn!(
                "Submission of {} {} abandoned, sections stay modified",
                D::DOCUMENT_TYPE,
                self.document_id()
            );
        }
        was_in_flight
    }

    /// Apply the client's answer to a pending submission and lower the guard
    ///
    /// On success, each submitted section whose current value still equals
    /// the submitted value becomes clean; sections edited while the request
    /// was in flight stay dirty. On failure nothing changes. Returns the
    /// sections that became clean.
    pub fn finish_submission(
        &mut self,
        pending: PendingSubmission<D::Section>,
        result: &Result<(), ClientError>,
    ) -> Vec<D::Section> {
        self.in_flight = false;

        if let Err(e) = result {
            tracing::warn!(
                "Submission of {} failed, {} section(s) stay modified: {}",
                pending.document(),
                pending.payload().len(),
                e
            );
            return Vec::new();
        }

        let mut cleared = Vec::new();
        for (section, submitted) in pending.payload().iter() {
            let unchanged = D::section_value(&self.state, section)
                .map(|current| &current == submitted)
                .unwrap_or(false);
            if !unchanged {
                tracing::debug!("{} changed while submission was in flight", section);
                continue;
            }
            if self.dirty.clear(section) {
                cleared.push(section);
            }
        }

        tracing::info!(
            "Submission of {} accepted, {} section(s) committed",
            pending.document(),
            cleared.len()
        );
        cleared
    }
}
