//! Persisted revision sessions
//!
//! A session is everything needed to resume editing after a restart: the
//! locally edited state, the dirty sections, and the wizard step. The dirty
//! set is written as an ordered list and revived into a [`DirtySet`] on load.

use crate::error::{StoreError, StoreResult};
use crate::kv::KeyValueStore;
use chrono::{DateTime, Utc};
use cms_revision::{DirtySet, Document, EngineConfig, RevisionEngine, SectionKey};
use serde::{Deserialize, Serialize};

/// Current on-disk session format
pub const SESSION_VERSION: u32 = 1;

/// Serialized form of one revision session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSession<S, T> {
    /// Format version
    pub version: u32,
    /// Document type the state belongs to
    pub document_type: String,
    /// Document id
    pub document_id: u64,
    /// Locally edited state
    pub state: T,
    /// Dirty sections, in declaration order
    pub modified_sections: Vec<S>,
    /// Wizard step the user was on
    pub step: u32,
    /// When the session was written
    pub saved_at: DateTime<Utc>,
}

impl<S: SectionKey, T> PersistedSession<S, T> {
    /// Revive the dirty list into a set
    #[must_use]
    pub fn dirty_set(&self) -> DirtySet<S> {
        DirtySet::from_list(self.modified_sections.iter().copied())
    }
}

/// Version and type fields, read before decoding the full session
#[derive(Deserialize)]
struct SessionHeader {
    version: u32,
    document_type: String,
}

/// Saves and resumes revision engines through a [`KeyValueStore`]
#[derive(Debug)]
pub struct SessionStore<K> {
    store: K,
    config: EngineConfig,
}

impl<K: KeyValueStore> SessionStore<K> {
    /// Create with default configuration
    #[must_use]
    pub fn new(store: K) -> Self {
        Self::with_config(store, EngineConfig::default())
    }

    /// Create with configuration
    ///
    /// `storage_key_prefix` namespaces keys; `persist_dirty_only` skips
    /// saving engines without edits.
    #[must_use]
    pub fn with_config(store: K, config: EngineConfig) -> Self {
        Self { store, config }
    }

    /// Underlying store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &K {
        &self.store
    }

    /// Configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Storage key for a document
    #[must_use]
    pub fn key<D: Document>(&self, document_id: u64) -> String {
        format!(
            "{}:{}:{}",
            self.config.storage_key_prefix,
            D::DOCUMENT_TYPE,
            document_id
        )
    }

    /// Persist an engine's state, dirty sections and wizard step
    ///
    /// Returns false when skipped because `persist_dirty_only` is set and
    /// the engine has no edits; any earlier session for the document is
    /// removed so it cannot be resumed with stale dirty sections.
    ///
    /// # Errors
    /// Returns error if the session cannot be serialized or written
    pub fn save<D: Document>(&self, engine: &RevisionEngine<D>, step: u32) -> StoreResult<bool> {
        let key = self.key::<D>(engine.document_id());
        if self.config.persist_dirty_only && !engine.has_changes() {
            if self.store.remove(&key)? {
                tracing::info!("Removed session {} after its edits were committed", key);
            } else {
                tracing::debug!("Skipping save of clean session {}", key);
            }
            return Ok(false);
        }

        let session = PersistedSession {
            version: SESSION_VERSION,
            document_type: D::DOCUMENT_TYPE.to_string(),
            document_id: engine.document_id(),
            state: engine.state().clone(),
            modified_sections: engine.modified_sections(),
            step,
            saved_at: Utc::now(),
        };
        self.store.set(&key, serde_json::to_string(&session)?)?;
        tracing::info!(
            "Saved session {} ({} modified section(s), step {})",
            key,
            session.modified_sections.len(),
            step
        );
        Ok(true)
    }

    /// Read a persisted session
    ///
    /// # Errors
    /// Returns [`StoreError::Incompatible`] for another document type or
    /// format version, or a read/decode error
    pub fn load<D: Document>(
        &self,
        document_id: u64,
    ) -> StoreResult<Option<PersistedSession<D::Section, D::State>>> {
        let key = self.key::<D>(document_id);
        let Some(text) = self.store.get(&key)? else {
            return Ok(None);
        };

        let header: SessionHeader = serde_json::from_str(&text)?;
        if header.version != SESSION_VERSION {
            return Err(StoreError::Incompatible {
                key,
                reason: format!(
                    "version {} (expected {})",
                    header.version, SESSION_VERSION
                ),
            });
        }
        if header.document_type != D::DOCUMENT_TYPE {
            return Err(StoreError::Incompatible {
                key,
                reason: format!(
                    "document type {} (expected {})",
                    header.document_type,
                    D::DOCUMENT_TYPE
                ),
            });
        }

        let session: PersistedSession<D::Section, D::State> = serde_json::from_str(&text)?;
        tracing::debug!("Loaded session {} saved at {}", key, session.saved_at);
        Ok(Some(session))
    }

    /// Rebuild an engine for `source` from its persisted session
    ///
    /// Returns the engine and the saved wizard step, or `None` when no
    /// session exists for the document.
    ///
    /// # Errors
    /// Same as [`SessionStore::load`]
    pub fn resume<D: Document>(
        &self,
        source: D::Source,
    ) -> StoreResult<Option<(RevisionEngine<D>, u32)>> {
        let Some(session) = self.load::<D>(D::document_id(&source))? else {
            return Ok(None);
        };
        let dirty = session.dirty_set();
        let engine = RevisionEngine::restore(source, session.state, dirty, self.config.clone());
        Ok(Some((engine, session.step)))
    }

    /// Delete the persisted session; returns true if one existed
    ///
    /// # Errors
    /// Returns error if the store cannot be written
    pub fn clear<D: Document>(&self, document_id: u64) -> StoreResult<bool> {
        let key = self.key::<D>(document_id);
        let removed = self.store.remove(&key)?;
        if removed {
            tracing::info!("Cleared session {}", key);
        }
        Ok(removed)
    }
}
