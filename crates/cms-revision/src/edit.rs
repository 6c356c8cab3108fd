//! Scripted edits
//!
//! Each document has a serde-tagged edit enum so an edit log can be replayed
//! from JSON (`{"op": "add_peo", "statement": "..."}`).

use crate::document::Document;
use crate::engine::RevisionEngine;
use crate::error::RevisionError;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

/// One replayable mutator call
pub trait DocumentEdit: Debug + DeserializeOwned {
    /// Document the edit applies to
    type Target: Document;

    /// Dispatch to the matching mutator
    ///
    /// # Errors
    /// Returns the mutator's validation error; state is unchanged in that case
    fn apply(&self, engine: &mut RevisionEngine<Self::Target>) -> Result<(), RevisionError>;
}

impl<D: Document> RevisionEngine<D> {
    /// Apply edits in order, stopping at the first rejection
    ///
    /// Edits before the rejected one stay applied. Returns the number applied.
    ///
    /// # Errors
    /// Returns the first rejected edit's error
    pub fn apply_edits<'a, E>(
        &mut self,
        edits: impl IntoIterator<Item = &'a E>,
    ) -> Result<usize, RevisionError>
    where
        E: DocumentEdit<Target = D> + 'a,
    {
        let mut applied = 0;
        for edit in edits {
            tracing::debug!("Applying {:?}", edit);
            edit.apply(self)?;
            applied += 1;
        }
        Ok(applied)
    }
}
