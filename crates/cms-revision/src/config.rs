//! Engine configuration
//!
//! Loaded from TOML by the CLI, or built in code with the `with_*` methods.

use crate::error::RevisionError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Revision engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Prefix for persisted session keys
    pub storage_key_prefix: String,
    /// Upper bound on one submission round trip
    pub submission_timeout_secs: u64,
    /// Skip persisting engines with no outstanding edits
    pub persist_dirty_only: bool,
}

impl EngineConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With storage key prefix
    #[inline]
    #[must_use]
    pub fn with_storage_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.storage_key_prefix = prefix.into();
        self
    }

    /// With submission timeout
    #[inline]
    #[must_use]
    pub fn with_submission_timeout_secs(mut self, secs: u64) -> Self {
        self.submission_timeout_secs = secs;
        self
    }

    /// With dirty-only persistence
    #[inline]
    #[must_use]
    pub fn with_persist_dirty_only(mut self, enabled: bool) -> Self {
        self.persist_dirty_only = enabled;
        self
    }

    /// Submission timeout as a duration
    #[inline]
    #[must_use]
    pub fn submission_timeout(&self) -> Duration {
        Duration::from_secs(self.submission_timeout_secs)
    }

    /// Check field constraints
    ///
    /// # Errors
    /// Returns error for an empty key prefix or a zero timeout
    pub fn validate(&self) -> Result<(), RevisionError> {
        if self.storage_key_prefix.trim().is_empty() {
            return Err(RevisionError::Config(
                "storage_key_prefix must not be empty".to_string(),
            ));
        }
        if self.submission_timeout_secs == 0 {
            return Err(RevisionError::Config(
                "submission_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate TOML text; missing keys take defaults
    ///
    /// # Errors
    /// Returns error if the text is not valid TOML or fails [`EngineConfig::validate`]
    pub fn from_toml_str(text: &str) -> Result<Self, RevisionError> {
        let config: Self =
            toml::from_str(text).map_err(|e| RevisionError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RevisionError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| RevisionError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            storage_key_prefix: "cms.revision".to_string(),
            submission_timeout_secs: 30,
            persist_dirty_only: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = EngineConfig::new();
        assert_eq!(config.storage_key_prefix, "cms.revision");
        assert_eq!(config.submission_timeout(), Duration::from_secs(30));
        assert!(!config.persist_dirty_only);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml_str("submission_timeout_secs = 5\n").unwrap();
        assert_eq!(config.submission_timeout_secs, 5);
        assert_eq!(config.storage_key_prefix, "cms.revision");
    }

    #[test]
    fn zero_timeout_rejected() {
        let err = EngineConfig::from_toml_str("submission_timeout_secs = 0").unwrap_err();
        assert!(matches!(err, RevisionError::Config(_)));
    }

    #[test]
    fn builders_chain() {
        let config = EngineConfig::new()
            .with_storage_key_prefix("wizard")
            .with_submission_timeout_secs(10)
            .with_persist_dirty_only(true);
        assert_eq!(config.storage_key_prefix, "wizard");
        assert_eq!(config.submission_timeout_secs, 10);
        assert!(config.persist_dirty_only);
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cms.toml");
        std::fs::write(&path, "storage_key_prefix = \"tests\"\npersist_dirty_only = true\n").unwrap();
        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.storage_key_prefix, "tests");
        assert!(config.persist_dirty_only);
    }
}
