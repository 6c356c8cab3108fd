//! CMS Store - session persistence
//!
//! Saves revision engines so editing can resume after a restart:
//! - `KeyValueStore` abstraction with in-memory and directory-backed stores
//! - Versioned session records keyed by document type and id
//! - Explicit list ⇄ set conversion for the dirty sections
//!
//! # Example
//!
//! ```rust,ignore
//! use cms_revision::ProgramProposal;
//! use cms_store::{FileStore, SessionStore};
//!
//! let sessions = SessionStore::new(FileStore::open(".cms/sessions")?);
//! sessions.save(&engine, 2)?;
//! let (engine, step) = sessions.resume::<ProgramProposal>(snapshot)?.unwrap();
//! ```

#![warn(unreachable_pub)]

// Core modules
pub mod error;
pub mod kv;
pub mod session;

// Re-exports for convenience
pub use error::{StoreError, StoreResult};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use session::{PersistedSession, SessionStore, SESSION_VERSION};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
