//! CMS CLI - offline driver for revision sessions
//!
//! Backs the `cms` binary:
//! - `normalize`: print the normalized state of a server document
//! - `revise`: replay an edit script and print the submission payload
//! - `sections`: print a document's section registry

#![warn(unreachable_pub)]

use anyhow::{bail, Context, Result};
use cms_revision::{
    CourseSyllabus, Document, DocumentEdit, EdgeKind, EngineConfig, ProgramProposal,
    ProposalEdit, RevisionEngine, SectionKey, SyllabusEdit,
};
use cms_store::{FileStore, SessionStore};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::fmt::Write as _;
use std::str::FromStr;

/// Document types the CLI can load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Program proposal
    Proposal,
    /// Course syllabus
    Syllabus,
}

impl DocumentKind {
    /// Names accepted on the command line
    pub const NAMES: [&'static str; 2] = ["proposal", "syllabus"];
}

impl FromStr for DocumentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "proposal" => Ok(Self::Proposal),
            "syllabus" => Ok(Self::Syllabus),
            other => bail!("unknown document type {other:?} (expected proposal or syllabus)"),
        }
    }
}

/// Options for `revise`
#[derive(Debug, Default)]
pub struct ReviseOptions {
    /// Directory for persisted sessions; none disables persistence
    pub session_dir: Option<std::path::PathBuf>,
    /// Continue from the persisted session instead of the bare snapshot
    pub resume: bool,
    /// Wizard step recorded with the saved session
    pub step: u32,
}

/// Normalized state of a server document, as JSON
///
/// # Errors
/// Returns error if `source` is not a valid document of `kind`
pub fn normalize(kind: DocumentKind, source: &str) -> Result<Value> {
    match kind {
        DocumentKind::Proposal => normalize_as::<ProgramProposal>(source),
        DocumentKind::Syllabus => normalize_as::<CourseSyllabus>(source),
    }
}

fn normalize_as<D>(source: &str) -> Result<Value>
where
    D: Document,
    D::Source: DeserializeOwned,
{
    let source: D::Source =
        serde_json::from_str(source).with_context(|| format!("parsing {}", D::DOCUMENT_TYPE))?;
    Ok(serde_json::to_value(D::transform(&source))?)
}

/// Apply a JSON array of edits to a document and return the submission payload
///
/// # Errors
/// Returns error if either input cannot be parsed, an edit is rejected, or
/// the session cannot be persisted
pub fn revise(
    kind: DocumentKind,
    source: &str,
    edits: &str,
    config: &EngineConfig,
    options: &ReviseOptions,
) -> Result<Value> {
    match kind {
        DocumentKind::Proposal => {
            revise_as::<ProgramProposal, ProposalEdit>(source, edits, config, options)
        }
        DocumentKind::Syllabus => {
            revise_as::<CourseSyllabus, SyllabusEdit>(source, edits, config, options)
        }
    }
}

fn revise_as<D, E>(
    source: &str,
    edits: &str,
    config: &EngineConfig,
    options: &ReviseOptions,
) -> Result<Value>
where
    D: Document,
    D::Source: DeserializeOwned,
    E: DocumentEdit<Target = D>,
{
    let source: D::Source =
        serde_json::from_str(source).with_context(|| format!("parsing {}", D::DOCUMENT_TYPE))?;
    let edits: Vec<E> = serde_json::from_str(edits).context("parsing edit script")?;

    let sessions = match &options.session_dir {
        Some(dir) => Some(SessionStore::with_config(FileStore::open(dir)?, config.clone())),
        None => None,
    };

    let resumed = match (&sessions, options.resume) {
        (Some(sessions), true) => sessions.resume::<D>(source.clone())?,
        _ => None,
    };
    let mut engine = match resumed {
        Some((engine, step)) => {
            tracing::info!("Resuming {} at step {}", D::DOCUMENT_TYPE, step);
            engine
        }
        None => RevisionEngine::<D>::with_config(source, config.clone()),
    };

    let applied = engine
        .apply_edits(&edits)
        .context("edit script rejected")?;
    tracing::info!(
        "Applied {} edit(s), {} section(s) modified",
        applied,
        engine.modified_sections().len()
    );

    if let Some(sessions) = &sessions {
        sessions.save(&engine, options.step)?;
    }

    Ok(engine.build_submission_payload()?.to_json())
}

/// Registry edges and reset groups of a document type, as JSON
#[must_use]
pub fn sections(kind: DocumentKind) -> Value {
    match kind {
        DocumentKind::Proposal => sections_as::<ProgramProposal>(),
        DocumentKind::Syllabus => sections_as::<CourseSyllabus>(),
    }
}

fn sections_as<D: Document>() -> Value {
    let registry = D::registry();
    let edges: Vec<Value> = registry
        .edges()
        .iter()
        .map(|edge| {
            json!({
                "parent": edge.parent.as_str(),
                "dependent": edge.dependent.as_str(),
                "kind": match edge.kind {
                    EdgeKind::Owned => "owned",
                    EdgeKind::Reference => "reference",
                },
            })
        })
        .collect();
    let reset_groups: serde_json::Map<String, Value> = D::Section::ALL
        .iter()
        .map(|section| {
            let group: Vec<&str> = registry
                .reset_group(*section)
                .into_iter()
                .map(SectionKey::as_str)
                .collect();
            (section.as_str().to_string(), json!(group))
        })
        .collect();

    json!({
        "document_type": D::DOCUMENT_TYPE,
        "sections": D::Section::ALL.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
        "edges": edges,
        "reset_groups": reset_groups,
    })
}

/// Plain-text rendering of [`sections`]
#[must_use]
pub fn sections_text(kind: DocumentKind) -> String {
    let value = sections(kind);
    let mut out = String::new();
    let _ = writeln!(out, "{}", value["document_type"].as_str().unwrap_or_default());
    if let Some(edges) = value["edges"].as_array() {
        for edge in edges {
            let _ = writeln!(
                out,
                "  {} -> {} ({})",
                edge["parent"].as_str().unwrap_or_default(),
                edge["dependent"].as_str().unwrap_or_default(),
                edge["kind"].as_str().unwrap_or_default()
            );
        }
    }
    out
}
