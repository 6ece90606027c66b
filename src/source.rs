//! Detection source discovery.
//!
//! Walks a rules directory for `.yaml` detection documents and pulls out
//! the `query` text each one carries. Unreadable or malformed documents and
//! documents without a usable query or name are skipped with a diagnostic;
//! only a missing rules directory is fatal.

use crate::error::{KqlError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// One detection supplied to the engine: a name and its query text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionSource {
    /// Detection identifier (the rule's file name).
    pub name: String,
    /// The detection's KQL query text.
    pub query: String,
}

/// The subset of a Sentinel rule document the loader reads. Unknown keys
/// are ignored.
#[derive(Debug, Deserialize)]
struct RuleDocument {
    #[serde(default)]
    name: String,
    #[serde(default)]
    query: String,
}

/// Recursively collect detection sources from a rules directory.
///
/// # Errors
/// Returns [`KqlError::SourceDirNotFound`] when the directory does not
/// exist; per-file failures are logged and skipped, never surfaced as
/// partial success.
pub fn load_rules_dir(dir: &Path) -> Result<Vec<DetectionSource>> {
    if !dir.is_dir() {
        return Err(KqlError::SourceDirNotFound(dir.display().to_string()));
    }

    let mut sources = Vec::new();
    for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if !path.is_file() || path.extension().map_or(true, |ext| ext != "yaml") {
            continue;
        }

        debug!(path = %path.display(), "processing rule file");
        match load_rule_file(path) {
            Ok(source) => sources.push(source),
            Err(err) => warn!(path = %path.display(), %err, "skipping rule"),
        }
    }

    Ok(sources)
}

/// Load one rule document.
fn load_rule_file(path: &Path) -> Result<DetectionSource> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let raw = fs::read_to_string(path)?;
    let document: RuleDocument = serde_yaml::from_str(&raw)?;

    if document.query.trim().is_empty() {
        return Err(KqlError::MissingQuery(file_name));
    }
    if document.name.trim().is_empty() {
        return Err(KqlError::MissingName(file_name));
    }

    Ok(DetectionSource {
        name: file_name,
        query: document.query,
    })
}
