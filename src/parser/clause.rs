//! Clause-kind recognition for single query lines.

use serde::Serialize;
use std::fmt;

const RENAME_PREFIX: &str = "| extend ";
const AGGREGATE_PREFIX: &str = "| summarize ";
const SELECT_PREFIX: &str = "| project ";
const SELECT_EXCLUSION: &str = "project-away";

/// The three clause kinds the engine inspects for field names.
///
/// Serialized with the record labels the downstream reports expect:
/// `EXTEND`, `SUMMARY`, and `PROJECT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseKind {
    /// Field-rename clause (`| extend`): introduces or renames fields.
    Rename,
    /// Aggregate clause (`| summarize`): aliased aggregations, optionally
    /// grouped by a trailing `by` list of bare field names.
    Aggregate,
    /// Field-select clause (`| project`): aliased or bare field selection.
    Select,
}

impl ClauseKind {
    /// Label used in serialized field records.
    pub fn record_label(self) -> &'static str {
        match self {
            ClauseKind::Rename => "EXTEND",
            ClauseKind::Aggregate => "SUMMARY",
            ClauseKind::Select => "PROJECT",
        }
    }
}

impl fmt::Display for ClauseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.record_label())
    }
}

impl Serialize for ClauseKind {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.record_label())
    }
}

/// Inspect one query line and extract its clause body if it is one of the
/// three recognized clause kinds.
///
/// Matching runs on a lower-cased, trimmed copy of the line; the returned
/// body comes from that copy, so extracted field text is lower-cased. Lines
/// not beginning with the clause-pipe marker, and every other clause kind
/// (`where`, `join`, ...), yield `None`.
///
/// A select clause directly followed by a hyphenated suffix (the
/// `project-away` remove-fields variant) is excluded; matching on the
/// prefix alone would misfire.
///
/// # Examples
///
/// ```rust
/// use kql_field_engine::parser::{classify_line, ClauseKind};
///
/// let clause = classify_line("| extend Account = tostring(Identity)");
/// assert_eq!(
///     clause,
///     Some((ClauseKind::Rename, "account = tostring(identity)".to_string()))
/// );
///
/// assert_eq!(classify_line("| where EventID == 4624"), None);
/// assert_eq!(classify_line("SecurityEvent"), None);
/// ```
pub fn classify_line(line: &str) -> Option<(ClauseKind, String)> {
    let lowered = line.trim().to_lowercase();

    if !lowered.starts_with('|') {
        return None;
    }

    if let Some(body) = lowered.strip_prefix(RENAME_PREFIX) {
        return Some((ClauseKind::Rename, body.trim().to_string()));
    }

    if let Some(body) = lowered.strip_prefix(AGGREGATE_PREFIX) {
        return Some((ClauseKind::Aggregate, body.trim().to_string()));
    }

    if lowered.starts_with(SELECT_PREFIX) && !lowered.contains(SELECT_EXCLUSION) {
        let body = &lowered[SELECT_PREFIX.len()..];
        return Some((ClauseKind::Select, body.trim().to_string()));
    }

    None
}
