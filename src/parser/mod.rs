//! KQL clause recognition and field-token parsing.
//!
//! This module handles the line-level heuristics that drive field mining:
//! - [`clause`] - recognition of the three inspected clause kinds
//! - [`splitter`] - paren-aware splitting of clause bodies
//! - [`validator`] - character-class validation of candidate field tokens
//!
//! These are deliberately not a grammar-correct KQL parser. The engine only
//! inspects field-rename (`extend`), aggregate (`summarize`), and
//! field-select (`project`) clauses; filters, joins, and every other clause
//! kind are skipped by design.

pub mod clause;
pub mod splitter;
pub mod validator;

pub use clause::{classify_line, ClauseKind};
pub use splitter::split_expressions;
pub use validator::FieldValidator;
