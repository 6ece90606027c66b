//! Character-class validation of candidate field tokens.

use crate::error::{KqlError, Result};
use regex::Regex;

/// The accepted field-name character class: ASCII letters, digits,
/// underscore, and dot. Non-empty.
const FIELD_PATTERN: &str = r"^[a-zA-Z0-9_.]+$";

/// Decides whether a candidate token is a syntactically plausible field
/// identifier.
///
/// This is a heuristic boundary, not a grammar: it accepts some non-fields
/// (e.g. bare numeric literals) and rejects legitimate quoted identifiers.
/// Tokens carrying quotes, operators, parentheses, spaces, or brackets are
/// rejected. The token itself is never transformed.
///
/// # Examples
///
/// ```rust
/// use kql_field_engine::parser::FieldValidator;
///
/// let validator = FieldValidator::new()?;
/// assert!(validator.is_valid("Account_Name.part"));
/// assert!(!validator.is_valid("tostring(Account)"));
/// assert!(!validator.is_valid(""));
/// # Ok::<(), kql_field_engine::KqlError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FieldValidator {
    pattern: Regex,
}

impl FieldValidator {
    /// Compile the validator pattern.
    pub fn new() -> Result<Self> {
        let pattern =
            Regex::new(FIELD_PATTERN).map_err(|e| KqlError::InvalidPattern(e.to_string()))?;
        Ok(Self { pattern })
    }

    /// Accept iff the token consists exclusively of ASCII letters, digits,
    /// underscore, and dot, and is non-empty.
    pub fn is_valid(&self, token: &str) -> bool {
        self.pattern.is_match(token)
    }
}
