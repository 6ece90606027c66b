//! Field records produced by extraction.

use crate::classifier::Domain;
use crate::parser::ClauseKind;
use serde::Serialize;

/// A validated field occurrence, classified into a semantic domain.
///
/// `field` always satisfies the validator's acceptance predicate, and
/// `domain` is [`Domain::Unknown`] only when no configured keyword matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedField {
    /// Clause kind the field was found in.
    #[serde(rename = "type")]
    pub clause: ClauseKind,
    /// The original query line, casing preserved.
    pub line: String,
    /// Detection the field belongs to.
    pub detection: String,
    /// The validated field token (lower-cased, as matched).
    pub field: String,
    /// Assigned semantic domain.
    #[serde(rename = "classification")]
    pub domain: Domain,
}

/// A candidate token that failed validation; never classified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedField {
    /// Clause kind the token was found in.
    #[serde(rename = "type")]
    pub clause: ClauseKind,
    /// The original query line, casing preserved.
    pub line: String,
    /// Detection the token belongs to.
    pub detection: String,
    /// The raw, unvalidated token text.
    pub field: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classified_field_serialization() {
        let record = ClassifiedField {
            clause: ClauseKind::Rename,
            line: "| extend Account = tostring(Identity)".to_string(),
            detection: "rule.yaml".to_string(),
            field: "account".to_string(),
            domain: Domain::User,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "EXTEND");
        assert_eq!(json["line"], "| extend Account = tostring(Identity)");
        assert_eq!(json["detection"], "rule.yaml");
        assert_eq!(json["field"], "account");
        assert_eq!(json["classification"], "user");
    }

    #[test]
    fn test_rejected_field_serialization() {
        let record = RejectedField {
            clause: ClauseKind::Select,
            line: "| project ['odd name']".to_string(),
            detection: "rule.yaml".to_string(),
            field: "['odd name']".to_string(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "PROJECT");
        assert_eq!(json["field"], "['odd name']");
        assert!(json.get("classification").is_none());
    }
}
