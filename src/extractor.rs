//! Per-detection field extraction.
//!
//! Drives the clause recognizer, expression splitter, field validator, and
//! domain classifier over one detection's full query text, producing the
//! classified and rejected field records for that detection.

use crate::classifier::DomainClassifier;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::parser::{classify_line, split_expressions, ClauseKind, FieldValidator};
use crate::records::{ClassifiedField, RejectedField};
use std::collections::HashSet;

/// Separator between the aggregation side and the group-by side of an
/// aggregate clause body.
const GROUP_BY_SEPARATOR: &str = " by ";

/// The field records extracted from one detection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionOutput {
    pub classified: Vec<ClassifiedField>,
    pub rejected: Vec<RejectedField>,
}

/// Extracts field records from one detection's query text.
///
/// Candidate tokens are taken asymmetrically by clause kind:
/// - rename clauses and the pre-`by` side of aggregate clauses only yield
///   the alias left of the first `=`; the right-hand expression is
///   discarded, so only newly introduced or renamed fields are captured.
///   Expressions without `=` yield nothing at all.
/// - the post-`by` side of an aggregate clause is a plain comma-separated
///   list of bare grouping names; no alias parsing applies there.
/// - select clauses take the alias when present, the bare expression
///   otherwise.
///
/// Every candidate passes through the validator; accepted tokens are
/// classified and emitted as [`ClassifiedField`], the rest as
/// [`RejectedField`] carrying the raw text. With deduplication enabled, a
/// second accepted occurrence of the same (detection, clause, field) triple
/// within one detection is discarded; rejected tokens are never deduped.
///
/// # Examples
///
/// ```rust
/// use kql_field_engine::{EngineConfig, FieldExtractor};
///
/// let extractor = FieldExtractor::new(&EngineConfig::default())?;
/// let output = extractor.extract(
///     "rule.yaml",
///     "SecurityEvent\n| summarize Logins = count() by Account, Computer",
/// );
///
/// let fields: Vec<&str> = output.classified.iter().map(|f| f.field.as_str()).collect();
/// assert_eq!(fields, vec!["logins", "account", "computer"]);
/// assert!(output.rejected.is_empty());
/// # Ok::<(), kql_field_engine::KqlError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    validator: FieldValidator,
    classifier: DomainClassifier,
    dedup_fields: bool,
}

impl FieldExtractor {
    /// Build an extractor from an engine configuration.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        Ok(Self {
            validator: FieldValidator::new()?,
            classifier: DomainClassifier::new(config.domain_table.clone())?,
            dedup_fields: config.dedup_fields,
        })
    }

    /// The classifier this extractor emits domains from.
    pub fn classifier(&self) -> &DomainClassifier {
        &self.classifier
    }

    /// Run a full pass over one detection's query text.
    pub fn extract(&self, detection: &str, query: &str) -> ExtractionOutput {
        let mut pass = ExtractionPass {
            extractor: self,
            detection,
            output: ExtractionOutput::default(),
            seen: HashSet::new(),
        };

        for line in query.lines() {
            let Some((kind, body)) = classify_line(line) else {
                continue;
            };

            match kind {
                ClauseKind::Rename => pass.take_aliased(&body, kind, line),
                ClauseKind::Aggregate => {
                    let mut sides = body.split(GROUP_BY_SEPARATOR);
                    let aggregations = sides.next().unwrap_or("").trim();
                    let group_by = sides.next().unwrap_or("").trim();

                    pass.take_aliased(aggregations, kind, line);
                    if !group_by.is_empty() {
                        for column in group_by.split(',') {
                            pass.take_candidate(column.trim(), kind, line);
                        }
                    }
                }
                ClauseKind::Select => {
                    for expr in split_expressions(&body) {
                        let candidate = match expr.split_once('=') {
                            Some((alias, _)) => alias.trim(),
                            None => expr.trim(),
                        };
                        pass.take_candidate(candidate, kind, line);
                    }
                }
            }
        }

        pass.output
    }
}

/// State for one extraction pass over a single detection.
struct ExtractionPass<'a> {
    extractor: &'a FieldExtractor,
    detection: &'a str,
    output: ExtractionOutput,
    seen: HashSet<(ClauseKind, String)>,
}

impl ExtractionPass<'_> {
    /// Take the alias of every `alias = expression` in a clause body,
    /// discarding the right-hand side and skipping alias-less expressions.
    fn take_aliased(&mut self, body: &str, kind: ClauseKind, line: &str) {
        for expr in split_expressions(body) {
            if let Some((alias, _)) = expr.split_once('=') {
                self.take_candidate(alias.trim(), kind, line);
            }
        }
    }

    /// Validate one candidate token and emit the matching record.
    fn take_candidate(&mut self, candidate: &str, kind: ClauseKind, line: &str) {
        if !self.extractor.validator.is_valid(candidate) {
            self.output.rejected.push(RejectedField {
                clause: kind,
                line: line.to_string(),
                detection: self.detection.to_string(),
                field: candidate.to_string(),
            });
            return;
        }

        if self.extractor.dedup_fields {
            let key = (kind, candidate.to_string());
            if !self.seen.insert(key) {
                return;
            }
        }

        let domain = self.extractor.classifier.classify(candidate);
        self.output.classified.push(ClassifiedField {
            clause: kind,
            line: line.to_string(),
            detection: self.detection.to_string(),
            field: candidate.to_string(),
            domain,
        });
    }
}
