//! Primary field engine interface.
//!
//! `FieldEngine` accumulates classified and rejected field records and
//! detection profiles across a whole source set, then derives the report
//! views. Pipeline stages compose in-process as ordinary values; the only
//! serialization happens at the true external boundary (report emission).

use crate::config::EngineConfig;
use crate::error::Result;
use crate::extractor::FieldExtractor;
use crate::profile::DetectionProfile;
use crate::records::{ClassifiedField, RejectedField};
use crate::report::ClassificationReport;
use crate::source::DetectionSource;
use rayon::prelude::*;

/// Field mining and classification engine over a set of detections.
///
/// Each detection is processed independently; accumulated collections grow
/// monotonically and are only read once the source set is exhausted.
///
/// # Examples
///
/// ```rust
/// use kql_field_engine::FieldEngine;
///
/// let mut engine = FieldEngine::new()?;
/// engine.process(
///     "failed_logins.yaml",
///     "SecurityEvent\n| summarize Attempts = count() by Account, Computer",
/// );
///
/// assert_eq!(engine.profiles().len(), 1);
/// assert_eq!(engine.classified_fields().len(), 3);
///
/// let report = engine.report();
/// assert_eq!(report.grouped.len(), 4);
/// # Ok::<(), kql_field_engine::KqlError>(())
/// ```
pub struct FieldEngine {
    extractor: FieldExtractor,
    parallel: bool,
    classified: Vec<ClassifiedField>,
    rejected: Vec<RejectedField>,
    profiles: Vec<DetectionProfile>,
}

impl FieldEngine {
    /// Create an engine with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine from an explicit configuration.
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        Ok(Self {
            extractor: FieldExtractor::new(&config)?,
            parallel: config.parallel,
            classified: Vec::new(),
            rejected: Vec::new(),
            profiles: Vec::new(),
        })
    }

    /// Process one detection's query text.
    pub fn process(&mut self, detection: &str, query: &str) {
        let output = self.extractor.extract(detection, query);
        self.profiles
            .push(DetectionProfile::from_fields(detection, &output.classified));
        self.classified.extend(output.classified);
        self.rejected.extend(output.rejected);
    }

    /// Process a batch of detection sources.
    ///
    /// With `parallel` enabled, extraction runs per detection on the rayon
    /// pool; accumulation order still follows the input order, so results
    /// are identical either way.
    pub fn process_batch(&mut self, sources: &[DetectionSource]) {
        if self.parallel {
            let outputs: Vec<_> = sources
                .par_iter()
                .map(|source| {
                    (
                        source.name.clone(),
                        self.extractor.extract(&source.name, &source.query),
                    )
                })
                .collect();
            for (name, output) in outputs {
                self.profiles
                    .push(DetectionProfile::from_fields(&name, &output.classified));
                self.classified.extend(output.classified);
                self.rejected.extend(output.rejected);
            }
        } else {
            for source in sources {
                self.process(&source.name, &source.query);
            }
        }
    }

    /// All classified fields accumulated so far.
    pub fn classified_fields(&self) -> &[ClassifiedField] {
        &self.classified
    }

    /// All rejected fields accumulated so far.
    pub fn rejected_fields(&self) -> &[RejectedField] {
        &self.rejected
    }

    /// All detection profiles accumulated so far.
    pub fn profiles(&self) -> &[DetectionProfile] {
        &self.profiles
    }

    /// Derive the three report views from the accumulated profiles.
    pub fn report(&self) -> ClassificationReport {
        ClassificationReport::build(&self.profiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Domain;

    fn source(name: &str, query: &str) -> DetectionSource {
        DetectionSource {
            name: name.to_string(),
            query: query.to_string(),
        }
    }

    #[test]
    fn test_single_detection_accumulation() {
        let mut engine = FieldEngine::new().unwrap();
        engine.process(
            "r.yaml",
            "| extend Account = tostring(Identity)\n| project Account, f(x)",
        );

        assert_eq!(engine.classified_fields().len(), 2);
        assert_eq!(engine.rejected_fields().len(), 1);
        assert_eq!(engine.profiles().len(), 1);
        assert_eq!(engine.profiles()[0].overall(), Domain::User);
    }

    #[test]
    fn test_batch_matches_sequential() {
        let sources = vec![
            source("a.yaml", "| project AccountName, DestinationPort"),
            source("b.yaml", "| summarize c = count() by HostName"),
            source("c.yaml", "| where x == 1"),
        ];

        let mut sequential = FieldEngine::new().unwrap();
        sequential.process_batch(&sources);

        let mut parallel =
            FieldEngine::with_config(EngineConfig::default().with_parallel(true)).unwrap();
        parallel.process_batch(&sources);

        assert_eq!(sequential.classified_fields(), parallel.classified_fields());
        assert_eq!(sequential.rejected_fields(), parallel.rejected_fields());
        assert_eq!(sequential.profiles(), parallel.profiles());
    }

    #[test]
    fn test_profile_per_detection_even_when_empty() {
        let mut engine = FieldEngine::new().unwrap();
        engine.process("empty.yaml", "| where x == 1");

        assert_eq!(engine.profiles().len(), 1);
        assert_eq!(engine.profiles()[0].overall(), Domain::Unknown);
        assert!(engine.classified_fields().is_empty());
    }

    #[test]
    fn test_report_over_accumulated_profiles() {
        let mut engine = FieldEngine::new().unwrap();
        engine.process("u.yaml", "| project AccountName");
        engine.process("n.yaml", "| project DestinationPort");
        engine.process("x.yaml", "| project OddField");

        let report = engine.report();
        let user_row = &report.grouped[0];
        assert_eq!(user_row.classification, "user");
        assert_eq!(user_row.detection, vec!["u.yaml"]);

        // Unknown-only detections produce no joined rows.
        assert_eq!(report.joined.len(), 2);
    }
}
