//! In-process pipeline runner.
//!
//! Composes source discovery, extraction, profiling, and report emission as
//! plain values, with no intermediate serialize/deserialize round trips. A
//! missing rules directory aborts the whole run before any output; every
//! report file is attempted independently, so one failed write does not
//! block the rest.

use crate::config::EngineConfig;
use crate::engine::FieldEngine;
use crate::error::Result;
use crate::output;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// File names of the emitted reports.
const GOOD_FIELDS_JSON: &str = "good_fields.json";
const BAD_FIELDS_JSON: &str = "bad_fields.json";
const DETECTION_PROFILES_JSON: &str = "detection_profiles.json";
const GROUPED_CSV: &str = "grouped_classifications.csv";
const JOINED_CSV: &str = "joined_classifications.csv";
const GROUPED_JOINED_CSV: &str = "grouped_joined_classifications.csv";

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory holding detection rule YAML documents.
    pub rules_dir: PathBuf,
    /// Directory the reports are written to (created if absent).
    pub output_dir: PathBuf,
    /// Engine settings for the extraction stage.
    pub engine: EngineConfig,
}

impl PipelineConfig {
    pub fn new(rules_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            rules_dir: rules_dir.into(),
            output_dir: output_dir.into(),
            engine: EngineConfig::default(),
        }
    }

    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }
}

/// Counters describing one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSummary {
    /// Detections processed (readable rules with a usable query).
    pub detections: usize,
    /// Classified field records emitted.
    pub classified: usize,
    /// Rejected field records emitted.
    pub rejected: usize,
    /// Report files written successfully, out of six attempted.
    pub reports_written: usize,
}

/// Run the full pipeline: discover rules, extract and classify fields,
/// build profiles, and write all six reports.
pub fn run(config: &PipelineConfig) -> Result<PipelineSummary> {
    let sources = crate::source::load_rules_dir(&config.rules_dir)?;
    info!(count = sources.len(), "loaded detection sources");

    let mut engine = FieldEngine::with_config(config.engine.clone())?;
    engine.process_batch(&sources);

    fs::create_dir_all(&config.output_dir)?;
    let report = engine.report();
    let out = config.output_dir.as_path();

    let writes: [(&str, Result<()>); 6] = [
        (
            GOOD_FIELDS_JSON,
            output::write_json(&out.join(GOOD_FIELDS_JSON), &engine.classified_fields()),
        ),
        (
            BAD_FIELDS_JSON,
            output::write_json(&out.join(BAD_FIELDS_JSON), &engine.rejected_fields()),
        ),
        (
            DETECTION_PROFILES_JSON,
            output::write_json(&out.join(DETECTION_PROFILES_JSON), &engine.profiles()),
        ),
        (
            GROUPED_CSV,
            output::write_grouped_csv(&out.join(GROUPED_CSV), &report.grouped),
        ),
        (
            JOINED_CSV,
            output::write_joined_csv(&out.join(JOINED_CSV), &report.joined),
        ),
        (
            GROUPED_JOINED_CSV,
            output::write_grouped_joined_csv(&out.join(GROUPED_JOINED_CSV), &report.grouped_joined),
        ),
    ];

    let mut reports_written = 0;
    for (name, result) in writes {
        match result {
            Ok(()) => reports_written += 1,
            Err(err) => warn!(report = name, %err, "failed to write report"),
        }
    }

    Ok(PipelineSummary {
        detections: sources.len(),
        classified: engine.classified_fields().len(),
        rejected: engine.rejected_fields().len(),
        reports_written,
    })
}

/// Convenience wrapper running with default engine settings.
pub fn run_with_defaults(rules_dir: &Path, output_dir: &Path) -> Result<PipelineSummary> {
    run(&PipelineConfig::new(rules_dir, output_dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KqlError;
    use std::io::Write;

    fn write_rule(dir: &Path, file: &str, contents: &str) {
        let mut f = fs::File::create(dir.join(file)).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
    }

    #[test]
    fn test_missing_rules_dir_aborts_without_output() {
        let out = tempfile::tempdir().unwrap();
        let out_dir = out.path().join("reports");
        let config = PipelineConfig::new("/no/such/rules", &out_dir);

        let result = run(&config);
        assert!(matches!(result, Err(KqlError::SourceDirNotFound(_))));
        assert!(!out_dir.exists());
    }

    #[test]
    fn test_full_run_writes_all_reports() {
        let rules = tempfile::tempdir().unwrap();
        write_rule(
            rules.path(),
            "logins.yaml",
            "name: Logins\nquery: |\n  SecurityEvent\n  | summarize c = count() by Account\n",
        );
        write_rule(rules.path(), "skipped.yaml", "name: No query\n");

        let out = tempfile::tempdir().unwrap();
        let summary = run(&PipelineConfig::new(rules.path(), out.path())).unwrap();

        assert_eq!(summary.detections, 1);
        assert_eq!(summary.classified, 2);
        assert_eq!(summary.rejected, 0);
        assert_eq!(summary.reports_written, 6);

        for name in [
            GOOD_FIELDS_JSON,
            BAD_FIELDS_JSON,
            DETECTION_PROFILES_JSON,
            GROUPED_CSV,
            JOINED_CSV,
            GROUPED_JOINED_CSV,
        ] {
            assert!(out.path().join(name).exists(), "missing report: {name}");
        }
    }
}
