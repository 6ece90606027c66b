//! Full pipeline tests over a temporary rules directory.

use kql_field_engine::pipeline::{self, PipelineConfig};
use kql_field_engine::{EngineConfig, KqlError};
use std::fs;
use std::path::Path;

fn write_rule(dir: &Path, file: &str, contents: &str) {
    fs::write(dir.join(file), contents).unwrap();
}

fn sample_rules(dir: &Path) {
    write_rule(
        dir,
        "failed_logins.yaml",
        r#"name: Failed logins burst
query: |
  SecurityEvent
  | where EventID == 4625
  | summarize Attempts = count() by Account, Computer
  | project Account, Computer, Attempts
"#,
    );
    write_rule(
        dir,
        "nginx_ips.yaml",
        r#"name: Nginx known malicious IPs
query: |
  NginxLogs
  | extend ClientIpAddress = tostring(split(RawData, " ")[0])
  | project ClientIpAddress, DestinationPort
"#,
    );
    write_rule(dir, "no_query.yaml", "name: Missing query\n");
    write_rule(dir, "broken.yaml", "query: [unclosed\n");
}

#[test]
fn test_pipeline_processes_valid_rules_and_skips_bad_ones() {
    let rules = tempfile::tempdir().unwrap();
    sample_rules(rules.path());
    let out = tempfile::tempdir().unwrap();

    let summary = pipeline::run(&PipelineConfig::new(rules.path(), out.path())).unwrap();

    assert_eq!(summary.detections, 2);
    assert_eq!(summary.reports_written, 6);
    // Skipped detections do not appear anywhere in the outputs.
    let profiles = fs::read_to_string(out.path().join("detection_profiles.json")).unwrap();
    assert!(profiles.contains("failed_logins.yaml"));
    assert!(profiles.contains("nginx_ips.yaml"));
    assert!(!profiles.contains("no_query.yaml"));
    assert!(!profiles.contains("broken.yaml"));
}

#[test]
fn test_pipeline_report_contents() {
    let rules = tempfile::tempdir().unwrap();
    sample_rules(rules.path());
    let out = tempfile::tempdir().unwrap();

    pipeline::run(&PipelineConfig::new(rules.path(), out.path())).unwrap();

    let good: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.path().join("good_fields.json")).unwrap())
            .unwrap();
    let fields: Vec<&str> = good
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"account"));
    assert!(fields.contains(&"clientipaddress"));

    let grouped = fs::read_to_string(out.path().join("grouped_classifications.csv")).unwrap();
    let mut lines = grouped.lines();
    assert_eq!(
        lines.next().unwrap(),
        "classification,detection count,detection"
    );
    // Four domain rows follow, user first.
    assert_eq!(grouped.lines().count(), 5);
    assert!(lines.next().unwrap().starts_with("user,"));

    let joined = fs::read_to_string(out.path().join("joined_classifications.csv")).unwrap();
    assert!(joined.starts_with("detection,classification\n"));
    assert!(joined.contains("nginx_ips.yaml,network"));
}

#[test]
fn test_pipeline_missing_rules_dir_is_fatal() {
    let out = tempfile::tempdir().unwrap();
    let result = pipeline::run(&PipelineConfig::new("/no/such/place", out.path()));
    assert!(matches!(result, Err(KqlError::SourceDirNotFound(_))));
}

#[test]
fn test_pipeline_with_non_dedup_engine() {
    let rules = tempfile::tempdir().unwrap();
    write_rule(
        rules.path(),
        "repeat.yaml",
        "name: Repeat\nquery: |\n  T\n  | extend Account = a\n  | extend Account = b\n",
    );
    let out = tempfile::tempdir().unwrap();

    let config = PipelineConfig::new(rules.path(), out.path())
        .with_engine(EngineConfig::new().with_dedup(false));
    let summary = pipeline::run(&config).unwrap();
    assert_eq!(summary.classified, 2);

    let out2 = tempfile::tempdir().unwrap();
    let config = PipelineConfig::new(rules.path(), out2.path());
    let summary = pipeline::run(&config).unwrap();
    assert_eq!(summary.classified, 1);
}

#[test]
fn test_pipeline_parallel_extraction() {
    let rules = tempfile::tempdir().unwrap();
    sample_rules(rules.path());

    let out_seq = tempfile::tempdir().unwrap();
    let seq = pipeline::run(&PipelineConfig::new(rules.path(), out_seq.path())).unwrap();

    let out_par = tempfile::tempdir().unwrap();
    let config = PipelineConfig::new(rules.path(), out_par.path())
        .with_engine(EngineConfig::new().with_parallel(true));
    let par = pipeline::run(&config).unwrap();

    assert_eq!(seq.classified, par.classified);
    assert_eq!(seq.rejected, par.rejected);
    assert_eq!(
        fs::read_to_string(out_seq.path().join("good_fields.json")).unwrap(),
        fs::read_to_string(out_par.path().join("good_fields.json")).unwrap()
    );
}
