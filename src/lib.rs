//! # KQL Field Engine
//!
//! A Rust library for mining field names out of KQL security-detection
//! queries (Microsoft-Sentinel-style rules), classifying each field into a
//! semantic domain, and aggregating per-detection classification profiles
//! for downstream reporting.
//!
//! The engine is a heuristic miner, not a KQL grammar: it inspects exactly
//! three clause kinds (`extend`, `summarize`, `project`), separates
//! field-like tokens from expression syntax with a character-class check,
//! and resolves ambiguous names with an ordered keyword priority table.
//!
//! ## Quick Start
//!
//! ```rust
//! use kql_field_engine::FieldEngine;
//!
//! let mut engine = FieldEngine::new()?;
//! engine.process(
//!     "suspicious_logins.yaml",
//!     r#"SecurityEvent
//! | where EventID == 4625
//! | summarize Attempts = count() by Account, Computer
//! | project Account, Computer, Attempts"#,
//! );
//!
//! let report = engine.report();
//! for row in &report.grouped {
//!     println!("{}: {} detections", row.classification, row.detection_count);
//! }
//! # Ok::<(), kql_field_engine::KqlError>(())
//! ```
//!
//! ## Custom keyword table
//!
//! ```rust
//! use kql_field_engine::classifier::Domain;
//! use kql_field_engine::{DomainTable, EngineConfig, FieldEngine};
//!
//! let table = DomainTable::from_entries([
//!     ("beacon", Domain::Network),
//!     ("user", Domain::User),
//! ]);
//! let mut engine =
//!     FieldEngine::with_config(EngineConfig::new().with_domain_table(table))?;
//!
//! engine.process("c2.yaml", "| project BeaconUser");
//! // "beacon" outranks "user" in this table.
//! assert_eq!(engine.classified_fields()[0].domain, Domain::Network);
//! # Ok::<(), kql_field_engine::KqlError>(())
//! ```
//!
//! ## Full pipeline over a rules directory
//!
//! ```rust,ignore
//! use kql_field_engine::pipeline::{self, PipelineConfig};
//!
//! let summary = pipeline::run(&PipelineConfig::new("rules/", "reports/"))?;
//! println!(
//!     "{} detections, {} classified fields, {} reports written",
//!     summary.detections, summary.classified, summary.reports_written
//! );
//! # Ok::<(), kql_field_engine::KqlError>(())
//! ```

pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod extractor;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod profile;
pub mod records;
pub mod report;
pub mod source;

// Primary engine interface
pub use engine::FieldEngine;

// Configuration
pub use classifier::{Domain, DomainClassifier, DomainTable};
pub use config::EngineConfig;

// Core types and errors
pub use error::{KqlError, Result};
pub use extractor::{ExtractionOutput, FieldExtractor};
pub use parser::ClauseKind;
pub use profile::{DetectionProfile, DomainCounts};
pub use records::{ClassifiedField, RejectedField};
pub use report::ClassificationReport;
pub use source::DetectionSource;

// Pipeline composition
pub use pipeline::{PipelineConfig, PipelineSummary};
