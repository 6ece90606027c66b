//! Engine configuration.
//!
//! One parameterized extraction engine replaces the original's three
//! near-identical pipeline stages; the differences between them (field
//! deduplication on or off) are configuration, not separate code paths.

use crate::classifier::DomainTable;

/// Configuration for the field engine.
///
/// # Examples
///
/// ```rust
/// use kql_field_engine::{DomainTable, EngineConfig};
/// use kql_field_engine::classifier::Domain;
///
/// let config = EngineConfig::new()
///     .with_dedup(false)
///     .with_parallel(true)
///     .with_domain_table(DomainTable::from_entries([("beacon", Domain::Network)]));
///
/// assert!(!config.dedup_fields);
/// assert!(config.parallel);
/// ```
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Discard a second occurrence of the same (detection, clause, field)
    /// triple instead of double-counting it. Applies only to accepted
    /// fields; rejected tokens are always recorded.
    pub dedup_fields: bool,
    /// Extract detections of a batch in parallel. Extraction is
    /// per-detection independent, so result order is still the input order.
    pub parallel: bool,
    /// Ordered keyword table driving domain classification.
    pub domain_table: DomainTable,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dedup_fields: true,
            parallel: false,
            domain_table: DomainTable::default(),
        }
    }
}

impl EngineConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable per-detection field deduplication.
    pub fn with_dedup(mut self, enable: bool) -> Self {
        self.dedup_fields = enable;
        self
    }

    /// Enable or disable parallel batch extraction.
    pub fn with_parallel(mut self, enable: bool) -> Self {
        self.parallel = enable;
        self
    }

    /// Replace the domain keyword table.
    pub fn with_domain_table(mut self, table: DomainTable) -> Self {
        self.domain_table = table;
        self
    }
}
