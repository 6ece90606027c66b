//! Keyword-based semantic domain classification for field names.
//!
//! Field names are mapped to a semantic domain by scanning an ordered
//! keyword table: the first keyword (in table order) that occurs anywhere
//! as a substring of the field name decides the domain. Table order is a
//! priority list, not a specificity ranking; a name containing keywords of
//! two domains resolves to whichever keyword is declared earlier.
//!
//! The substring scan uses an AhoCorasick automaton over the keyword set,
//! taking the match with the smallest pattern index so that table priority
//! is preserved regardless of where in the name each keyword occurs.
//!
//! # Examples
//!
//! ```rust
//! use kql_field_engine::classifier::{Domain, DomainClassifier, DomainTable};
//!
//! let classifier = DomainClassifier::new(DomainTable::default())?;
//! assert_eq!(classifier.classify("AccountName"), Domain::User);
//! assert_eq!(classifier.classify("DestinationPort"), Domain::Network);
//! assert_eq!(classifier.classify("RandomStuff123"), Domain::Unknown);
//! # Ok::<(), kql_field_engine::KqlError>(())
//! ```

use crate::error::{KqlError, Result};
use aho_corasick::{AhoCorasick, AhoCorasickBuilder};
use serde::Serialize;
use std::fmt;

/// Semantic domain assigned to a validated field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Domain {
    User,
    Process,
    Host,
    Network,
    Unknown,
}

impl Domain {
    /// Lower-case name used in field records and report rows.
    pub fn name(self) -> &'static str {
        match self {
            Domain::User => "user",
            Domain::Process => "process",
            Domain::Host => "host",
            Domain::Network => "network",
            Domain::Unknown => "unknown",
        }
    }

    /// Capitalized name used in detection profiles.
    pub fn title(self) -> &'static str {
        match self {
            Domain::User => "User",
            Domain::Process => "Process",
            Domain::Host => "Host",
            Domain::Network => "Network",
            Domain::Unknown => "Unknown",
        }
    }

    /// The four specific domains, in overall tie-break priority order.
    /// The first domain reaching the maximum count wins the overall label.
    pub const OVERALL_PRIORITY: [Domain; 4] =
        [Domain::User, Domain::Host, Domain::Network, Domain::Process];

    /// Row order of the grouped-by-overall report view.
    pub const REPORT_ORDER: [Domain; 4] =
        [Domain::User, Domain::Process, Domain::Host, Domain::Network];
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Domain {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

/// Ordered keyword-to-domain mapping.
///
/// Declaration order is load-bearing: classification returns the domain of
/// the earliest table entry whose keyword occurs in the field name. The
/// table is an explicit configuration object so deployments (and tests) can
/// substitute their own priority list.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainTable {
    entries: Vec<(String, Domain)>,
}

impl DomainTable {
    /// Create an empty table.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a table from ordered keyword/domain pairs.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Domain)>,
        S: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(keyword, domain)| (keyword.into(), domain))
                .collect(),
        }
    }

    /// Append a keyword at the lowest remaining priority.
    pub fn push(&mut self, keyword: impl Into<String>, domain: Domain) {
        self.entries.push((keyword.into(), domain));
    }

    /// Ordered view of the table entries.
    pub fn entries(&self) -> &[(String, Domain)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DomainTable {
    /// The stock keyword priority list for Sentinel-style detection fields.
    fn default() -> Self {
        Self::from_entries([
            ("user", Domain::User),
            ("username", Domain::User),
            ("account", Domain::User),
            ("file", Domain::Process),
            ("process", Domain::Process),
            ("md5", Domain::Process),
            ("sha1", Domain::Process),
            ("sha256", Domain::Process),
            ("command", Domain::Process),
            ("path", Domain::Process),
            ("host", Domain::Host),
            ("computer", Domain::Host),
            ("ipaddress", Domain::Network),
            ("ipv4", Domain::Network),
            ("ipv6", Domain::Network),
            ("traffic", Domain::Network),
            ("classification", Domain::Network),
            ("tld", Domain::Network),
            ("port", Domain::Network),
            ("protocol", Domain::Network),
        ])
    }
}

/// Classifies validated field names into semantic domains.
#[derive(Debug, Clone)]
pub struct DomainClassifier {
    table: DomainTable,
    automaton: AhoCorasick,
    domains: Vec<Domain>,
}

impl DomainClassifier {
    /// Compile a classifier from a keyword table.
    ///
    /// # Errors
    /// Returns an error if the keyword set cannot be compiled into an
    /// automaton (for example, a keyword exceeding automaton limits).
    pub fn new(table: DomainTable) -> Result<Self> {
        let automaton = AhoCorasickBuilder::new()
            .ascii_case_insensitive(true)
            .build(table.entries().iter().map(|(keyword, _)| keyword))
            .map_err(|e| KqlError::InvalidKeywordTable(e.to_string()))?;
        let domains = table.entries().iter().map(|&(_, domain)| domain).collect();

        Ok(Self {
            table,
            automaton,
            domains,
        })
    }

    /// Classifier over the stock keyword table.
    pub fn with_default_table() -> Result<Self> {
        Self::new(DomainTable::default())
    }

    /// The table this classifier was compiled from.
    pub fn table(&self) -> &DomainTable {
        &self.table
    }

    /// Map a field name to its domain.
    ///
    /// Scans for every keyword occurrence (overlaps included, since a later
    /// position can hold an earlier-priority keyword) and picks the entry
    /// with the smallest table index. No keyword match yields
    /// [`Domain::Unknown`].
    pub fn classify(&self, field: &str) -> Domain {
        self.automaton
            .find_overlapping_iter(field)
            .map(|m| m.pattern().as_usize())
            .min()
            .map(|index| self.domains[index])
            .unwrap_or(Domain::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> DomainClassifier {
        DomainClassifier::with_default_table().unwrap()
    }

    #[test]
    fn test_user_fields() {
        let classifier = classifier();
        assert_eq!(classifier.classify("AccountName"), Domain::User);
        assert_eq!(classifier.classify("TargetUserName"), Domain::User);
        assert_eq!(classifier.classify("user_id"), Domain::User);
    }

    #[test]
    fn test_network_fields() {
        let classifier = classifier();
        assert_eq!(classifier.classify("DestinationPort"), Domain::Network);
        assert_eq!(classifier.classify("SourceIpAddress"), Domain::Network);
        assert_eq!(classifier.classify("NetworkProtocol"), Domain::Network);
    }

    #[test]
    fn test_process_fields() {
        let classifier = classifier();
        assert_eq!(classifier.classify("InitiatingProcessId"), Domain::Process);
        assert_eq!(classifier.classify("FolderPath"), Domain::Process);
        assert_eq!(classifier.classify("SHA256"), Domain::Process);
    }

    #[test]
    fn test_host_fields() {
        let classifier = classifier();
        assert_eq!(classifier.classify("HostName"), Domain::Host);
        assert_eq!(classifier.classify("ComputerName"), Domain::Host);
    }

    #[test]
    fn test_unknown_fields() {
        let classifier = classifier();
        assert_eq!(classifier.classify("RandomStuff123"), Domain::Unknown);
        assert_eq!(classifier.classify(""), Domain::Unknown);
    }

    #[test]
    fn test_case_insensitive() {
        let classifier = classifier();
        assert_eq!(classifier.classify("ACCOUNTNAME"), Domain::User);
        assert_eq!(classifier.classify("hostname"), Domain::Host);
    }

    #[test]
    fn test_table_order_wins_over_position() {
        // "user" precedes "host" in the table, so a name carrying both
        // resolves to User even when the host keyword appears first.
        let classifier = classifier();
        assert_eq!(classifier.classify("HostUser"), Domain::User);
        assert_eq!(classifier.classify("UserHost"), Domain::User);
    }

    #[test]
    fn test_table_order_wins_within_default_table() {
        // "file" precedes "host"; "account" precedes "port".
        let classifier = classifier();
        assert_eq!(classifier.classify("HostFile"), Domain::Process);
        assert_eq!(classifier.classify("AccountPort"), Domain::User);
    }

    #[test]
    fn test_overlapping_keyword_occurrence() {
        // An earlier-priority keyword overlapping a later one must still be
        // seen: "username" contains "user" (priority 0) inside it.
        let table = DomainTable::from_entries([
            ("sername", Domain::Host),
            ("user", Domain::User),
        ]);
        let classifier = DomainClassifier::new(table).unwrap();
        // "sername" matches at index 0, "user" at index 1; table order says
        // "sername" wins despite "user" starting earlier in the string.
        assert_eq!(classifier.classify("username"), Domain::Host);
    }

    #[test]
    fn test_custom_table_substitution() {
        let table = DomainTable::from_entries([("beacon", Domain::Network)]);
        let classifier = DomainClassifier::new(table).unwrap();
        assert_eq!(classifier.classify("BeaconInterval"), Domain::Network);
        assert_eq!(classifier.classify("AccountName"), Domain::Unknown);
    }

    #[test]
    fn test_empty_table_classifies_nothing() {
        let classifier = DomainClassifier::new(DomainTable::empty()).unwrap();
        assert_eq!(classifier.classify("AccountName"), Domain::Unknown);
    }

    #[test]
    fn test_table_push_priority() {
        let mut table = DomainTable::empty();
        table.push("port", Domain::Network);
        table.push("user", Domain::User);
        assert_eq!(table.len(), 2);

        let classifier = DomainClassifier::new(table).unwrap();
        // "port" was pushed first, so it outranks "user".
        assert_eq!(classifier.classify("UserPort"), Domain::Network);
    }

    #[test]
    fn test_domain_names() {
        assert_eq!(Domain::User.name(), "user");
        assert_eq!(Domain::Process.title(), "Process");
        assert_eq!(Domain::Unknown.to_string(), "unknown");
    }

    #[test]
    fn test_default_table_shape() {
        let table = DomainTable::default();
        assert_eq!(table.len(), 20);
        assert_eq!(table.entries()[0], ("user".to_string(), Domain::User));
        assert_eq!(
            table.entries()[19],
            ("protocol".to_string(), Domain::Network)
        );
    }
}
