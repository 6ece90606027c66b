//! Per-detection classification profiles.

use crate::classifier::Domain;
use crate::records::ClassifiedField;
use serde::ser::SerializeStruct;
use serde::Serialize;

/// Domain tallies for one detection, plus the overall label.
///
/// Serialized with the capitalized keys the profile reports expect:
/// `Overall`, `User`, `Host`, `Network`, `Process`, `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DomainCounts {
    pub user: usize,
    pub process: usize,
    pub host: usize,
    pub network: usize,
    pub unknown: usize,
}

impl DomainCounts {
    /// Tally one classified field.
    pub fn add(&mut self, domain: Domain) {
        match domain {
            Domain::User => self.user += 1,
            Domain::Process => self.process += 1,
            Domain::Host => self.host += 1,
            Domain::Network => self.network += 1,
            Domain::Unknown => self.unknown += 1,
        }
    }

    /// Count for one domain.
    pub fn get(&self, domain: Domain) -> usize {
        match domain {
            Domain::User => self.user,
            Domain::Process => self.process,
            Domain::Host => self.host,
            Domain::Network => self.network,
            Domain::Unknown => self.unknown,
        }
    }

    /// True when all four specific domain counts are zero. The unknown
    /// count is ignored.
    pub fn is_unclassified(&self) -> bool {
        Domain::OVERALL_PRIORITY
            .iter()
            .all(|&domain| self.get(domain) == 0)
    }

    /// The overall label: [`Domain::Unknown`] iff no specific domain was
    /// counted, otherwise the specific domain with the maximum count. Ties
    /// break by fixed priority order (User, Host, Network, Process): the
    /// first domain reaching the maximum wins. The unknown count never
    /// contributes.
    pub fn overall(&self) -> Domain {
        if self.is_unclassified() {
            return Domain::Unknown;
        }

        let mut best = Domain::OVERALL_PRIORITY[0];
        for &domain in &Domain::OVERALL_PRIORITY[1..] {
            if self.get(domain) > self.get(best) {
                best = domain;
            }
        }
        best
    }
}

/// One detection's classification profile. Derived once from a detection's
/// classified fields and never mutated afterward.
///
/// # Examples
///
/// ```rust
/// use kql_field_engine::classifier::Domain;
/// use kql_field_engine::profile::DetectionProfile;
///
/// let profile = DetectionProfile::from_fields("rule.yaml", &[]);
/// assert_eq!(profile.counts.overall(), Domain::Unknown);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionProfile {
    pub detection: String,
    pub counts: DomainCounts,
}

impl DetectionProfile {
    /// Build the profile for one detection from its classified fields.
    ///
    /// Clause kinds are ignored for tallying; only domains count. The
    /// caller passes exactly the fields of this detection.
    pub fn from_fields(detection: &str, fields: &[ClassifiedField]) -> Self {
        let mut counts = DomainCounts::default();
        for field in fields {
            counts.add(field.domain);
        }

        Self {
            detection: detection.to_string(),
            counts,
        }
    }

    /// The overall domain label.
    pub fn overall(&self) -> Domain {
        self.counts.overall()
    }
}

impl Serialize for DetectionProfile {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        #[derive(Serialize)]
        struct Classification {
            #[serde(rename = "Overall")]
            overall: &'static str,
            #[serde(rename = "User")]
            user: usize,
            #[serde(rename = "Host")]
            host: usize,
            #[serde(rename = "Network")]
            network: usize,
            #[serde(rename = "Process")]
            process: usize,
            #[serde(rename = "Unknown")]
            unknown: usize,
        }

        let mut state = serializer.serialize_struct("DetectionProfile", 2)?;
        state.serialize_field("detection", &self.detection)?;
        state.serialize_field(
            "classification",
            &Classification {
                overall: self.counts.overall().title(),
                user: self.counts.user,
                host: self.counts.host,
                network: self.counts.network,
                process: self.counts.process,
                unknown: self.counts.unknown,
            },
        )?;
        state.end()
    }
}
