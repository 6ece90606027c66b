//! Report views over a set of detection profiles.
//!
//! Three independent views are derived once all profiles are known:
//! grouped-by-overall, joined-per-detection, and grouped-by-joined-label.
//! Nothing here mutates profiles; the views are plain derived values handed
//! to a serializer.

use crate::classifier::Domain;
use crate::profile::DetectionProfile;
use serde::Serialize;
use std::collections::BTreeMap;

/// Row of the grouped-by-overall view: one per specific domain, carrying
/// every detection whose overall label equals that domain. Unknown overall
/// labels are dropped entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverallGroupRow {
    pub classification: &'static str,
    #[serde(rename = "detection count")]
    pub detection_count: usize,
    pub detection: Vec<String>,
}

/// Row of the joined-per-detection view: one per detection with at least
/// one nonzero specific domain count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinedRow {
    pub detection: String,
    pub classification: String,
}

/// Row of the grouped-by-joined-label view: detections sharing an identical
/// joined label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinedGroupRow {
    pub classification: String,
    #[serde(rename = "detection count")]
    pub detection_count: usize,
    pub detection: Vec<String>,
}

/// The three report views, derived together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationReport {
    pub grouped: Vec<OverallGroupRow>,
    pub joined: Vec<JoinedRow>,
    pub grouped_joined: Vec<JoinedGroupRow>,
}

impl ClassificationReport {
    /// Derive all three views from a profile set.
    pub fn build(profiles: &[DetectionProfile]) -> Self {
        Self {
            grouped: group_by_overall(profiles),
            joined: join_per_detection(profiles),
            grouped_joined: group_by_joined_label(profiles),
        }
    }
}

/// Joined label of a profile: every domain with a nonzero specific count,
/// sorted by count descending then domain name ascending, hyphen-joined.
/// `None` when all four specific counts are zero.
pub fn joined_label(profile: &DetectionProfile) -> Option<String> {
    let mut nonzero: Vec<(&'static str, usize)> = Domain::REPORT_ORDER
        .iter()
        .map(|&domain| (domain.name(), profile.counts.get(domain)))
        .filter(|&(_, count)| count > 0)
        .collect();

    if nonzero.is_empty() {
        return None;
    }

    nonzero.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    Some(
        nonzero
            .iter()
            .map(|&(name, _)| name)
            .collect::<Vec<_>>()
            .join("-"),
    )
}

/// Grouped-by-overall view. Emits one row per specific domain in the fixed
/// report order (user, process, host, network), zero-count rows included;
/// detections with an Unknown overall appear in no row.
pub fn group_by_overall(profiles: &[DetectionProfile]) -> Vec<OverallGroupRow> {
    Domain::REPORT_ORDER
        .iter()
        .map(|&domain| {
            let detection: Vec<String> = profiles
                .iter()
                .filter(|p| p.overall() == domain)
                .map(|p| p.detection.clone())
                .collect();
            OverallGroupRow {
                classification: domain.name(),
                detection_count: detection.len(),
                detection,
            }
        })
        .collect()
}

/// Joined-per-detection view, in profile order. Detections whose specific
/// counts are all zero produce no row.
pub fn join_per_detection(profiles: &[DetectionProfile]) -> Vec<JoinedRow> {
    profiles
        .iter()
        .filter_map(|profile| {
            joined_label(profile).map(|classification| JoinedRow {
                detection: profile.detection.clone(),
                classification,
            })
        })
        .collect()
}

/// Grouped-by-joined-label view, rows sorted alphabetically by label.
pub fn group_by_joined_label(profiles: &[DetectionProfile]) -> Vec<JoinedGroupRow> {
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for profile in profiles {
        if let Some(label) = joined_label(profile) {
            groups.entry(label).or_default().push(profile.detection.clone());
        }
    }

    groups
        .into_iter()
        .map(|(classification, detection)| JoinedGroupRow {
            classification,
            detection_count: detection.len(),
            detection,
        })
        .collect()
}
