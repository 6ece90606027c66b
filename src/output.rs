//! Report emission: JSON field records and profiles, CSV report views.
//!
//! Serialization only happens here, at the external boundary. Each writer
//! makes a single attempt; failures surface as errors for the caller to log
//! and are independent of one another.

use crate::error::Result;
use crate::report::{JoinedGroupRow, JoinedRow, OverallGroupRow};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write any serializable value as pretty-printed JSON.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

/// Write the grouped-by-overall view as CSV.
///
/// Columns: `classification`, `detection count`, `detection`; the detection
/// list is JSON-encoded inside its cell.
pub fn write_grouped_csv(path: &Path, rows: &[OverallGroupRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["classification", "detection count", "detection"])?;
    for row in rows {
        let count = row.detection_count.to_string();
        let detections = serde_json::to_string(&row.detection)?;
        writer.write_record([row.classification, count.as_str(), detections.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the joined-per-detection view as CSV.
///
/// Columns: `detection`, `classification`.
pub fn write_joined_csv(path: &Path, rows: &[JoinedRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["detection", "classification"])?;
    for row in rows {
        writer.write_record([&row.detection, &row.classification])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the grouped-by-joined-label view as CSV.
///
/// Columns: `classification`, `detection count`, `detection`; the detection
/// list is JSON-encoded inside its cell.
pub fn write_grouped_joined_csv(path: &Path, rows: &[JoinedGroupRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["classification", "detection count", "detection"])?;
    for row in rows {
        let count = row.detection_count.to_string();
        let detections = serde_json::to_string(&row.detection)?;
        writer.write_record([row.classification.as_str(), count.as_str(), detections.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}
