//! Result persistence
//!
//! CSV for spreadsheet consumers, JSON for downstream tooling. Both carry
//! the per-record classification status so fallback entries stay visible.

use super::schema::ClassificationRecord;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to write results: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode results as CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to encode results as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Writes the aggregated records as CSV, one row per attendee.
pub fn write_csv(results: &[ClassificationRecord], path: &Path) -> Result<(), WriteError> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in results {
        writer.serialize(record)?;
    }
    writer.flush()?;
    info!(records = results.len(), path = %path.display(), "results exported as CSV");
    Ok(())
}

/// Writes the aggregated records as a pretty-printed JSON array.
pub fn write_json(results: &[ClassificationRecord], path: &Path) -> Result<(), WriteError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, results)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    info!(records = results.len(), path = %path.display(), "results exported as JSON");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attendee::AttendeeRecord;
    use tempfile::TempDir;

    fn sample_records() -> Vec<ClassificationRecord> {
        let jane = AttendeeRecord::new("Jane", "Doe", "jane@acme.com", "Acme");
        vec![
            ClassificationRecord {
                person_name: "Jane Doe".to_string(),
                industry_association: crate::output::IndustryAssociation::Pharmaceutical,
                sub_category: crate::output::SubCategory::WomensHealth,
                company_name: "Acme".to_string(),
                company_domain: "acme.com".to_string(),
                classification_status: crate::output::ClassificationStatus::Ok,
                status_note: None,
            },
            ClassificationRecord::fallback(&jane, "retries exhausted"),
        ]
    }

    #[test]
    fn test_write_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.csv");
        write_csv(&sample_records(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "person_name,industry_association,sub_category,company_name,company_domain,classification_status,status_note"
        );
        assert!(content.contains("Women's Health"));
        assert!(content.contains("fallback"));
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn test_write_json_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.json");
        let records = sample_records();
        write_json(&records, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<ClassificationRecord> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, records);
    }
}
