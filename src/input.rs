//! Attendee CSV loading and cleaning
//!
//! Real-world attendee exports are messy: inconsistent header casing, rows
//! without an email, the same person registered twice, empty organization
//! cells. The loader normalizes headers, skips email-less rows, dedupes by
//! email keeping the most complete record, and falls back to the email
//! domain when the organization is blank.

use crate::attendee::AttendeeRecord;
use csv::StringRecord;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

const REQUIRED_COLUMNS: [&str; 4] = ["First Name", "Last Name", "Email", "Organization"];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read attendee file: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required columns: {0}")]
    MissingColumns(String),
}

/// Company name embedded in an email address: the text between `@` and the
/// first following `.`. Returns None when the address has no such shape.
pub fn extract_company_from_email(email: &str) -> Option<String> {
    let domain = email.split('@').nth(1)?;
    let (company, rest) = domain.split_once('.')?;
    if company.is_empty() || rest.is_empty() {
        return None;
    }
    Some(company.to_string())
}

/// Loads and cleans an attendee CSV.
pub fn load_attendees(path: &Path) -> Result<Vec<AttendeeRecord>, LoadError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let columns = resolve_columns(&headers)?;
    let [first_idx, last_idx, email_idx, org_idx] = columns;

    let mut attendees: Vec<AttendeeRecord> = Vec::new();
    let mut by_email: HashMap<String, usize> = HashMap::new();
    let mut skipped = 0usize;

    for (row_number, result) in reader.records().enumerate() {
        let record = result?;
        let email = field(&record, email_idx);
        if email.is_empty() {
            warn!(row = row_number + 2, "skipping row without an email");
            skipped += 1;
            continue;
        }

        let mut organization = field(&record, org_idx);
        if organization.is_empty() {
            organization = extract_company_from_email(&email).unwrap_or_default();
        }

        let candidate = AttendeeRecord {
            first_name: field(&record, first_idx),
            last_name: field(&record, last_idx),
            email: email.clone(),
            organization,
            research_context: None,
        };

        match by_email.get(&email) {
            Some(&position) => merge_duplicate(&mut attendees[position], candidate),
            None => {
                by_email.insert(email, attendees.len());
                attendees.push(candidate);
            }
        }
    }

    debug!(
        attendees = attendees.len(),
        skipped, "attendee file loaded"
    );
    Ok(attendees)
}

/// Finds the required columns in the header row, matching case-insensitively.
fn resolve_columns(headers: &StringRecord) -> Result<[usize; 4], LoadError> {
    let mut indices = [None; 4];
    for (idx, header) in headers.iter().enumerate() {
        let normalized = header.trim().to_lowercase();
        for (slot, required) in REQUIRED_COLUMNS.iter().enumerate() {
            if normalized == required.to_lowercase() {
                indices[slot] = Some(idx);
            }
        }
    }

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .zip(indices.iter())
        .filter(|(_, idx)| idx.is_none())
        .map(|(name, _)| *name)
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns(missing.join(", ")));
    }

    Ok(indices.map(|idx| idx.expect("checked above")))
}

fn field(record: &StringRecord, idx: usize) -> String {
    record.get(idx).unwrap_or("").trim().to_string()
}

/// Keeps the most complete of two records registered under the same email.
fn merge_duplicate(existing: &mut AttendeeRecord, mut candidate: AttendeeRecord) {
    if candidate.organization.is_empty() && !existing.organization.is_empty() {
        candidate.organization = existing.organization.clone();
    }

    let fills_name = (existing.first_name.is_empty() && !candidate.first_name.is_empty())
        || (existing.last_name.is_empty() && !candidate.last_name.is_empty());
    if candidate.organization.len() > existing.organization.len() || fills_name {
        *existing = candidate;
    }
}
