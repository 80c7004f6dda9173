//! Attendee input types
//!
//! This module defines the immutable input records consumed by the
//! classification pipeline, plus the batch unit the scheduler dispatches.

use serde::{Deserialize, Serialize};

/// A single conference attendee, as produced by the CSV loader.
///
/// Records are immutable once handed to the pipeline; workers only read them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendeeRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub organization: String,
    /// Pre-fetched research context attached by upstream tooling (e.g. prior
    /// web-search text). Passed through to the oracle verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub research_context: Option<String>,
}

impl AttendeeRecord {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        organization: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            organization: organization.into(),
            research_context: None,
        }
    }

    /// Full display name, or "Unknown" when both name fields are empty.
    pub fn person_name(&self) -> String {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let name = name.trim();
        if name.is_empty() {
            "Unknown".to_string()
        } else {
            name.to_string()
        }
    }

    /// Domain portion of the email address, or "unknown.com" when absent.
    pub fn company_domain(&self) -> String {
        self.email
            .split('@')
            .nth(1)
            .filter(|d| !d.is_empty())
            .unwrap_or("unknown.com")
            .to_string()
    }
}

/// A bounded contiguous slice of the attendee list, processed as one oracle
/// invocation unit. Owned exclusively by the worker processing it.
#[derive(Debug, Clone)]
pub struct Batch {
    /// Position of this batch in partition order, starting at 0.
    pub index: usize,
    pub attendees: Vec<AttendeeRecord>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.attendees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attendees.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_name() {
        let attendee = AttendeeRecord::new("Jane", "Doe", "jane@acme.com", "Acme");
        assert_eq!(attendee.person_name(), "Jane Doe");
    }

    #[test]
    fn test_person_name_partial() {
        let attendee = AttendeeRecord::new("", "Doe", "doe@acme.com", "Acme");
        assert_eq!(attendee.person_name(), "Doe");
    }

    #[test]
    fn test_person_name_unknown() {
        let attendee = AttendeeRecord::new("", "", "x@acme.com", "Acme");
        assert_eq!(attendee.person_name(), "Unknown");
    }

    #[test]
    fn test_company_domain() {
        let attendee = AttendeeRecord::new("Jane", "Doe", "jane@pharma.example.org", "");
        assert_eq!(attendee.company_domain(), "pharma.example.org");
    }

    #[test]
    fn test_company_domain_missing() {
        let attendee = AttendeeRecord::new("Jane", "Doe", "not-an-email", "");
        assert_eq!(attendee.company_domain(), "unknown.com");
    }
}
