//! Classification output schema
//!
//! Strict, explicitly-typed schema for oracle responses and final results.
//! The serde names match the JSON contract the classification prompt asks
//! for, so a response that deviates fails the parse instead of being
//! half-trusted.

use crate::attendee::AttendeeRecord;
use serde::{Deserialize, Serialize};

/// Industry association assigned to an attendee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndustryAssociation {
    Pharmaceutical,
    Healthcare,
    Other,
}

impl IndustryAssociation {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndustryAssociation::Pharmaceutical => "Pharmaceutical",
            IndustryAssociation::Healthcare => "Healthcare",
            IndustryAssociation::Other => "Other",
        }
    }
}

impl std::fmt::Display for IndustryAssociation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sub-specialty assigned to an attendee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubCategory {
    Pharma,
    Oncology,
    #[serde(rename = "Women's Health")]
    WomensHealth,
    #[serde(rename = "Organ Studies")]
    OrganStudies,
    #[serde(rename = "Not a Lead")]
    NotALead,
}

impl SubCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubCategory::Pharma => "Pharma",
            SubCategory::Oncology => "Oncology",
            SubCategory::WomensHealth => "Women's Health",
            SubCategory::OrganStudies => "Organ Studies",
            SubCategory::NotALead => "Not a Lead",
        }
    }
}

impl std::fmt::Display for SubCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a record came from a successful oracle call or was synthesized
/// after the batch's retries were exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationStatus {
    Ok,
    Fallback,
}

/// One classification result per attendee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    pub person_name: String,
    pub industry_association: IndustryAssociation,
    pub sub_category: SubCategory,
    pub company_name: String,
    pub company_domain: String,
    #[serde(default = "ClassificationRecord::default_status")]
    pub classification_status: ClassificationStatus,
    /// Error detail attached to fallback records for downstream visibility.
    #[serde(default)]
    pub status_note: Option<String>,
}

impl ClassificationRecord {
    fn default_status() -> ClassificationStatus {
        ClassificationStatus::Ok
    }

    /// Placeholder record for an attendee whose batch permanently failed.
    pub fn fallback(attendee: &AttendeeRecord, note: impl Into<String>) -> Self {
        Self {
            person_name: attendee.person_name(),
            industry_association: IndustryAssociation::Other,
            sub_category: SubCategory::NotALead,
            company_name: if attendee.organization.is_empty() {
                "Unknown".to_string()
            } else {
                attendee.organization.clone()
            },
            company_domain: attendee.company_domain(),
            classification_status: ClassificationStatus::Fallback,
            status_note: Some(note.into()),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.classification_status == ClassificationStatus::Fallback
    }
}
