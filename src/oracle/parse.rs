//! Strict parsing of oracle responses
//!
//! LLMs wrap JSON in markdown fences and occasionally return prose around
//! it. The parse step strips fences, then requires a well-formed JSON array
//! of classification records; anything else is a malformed response that the
//! caller retries. Partially-parseable data is never salvaged.

use super::OracleError;
use crate::output::ClassificationRecord;

/// Returns the JSON payload inside a fenced code block, or the trimmed input
/// when no fence is present.
pub fn extract_json_from_markdown(content: &str) -> &str {
    let trimmed = content.trim();

    if let Some(start_idx) = trimmed.find("```json") {
        let after_fence = &trimmed[start_idx + 7..];
        if let Some(end_idx) = after_fence.find("```") {
            return after_fence[..end_idx].trim();
        }
    }

    if let Some(start_idx) = trimmed.find("```") {
        let after_fence = &trimmed[start_idx + 3..];
        if let Some(end_idx) = after_fence.find("```") {
            return after_fence[..end_idx].trim();
        }
    }

    trimmed
}

/// Parses the oracle's reply into classification records.
pub fn parse_classification_response(
    content: &str,
) -> Result<Vec<ClassificationRecord>, OracleError> {
    let json_content = extract_json_from_markdown(content);

    serde_json::from_str(json_content).map_err(|e| {
        let preview: String = json_content.chars().take(200).collect();
        OracleError::malformed(format!("{e} (response starts with: {preview:?})"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{IndustryAssociation, SubCategory};

    const VALID_ARRAY: &str = r#"[
        {
            "person_name": "Jane Doe",
            "industry_association": "Pharmaceutical",
            "sub_category": "Oncology",
            "company_name": "Acme Pharma",
            "company_domain": "acmepharma.com"
        }
    ]"#;

    #[test]
    fn test_extract_plain_json() {
        assert_eq!(extract_json_from_markdown("  [1, 2]  "), "[1, 2]");
    }

    #[test]
    fn test_extract_json_fence() {
        let content = "Here you go:\n```json\n[1, 2]\n```\nDone.";
        assert_eq!(extract_json_from_markdown(content), "[1, 2]");
    }

    #[test]
    fn test_extract_bare_fence() {
        let content = "```\n[1, 2]\n```";
        assert_eq!(extract_json_from_markdown(content), "[1, 2]");
    }

    #[test]
    fn test_parse_valid_response() {
        let records = parse_classification_response(VALID_ARRAY).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].person_name, "Jane Doe");
        assert_eq!(
            records[0].industry_association,
            IndustryAssociation::Pharmaceutical
        );
        assert_eq!(records[0].sub_category, SubCategory::Oncology);
    }

    #[test]
    fn test_parse_fenced_response() {
        let fenced = format!("```json\n{VALID_ARRAY}\n```");
        let records = parse_classification_response(&fenced).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_parse_garbage_is_malformed() {
        let err = parse_classification_response("I could not classify anyone.").unwrap_err();
        assert_eq!(err.kind(), "malformed");
    }

    #[test]
    fn test_parse_wrong_shape_is_malformed() {
        let err = parse_classification_response(r#"{"person_name": "Jane"}"#).unwrap_err();
        assert_eq!(err.kind(), "malformed");
    }

    #[test]
    fn test_parse_unknown_category_is_malformed() {
        let bad = r#"[{
            "person_name": "Jane Doe",
            "industry_association": "Biotech",
            "sub_category": "Oncology",
            "company_name": "Acme",
            "company_domain": "acme.com"
        }]"#;
        let err = parse_classification_response(bad).unwrap_err();
        assert_eq!(err.kind(), "malformed");
    }
}
