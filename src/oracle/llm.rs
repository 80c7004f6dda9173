//! LLM-backed classification oracle

use super::parse::parse_classification_response;
use super::{ClassificationOracle, OracleError};
use crate::attendee::Batch;
use crate::llm::{BackendError, ChatMessage, LLMClient, LLMRequest};
use crate::output::ClassificationRecord;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

const SYSTEM_PROMPT: &str = "You are a pharmaceutical industry analyst. You determine whether \
conference attendees are associated with the pharmaceutical industry and which medical \
sub-specialty they work in. You answer with JSON only, no commentary.";

// Generous per-attendee allowance so long batch responses are not truncated
// mid-array.
const MAX_TOKENS_PER_ATTENDEE: u32 = 256;
const MAX_TOKENS_BASE: u32 = 512;

/// `ClassificationOracle` implementation that prompts an LLM once per batch
/// and strictly parses the JSON reply.
pub struct LlmOracle {
    client: Arc<dyn LLMClient>,
}

/// Attendee view embedded in the prompt.
#[derive(Serialize)]
struct PromptAttendee<'a> {
    person_name: String,
    organization: &'a str,
    email: &'a str,
    company_domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    research_context: Option<&'a str>,
}

impl LlmOracle {
    pub fn new(client: Arc<dyn LLMClient>) -> Self {
        Self { client }
    }

    fn build_prompt(batch: &Batch) -> Result<String, OracleError> {
        let attendees: Vec<PromptAttendee<'_>> = batch
            .attendees
            .iter()
            .map(|a| PromptAttendee {
                person_name: a.person_name(),
                organization: &a.organization,
                email: &a.email,
                company_domain: a.company_domain(),
                research_context: a.research_context.as_deref(),
            })
            .collect();

        let attendees_json = serde_json::to_string_pretty(&attendees)
            .map_err(|e| OracleError::malformed(format!("failed to encode batch: {e}")))?;

        Ok(format!(
            "Analyze the following {count} conference attendees and classify each one.\n\n\
             Attendees:\n{attendees_json}\n\n\
             For every attendee decide:\n\
             - industry_association: \"Pharmaceutical\", \"Healthcare\" or \"Other\"\n\
             - sub_category: \"Pharma\", \"Oncology\", \"Women's Health\", \"Organ Studies\" or \"Not a Lead\"\n\
             - company_name: the attendee's organization (use the email domain if unknown)\n\
             - company_domain: the domain from the attendee's email\n\n\
             Respond with a JSON array of exactly {count} objects, one per attendee, in the \
             same order as the input. Each object must have the keys person_name, \
             industry_association, sub_category, company_name and company_domain. \
             Output the JSON array and nothing else.",
            count = batch.len(),
        ))
    }

    fn map_backend_error(error: BackendError) -> OracleError {
        match error {
            BackendError::InvalidResponse { message } => OracleError::malformed(message),
            other => OracleError::transient(other.to_string()),
        }
    }
}

#[async_trait]
impl ClassificationOracle for LlmOracle {
    async fn classify(&self, batch: &Batch) -> Result<Vec<ClassificationRecord>, OracleError> {
        let prompt = Self::build_prompt(batch)?;
        let max_tokens = MAX_TOKENS_BASE + MAX_TOKENS_PER_ATTENDEE * batch.len() as u32;

        let request = LLMRequest::new(vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(prompt),
        ])
        .with_temperature(0.1)
        .with_max_tokens(max_tokens);

        let response = self
            .client
            .chat(request)
            .await
            .map_err(Self::map_backend_error)?;

        debug!(
            batch_index = batch.index,
            response_ms = response.response_time.as_millis() as u64,
            "oracle response received"
        );

        parse_classification_response(&response.content)
    }

    fn name(&self) -> &str {
        self.client.name()
    }
}
