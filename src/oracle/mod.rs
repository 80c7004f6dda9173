//! Classification oracle interface
//!
//! The oracle is the external capability that classifies one batch of
//! attendees. The pipeline only depends on this trait, so any implementation
//! satisfying the contract works, including deterministic stubs in tests.

mod llm;
mod parse;

pub use llm::LlmOracle;
pub use parse::{extract_json_from_markdown, parse_classification_response};

use crate::attendee::Batch;
use crate::output::ClassificationRecord;
use async_trait::async_trait;
use thiserror::Error;

/// Errors an oracle invocation can produce.
///
/// Both kinds are retried uniformly by the batch worker; the distinction is
/// preserved for diagnostics.
#[derive(Debug, Clone, Error)]
pub enum OracleError {
    /// Timeout, rate limit, or network failure.
    #[error("transient oracle failure: {message}")]
    Transient { message: String },

    /// Unparseable or wrong-shape response.
    #[error("malformed oracle response: {message}")]
    Malformed { message: String },
}

impl OracleError {
    pub fn transient(message: impl Into<String>) -> Self {
        OracleError::Transient {
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        OracleError::Malformed {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            OracleError::Transient { .. } => "transient",
            OracleError::Malformed { .. } => "malformed",
        }
    }
}

/// External classification capability, invoked once per batch.
///
/// Implementations must be stateless across calls: no invocation may depend
/// on another's outcome, so batches can run in parallel.
#[async_trait]
pub trait ClassificationOracle: Send + Sync {
    /// Classifies every attendee in the batch, in batch order.
    ///
    /// A successful return must hold exactly one record per attendee; the
    /// batch worker rejects length mismatches as malformed.
    async fn classify(&self, batch: &Batch) -> Result<Vec<ClassificationRecord>, OracleError>;

    fn name(&self) -> &str;
}
