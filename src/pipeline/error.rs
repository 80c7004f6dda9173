//! Fatal pipeline errors
//!
//! Batch-level failures are recovered into fallback records and never reach
//! this taxonomy; these errors abort the run with no partial result.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum PipelineError {
    /// Non-positive batch size or worker count. Rejected before dispatch.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// No attendees to classify. Fatal by policy.
    #[error("no attendees to classify")]
    EmptyInput,

    /// A result slot was left unfilled or filled twice after all batches
    /// reported. Indicates a partitioner/scheduler bug.
    #[error("aggregation integrity violation: {detail}")]
    AggregationIntegrity { detail: String },
}
