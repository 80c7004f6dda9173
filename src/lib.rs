//! confsift - LLM-powered conference attendee classification
//!
//! This library classifies conference attendee lists against
//! pharmaceutical/healthcare lead categories by dispatching fixed-size
//! attendee batches to an LLM with bounded concurrency, then merging
//! per-batch results back into input order.
//!
//! # Core Concepts
//!
//! - **Oracle**: the external classification capability, invoked once per
//!   batch through the [`oracle::ClassificationOracle`] trait. The shipped
//!   implementation prompts an LLM; tests use deterministic stubs.
//! - **Pipeline**: partitioner, bounded worker pool, per-batch retry and
//!   order-restoring aggregation. A failed batch degrades into flagged
//!   fallback records instead of aborting the run.
//! - **LLM backends**: pluggable providers behind the [`llm::LLMClient`]
//!   trait (GenAI multi-provider, mock for tests).
//!
//! # Example
//!
//! ```no_run
//! use confsift::config::RunConfig;
//! use confsift::llm::GenAIClient;
//! use confsift::oracle::LlmOracle;
//! use confsift::pipeline::Orchestrator;
//! use confsift::input::load_attendees;
//! use genai::adapter::AdapterKind;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let attendees = load_attendees(Path::new("attendees.csv"))?;
//!
//! let config = RunConfig::default();
//! let client = Arc::new(GenAIClient::new(
//!     AdapterKind::OpenAI,
//!     "gpt-4o-mini".to_string(),
//!     config.request_timeout,
//! ));
//! let orchestrator = Orchestrator::new(config, Arc::new(LlmOracle::new(client)));
//!
//! let results = orchestrator.run(&attendees).await?;
//! assert_eq!(results.len(), attendees.len());
//! # Ok(())
//! # }
//! ```

pub mod attendee;
pub mod cli;
pub mod config;
pub mod input;
pub mod llm;
pub mod oracle;
pub mod output;
pub mod pipeline;
pub mod util;

// Re-export key types for convenient access
pub use attendee::{AttendeeRecord, Batch};
pub use config::RunConfig;
pub use llm::LLMClient;
pub use oracle::ClassificationOracle;
pub use output::{ClassificationRecord, ClassificationStatus, IndustryAssociation, SubCategory};
pub use pipeline::{Orchestrator, PipelineError};
pub use util::logging::init_default;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
