//! Concurrent batch classification pipeline
//!
//! The pipeline partitions the attendee list into fixed-size batches, runs
//! them through the oracle on a bounded worker pool, and merges the per-batch
//! outcomes back into input order. Per-batch failures are isolated into
//! fallback records; only configuration, input and integrity errors abort a
//! run.

mod aggregate;
mod error;
mod orchestrator;
mod partition;
mod pool;
mod worker;

pub use aggregate::ResultAggregator;
pub use error::PipelineError;
pub use orchestrator::Orchestrator;
pub use partition::partition;
pub use pool::WorkerPool;
pub use worker::{BatchOutcome, BatchWorker};
