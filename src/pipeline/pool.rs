//! Bounded-concurrency batch scheduler
//!
//! Classic bounded worker pool: every batch is spawned as a task, a
//! semaphore caps how many run at once, and each completion admits the next
//! pending batch. Batch count may far exceed the worker cap. One batch's
//! failure never cancels another; even a panicked task is converted into a
//! fallback outcome so no batch is silently dropped.

use super::aggregate::ResultAggregator;
use super::error::PipelineError;
use super::worker::{BatchOutcome, BatchWorker};
use crate::attendee::Batch;
use crate::oracle::OracleError;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error};

pub struct WorkerPool {
    max_workers: usize,
}

impl WorkerPool {
    pub fn new(max_workers: usize) -> Self {
        Self { max_workers }
    }

    /// Runs every batch through the worker with at most `max_workers`
    /// executing concurrently, feeding each outcome to the aggregator as it
    /// completes. Completion order is unspecified; the aggregator's slot
    /// store restores input order.
    pub async fn run(
        &self,
        worker: Arc<BatchWorker>,
        batches: Vec<Batch>,
        aggregator: &ResultAggregator,
    ) -> Result<(), PipelineError> {
        let semaphore = Arc::new(Semaphore::new(self.max_workers));
        let mut tasks = JoinSet::new();
        // Shadow copies keyed by task id, so a panicked task can still be
        // turned into a full set of fallback records.
        let mut in_flight: HashMap<tokio::task::Id, Batch> = HashMap::new();

        for batch in batches {
            let semaphore = Arc::clone(&semaphore);
            let worker = Arc::clone(&worker);
            let shadow = batch.clone();
            let handle = tasks.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("pool semaphore is never closed");
                worker.run(batch).await
            });
            in_flight.insert(handle.id(), shadow);
        }

        while let Some(joined) = tasks.join_next().await {
            let outcome = match joined {
                Ok(outcome) => {
                    debug!(
                        batch_index = outcome.batch_index(),
                        success = outcome.is_success(),
                        "batch completed"
                    );
                    outcome
                }
                Err(join_error) => {
                    error!(error = %join_error, "batch task did not complete");
                    let batch = in_flight.get(&join_error.id()).ok_or_else(|| {
                        PipelineError::AggregationIntegrity {
                            detail: format!("untracked batch task failed: {join_error}"),
                        }
                    })?;
                    BatchOutcome::failure(
                        batch,
                        OracleError::transient(format!("batch task aborted: {join_error}")),
                    )
                }
            };
            aggregator.record(outcome)?;
        }

        Ok(())
    }
}
