//! End-to-end classification run

use super::aggregate::ResultAggregator;
use super::error::PipelineError;
use super::partition::partition;
use super::pool::WorkerPool;
use super::worker::BatchWorker;
use crate::attendee::AttendeeRecord;
use crate::config::RunConfig;
use crate::oracle::ClassificationOracle;
use crate::output::ClassificationRecord;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Composes partitioner, pool, workers and aggregator into one run.
///
/// Fails fast on configuration and input errors before any oracle call is
/// made; once dispatch has begun it always completes with one record per
/// attendee, even under total oracle failure.
pub struct Orchestrator {
    config: RunConfig,
    oracle: Arc<dyn ClassificationOracle>,
}

impl Orchestrator {
    pub fn new(config: RunConfig, oracle: Arc<dyn ClassificationOracle>) -> Self {
        Self { config, oracle }
    }

    pub async fn run(
        &self,
        attendees: &[AttendeeRecord],
    ) -> Result<Vec<ClassificationRecord>, PipelineError> {
        let start = Instant::now();

        self.config.validate()?;
        let batches = partition(attendees, self.config.batch_size)?;

        info!(
            attendees = attendees.len(),
            batches = batches.len(),
            batch_size = self.config.batch_size,
            max_workers = self.config.max_workers,
            oracle = self.oracle.name(),
            "starting classification run"
        );

        let aggregator = ResultAggregator::new(&batches);
        let worker = Arc::new(BatchWorker::new(
            Arc::clone(&self.oracle),
            self.config.max_retries,
            self.config.retry_base_delay,
        ));

        WorkerPool::new(self.config.max_workers)
            .run(worker, batches, &aggregator)
            .await?;

        let results = aggregator.finish()?;
        let fallbacks = results.iter().filter(|r| r.is_fallback()).count();

        info!(
            results = results.len(),
            fallbacks,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "classification run complete"
        );

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attendee::Batch;
    use crate::oracle::OracleError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingOracle {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ClassificationOracle for CountingOracle {
        async fn classify(
            &self,
            _batch: &Batch,
        ) -> Result<Vec<ClassificationRecord>, OracleError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(OracleError::transient("unused"))
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    fn attendees(n: usize) -> Vec<AttendeeRecord> {
        (0..n)
            .map(|i| AttendeeRecord::new("A", format!("{i}"), format!("a{i}@x.com"), "X"))
            .collect()
    }

    #[tokio::test]
    async fn test_invalid_config_fails_before_dispatch() {
        let oracle = Arc::new(CountingOracle {
            calls: AtomicUsize::new(0),
        });
        let config = RunConfig {
            max_workers: 0,
            ..RunConfig::default()
        };
        let orchestrator = Orchestrator::new(config, oracle.clone());

        let err = orchestrator.run(&attendees(5)).await.unwrap_err();
        assert!(matches!(err, PipelineError::InvalidConfig(_)));
        assert_eq!(oracle.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_input_fails_before_dispatch() {
        let oracle = Arc::new(CountingOracle {
            calls: AtomicUsize::new(0),
        });
        let orchestrator = Orchestrator::new(RunConfig::default(), oracle.clone());

        let err = orchestrator.run(&[]).await.unwrap_err();
        assert!(matches!(err, PipelineError::EmptyInput));
        assert_eq!(oracle.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_total_oracle_failure_still_yields_full_result() {
        let oracle = Arc::new(CountingOracle {
            calls: AtomicUsize::new(0),
        });
        let config = RunConfig {
            batch_size: 2,
            max_workers: 2,
            max_retries: 0,
            retry_base_delay: std::time::Duration::from_millis(1),
            ..RunConfig::default()
        };
        let orchestrator = Orchestrator::new(config, oracle);

        let results = orchestrator.run(&attendees(5)).await.unwrap();
        assert_eq!(results.len(), 5);
        assert!(results.iter().all(|r| r.is_fallback()));
    }
}
