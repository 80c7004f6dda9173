//! Per-batch execution with retry and fallback

use crate::attendee::Batch;
use crate::oracle::{ClassificationOracle, OracleError};
use crate::output::ClassificationRecord;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Result of processing one batch. Produced exactly once per batch, after
/// retries are exhausted.
#[derive(Debug, Clone)]
pub enum BatchOutcome {
    Success {
        batch_index: usize,
        records: Vec<ClassificationRecord>,
    },
    Failure {
        batch_index: usize,
        error: OracleError,
        /// One placeholder record per attendee, so the aggregated result
        /// stays full-length no matter how the batch failed.
        fallback_records: Vec<ClassificationRecord>,
    },
}

impl BatchOutcome {
    pub fn failure(batch: &Batch, error: OracleError) -> Self {
        let note = format!("classification failed: {error}");
        BatchOutcome::Failure {
            batch_index: batch.index,
            fallback_records: batch
                .attendees
                .iter()
                .map(|a| ClassificationRecord::fallback(a, note.clone()))
                .collect(),
            error,
        }
    }

    pub fn batch_index(&self) -> usize {
        match self {
            BatchOutcome::Success { batch_index, .. } => *batch_index,
            BatchOutcome::Failure { batch_index, .. } => *batch_index,
        }
    }

    pub fn records(&self) -> &[ClassificationRecord] {
        match self {
            BatchOutcome::Success { records, .. } => records,
            BatchOutcome::Failure {
                fallback_records, ..
            } => fallback_records,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, BatchOutcome::Success { .. })
    }
}

/// Drives a single batch through the oracle.
///
/// Transient and malformed failures are retried up to `max_retries` times
/// with exponential backoff; exhaustion yields a `Failure` outcome carrying
/// fallback records. The worker owns its batch and touches no shared state.
pub struct BatchWorker {
    oracle: Arc<dyn ClassificationOracle>,
    max_retries: u32,
    retry_base_delay: Duration,
}

impl BatchWorker {
    pub fn new(
        oracle: Arc<dyn ClassificationOracle>,
        max_retries: u32,
        retry_base_delay: Duration,
    ) -> Self {
        Self {
            oracle,
            max_retries,
            retry_base_delay,
        }
    }

    /// Delay before retry `attempt` (1-based): base * 2^(attempt-1).
    fn backoff_delay(&self, attempt: u32) -> Duration {
        self.retry_base_delay * 2u32.saturating_pow(attempt.saturating_sub(1))
    }

    pub async fn run(&self, batch: Batch) -> BatchOutcome {
        let mut last_error = OracleError::transient("no attempt made");

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.backoff_delay(attempt);
                debug!(
                    batch_index = batch.index,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "backing off before retry"
                );
                tokio::time::sleep(delay).await;
            }

            match self.oracle.classify(&batch).await {
                Ok(records) if records.len() == batch.len() => {
                    debug!(
                        batch_index = batch.index,
                        attempt,
                        records = records.len(),
                        "batch classified"
                    );
                    return BatchOutcome::Success {
                        batch_index: batch.index,
                        records,
                    };
                }
                Ok(records) => {
                    // Never partially trust a mismatched response.
                    last_error = OracleError::malformed(format!(
                        "expected {} records, oracle returned {}",
                        batch.len(),
                        records.len()
                    ));
                    warn!(
                        batch_index = batch.index,
                        attempt,
                        error = %last_error,
                        "oracle response length mismatch"
                    );
                }
                Err(error) => {
                    warn!(
                        batch_index = batch.index,
                        attempt,
                        kind = error.kind(),
                        error = %error,
                        "oracle invocation failed"
                    );
                    last_error = error;
                }
            }
        }

        warn!(
            batch_index = batch.index,
            retries = self.max_retries,
            error = %last_error,
            "retries exhausted, emitting fallback records"
        );
        BatchOutcome::failure(&batch, last_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attendee::AttendeeRecord;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Oracle stub driven by a script of per-call results.
    struct ScriptedOracle {
        script: Mutex<Vec<Result<Vec<ClassificationRecord>, OracleError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedOracle {
        fn new(script: Vec<Result<Vec<ClassificationRecord>, OracleError>>) -> Self {
            Self {
                script: Mutex::new(script),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ClassificationOracle for ScriptedOracle {
        async fn classify(
            &self,
            _batch: &Batch,
        ) -> Result<Vec<ClassificationRecord>, OracleError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut script = self.script.lock().unwrap();
            if script.is_empty() {
                return Err(OracleError::transient("script exhausted"));
            }
            script.remove(0)
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn batch(n: usize) -> Batch {
        Batch {
            index: 0,
            attendees: (0..n)
                .map(|i| {
                    AttendeeRecord::new(
                        format!("First{i}"),
                        format!("Last{i}"),
                        format!("a{i}@acme.com"),
                        "Acme",
                    )
                })
                .collect(),
        }
    }

    fn ok_records(batch: &Batch) -> Vec<ClassificationRecord> {
        batch
            .attendees
            .iter()
            .map(|a| ClassificationRecord {
                person_name: a.person_name(),
                industry_association: crate::output::IndustryAssociation::Pharmaceutical,
                sub_category: crate::output::SubCategory::Pharma,
                company_name: a.organization.clone(),
                company_domain: a.company_domain(),
                classification_status: crate::output::ClassificationStatus::Ok,
                status_note: None,
            })
            .collect()
    }

    fn worker(oracle: Arc<dyn ClassificationOracle>, max_retries: u32) -> BatchWorker {
        BatchWorker::new(oracle, max_retries, Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_success_first_attempt() {
        let b = batch(3);
        let oracle = Arc::new(ScriptedOracle::new(vec![Ok(ok_records(&b))]));
        let outcome = worker(oracle.clone(), 2).run(b).await;

        assert!(outcome.is_success());
        assert_eq!(outcome.records().len(), 3);
        assert_eq!(oracle.calls(), 1);
    }

    #[tokio::test]
    async fn test_transient_then_success() {
        let b = batch(2);
        let oracle = Arc::new(ScriptedOracle::new(vec![
            Err(OracleError::transient("rate limited")),
            Ok(ok_records(&b)),
        ]));
        let outcome = worker(oracle.clone(), 2).run(b).await;

        assert!(outcome.is_success());
        assert_eq!(oracle.calls(), 2);
    }

    #[tokio::test]
    async fn test_retries_exhausted_yields_fallback() {
        let b = batch(3);
        let oracle = Arc::new(ScriptedOracle::new(vec![
            Err(OracleError::transient("down")),
            Err(OracleError::transient("down")),
            Err(OracleError::transient("down")),
        ]));
        let outcome = worker(oracle.clone(), 2).run(b).await;

        // 1 initial attempt + 2 retries
        assert_eq!(oracle.calls(), 3);
        assert!(!outcome.is_success());
        assert_eq!(outcome.records().len(), 3);
        assert!(outcome.records().iter().all(|r| r.is_fallback()));
    }

    #[tokio::test]
    async fn test_length_mismatch_is_retried() {
        let b = batch(3);
        let short = ok_records(&batch(2));
        let oracle = Arc::new(ScriptedOracle::new(vec![Ok(short), Ok(ok_records(&b))]));
        let outcome = worker(oracle.clone(), 2).run(b).await;

        assert!(outcome.is_success());
        assert_eq!(oracle.calls(), 2);
        assert_eq!(outcome.records().len(), 3);
    }

    #[tokio::test]
    async fn test_zero_retries() {
        let b = batch(1);
        let oracle = Arc::new(ScriptedOracle::new(vec![Err(OracleError::malformed(
            "garbage",
        ))]));
        let outcome = worker(oracle.clone(), 0).run(b).await;

        assert_eq!(oracle.calls(), 1);
        assert!(!outcome.is_success());
        assert_eq!(outcome.records().len(), 1);
    }

    #[test]
    fn test_backoff_doubles() {
        let oracle = Arc::new(ScriptedOracle::new(vec![]));
        let w = BatchWorker::new(oracle, 3, Duration::from_millis(100));
        assert_eq!(w.backoff_delay(1), Duration::from_millis(100));
        assert_eq!(w.backoff_delay(2), Duration::from_millis(200));
        assert_eq!(w.backoff_delay(3), Duration::from_millis(400));
    }
}
