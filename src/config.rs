//! Run configuration
//!
//! Tunables for a classification run. Defaults mirror the CLI defaults
//! (batches of 3, 3 concurrent workers, 2 retries). Oracle credentials are
//! not carried here; the oracle client is constructed and injected
//! explicitly by the caller.

use crate::pipeline::PipelineError;
use std::time::Duration;

const DEFAULT_BATCH_SIZE: usize = 3;
const DEFAULT_MAX_WORKERS: usize = 3;
const DEFAULT_MAX_RETRIES: u32 = 2;
const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 500;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Attendees per batch (one oracle invocation per batch).
    pub batch_size: usize,
    /// Maximum batches processed concurrently.
    pub max_workers: usize,
    /// Retries per batch after the initial attempt.
    pub max_retries: u32,
    /// First backoff delay; doubles per retry.
    pub retry_base_delay: Duration,
    /// Per-request timeout for the oracle backend.
    pub request_timeout: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            max_workers: DEFAULT_MAX_WORKERS,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_base_delay: Duration::from_millis(DEFAULT_RETRY_BASE_DELAY_MS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl RunConfig {
    /// Rejects non-positive sizing before any dispatch happens.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.batch_size == 0 {
            return Err(PipelineError::InvalidConfig(
                "batch_size must be positive".to_string(),
            ));
        }
        if self.max_workers == 0 {
            return Err(PipelineError::InvalidConfig(
                "max_workers must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
