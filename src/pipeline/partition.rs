//! Batch partitioning

use super::error::PipelineError;
use crate::attendee::{AttendeeRecord, Batch};

/// Splits the attendee list into batches of at most `batch_size`, preserving
/// input order. Every batch except the last has exactly `batch_size`
/// attendees; indices count from 0 in input order.
///
/// Pure and deterministic. Fails with `InvalidConfig` when `batch_size` is
/// zero and with `EmptyInput` when there are no attendees.
pub fn partition(
    attendees: &[AttendeeRecord],
    batch_size: usize,
) -> Result<Vec<Batch>, PipelineError> {
    if batch_size == 0 {
        return Err(PipelineError::InvalidConfig(
            "batch_size must be positive".to_string(),
        ));
    }
    if attendees.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    Ok(attendees
        .chunks(batch_size)
        .enumerate()
        .map(|(index, chunk)| Batch {
            index,
            attendees: chunk.to_vec(),
        })
        .collect())
}
