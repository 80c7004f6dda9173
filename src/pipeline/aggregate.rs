//! Order-restoring result aggregation
//!
//! Batches complete in arbitrary order; the aggregator owns a pre-sized slot
//! store indexed by global attendee position, so restoring input order is
//! structural rather than dependent on completion sequencing. The store is
//! the pipeline's only shared mutable state, guarded by a single lock held
//! just for the duration of each write.

use super::error::PipelineError;
use super::worker::BatchOutcome;
use crate::attendee::Batch;
use crate::output::ClassificationRecord;
use std::sync::Mutex;

pub struct ResultAggregator {
    slots: Mutex<Vec<Option<ClassificationRecord>>>,
    /// Global slot offset of each batch, by batch index.
    offsets: Vec<usize>,
}

impl ResultAggregator {
    /// Builds a slot store sized to the partition's total attendee count.
    pub fn new(batches: &[Batch]) -> Self {
        let mut offsets = Vec::with_capacity(batches.len());
        let mut total = 0;
        for batch in batches {
            offsets.push(total);
            total += batch.len();
        }
        Self {
            slots: Mutex::new(vec![None; total]),
            offsets,
        }
    }

    /// Writes one batch outcome into its slots.
    ///
    /// Double-filling a slot or writing past the store means the partitioner
    /// or scheduler misbehaved; both surface as `AggregationIntegrity`.
    pub fn record(&self, outcome: BatchOutcome) -> Result<(), PipelineError> {
        let batch_index = outcome.batch_index();
        let start = *self.offsets.get(batch_index).ok_or_else(|| {
            PipelineError::AggregationIntegrity {
                detail: format!("outcome for unknown batch index {batch_index}"),
            }
        })?;

        let records = match outcome {
            BatchOutcome::Success { records, .. } => records,
            BatchOutcome::Failure {
                fallback_records, ..
            } => fallback_records,
        };

        let mut slots = self.slots.lock().unwrap();
        if start + records.len() > slots.len() {
            return Err(PipelineError::AggregationIntegrity {
                detail: format!(
                    "batch {batch_index} writes past the slot store ({} records at offset {start}, {} slots)",
                    records.len(),
                    slots.len()
                ),
            });
        }
        for (i, record) in records.into_iter().enumerate() {
            let slot = &mut slots[start + i];
            if slot.is_some() {
                return Err(PipelineError::AggregationIntegrity {
                    detail: format!("slot {} filled twice (batch {batch_index})", start + i),
                });
            }
            *slot = Some(record);
        }
        Ok(())
    }

    /// Verifies every slot was filled exactly once and yields the aggregated
    /// result in original input order.
    pub fn finish(self) -> Result<Vec<ClassificationRecord>, PipelineError> {
        let slots = self.slots.into_inner().unwrap();
        slots
            .into_iter()
            .enumerate()
            .map(|(position, slot)| {
                slot.ok_or_else(|| PipelineError::AggregationIntegrity {
                    detail: format!("slot {position} left unfilled"),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attendee::AttendeeRecord;
    use crate::oracle::OracleError;
    use crate::pipeline::partition;

    fn attendees(n: usize) -> Vec<AttendeeRecord> {
        (0..n)
            .map(|i| {
                AttendeeRecord::new(
                    format!("First{i}"),
                    format!("Last{i}"),
                    format!("a{i}@acme.com"),
                    "Acme",
                )
            })
            .collect()
    }

    fn success_outcome(batch: &Batch) -> BatchOutcome {
        BatchOutcome::Success {
            batch_index: batch.index,
            records: batch
                .attendees
                .iter()
                .map(|a| ClassificationRecord::fallback(a, "test"))
                .collect(),
        }
    }

    #[test]
    fn test_out_of_order_completion_restores_input_order() {
        let input = attendees(7);
        let batches = partition(&input, 3).unwrap();
        let aggregator = ResultAggregator::new(&batches);

        // Report batches in reverse completion order.
        for batch in batches.iter().rev() {
            aggregator.record(success_outcome(batch)).unwrap();
        }

        let results = aggregator.finish().unwrap();
        assert_eq!(results.len(), 7);
        for (i, record) in results.iter().enumerate() {
            assert_eq!(record.person_name, format!("First{i} Last{i}"));
        }
    }

    #[test]
    fn test_failure_outcome_fills_slots() {
        let input = attendees(4);
        let batches = partition(&input, 2).unwrap();
        let aggregator = ResultAggregator::new(&batches);

        aggregator.record(success_outcome(&batches[0])).unwrap();
        aggregator
            .record(BatchOutcome::failure(
                &batches[1],
                OracleError::transient("down"),
            ))
            .unwrap();

        let results = aggregator.finish().unwrap();
        assert_eq!(results.len(), 4);
    }

    #[test]
    fn test_double_fill_detected() {
        let input = attendees(3);
        let batches = partition(&input, 3).unwrap();
        let aggregator = ResultAggregator::new(&batches);

        aggregator.record(success_outcome(&batches[0])).unwrap();
        let err = aggregator.record(success_outcome(&batches[0])).unwrap_err();
        assert!(matches!(err, PipelineError::AggregationIntegrity { .. }));
    }

    #[test]
    fn test_unfilled_slot_detected() {
        let input = attendees(6);
        let batches = partition(&input, 3).unwrap();
        let aggregator = ResultAggregator::new(&batches);

        aggregator.record(success_outcome(&batches[0])).unwrap();
        let err = aggregator.finish().unwrap_err();
        assert!(matches!(err, PipelineError::AggregationIntegrity { .. }));
    }

    #[test]
    fn test_unknown_batch_index_detected() {
        let input = attendees(3);
        let batches = partition(&input, 3).unwrap();
        let aggregator = ResultAggregator::new(&batches);

        let mut rogue = batches[0].clone();
        rogue.index = 9;
        let err = aggregator.record(success_outcome(&rogue)).unwrap_err();
        assert!(matches!(err, PipelineError::AggregationIntegrity { .. }));
    }
}
