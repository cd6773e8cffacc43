//! Memory cell merging.
//!
//! Training keeps one pool per class so that classes never compete against
//! each other. Once every class is finished, the pools are merged into the
//! single pool the classifier reads from. Merging makes no fitness
//! decisions: everything that reaches it is kept.

use crate::classifier::KnnClassifier;
use airs_core::affinity::AffinityFunction;
use airs_core::cell::Cell;
use airs_core::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MemoryCellMerger {
    /// Concatenate the class pools in order. No de-duplication, no re-scoring.
    #[default]
    Concatenate,
}

impl MemoryCellMerger {
    /// Combine per-class pools and build a ready classifier.
    pub fn merge(
        &self,
        pools: Vec<Vec<Cell>>,
        k: usize,
        affinity: AffinityFunction,
        num_classes: usize,
    ) -> Result<KnnClassifier> {
        match self {
            MemoryCellMerger::Concatenate => {
                let total = pools.iter().map(Vec::len).sum();
                let mut master = Vec::with_capacity(total);
                for pool in pools {
                    master.extend(pool);
                }
                KnnClassifier::new(k, affinity, master, num_classes)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airs_core::error::AirsError;
    use airs_core::types::Schema;

    fn schema() -> Schema {
        Schema::builder()
            .numeric("x")
            .class("label", 3)
            .build()
            .unwrap()
    }

    fn pool(class: usize, size: usize) -> Vec<Cell> {
        (0..size)
            .map(|i| Cell::from_record(&[i as f64 / 10.0, class as f64], &schema()).unwrap())
            .collect()
    }

    #[test]
    fn concatenation_keeps_every_cell() {
        let pools = vec![pool(0, 3), pool(1, 5), pool(2, 2)];
        let expected: Vec<Cell> = pools.iter().flatten().cloned().collect();
        let affinity = AffinityFunction::new(&schema()).unwrap();

        let classifier = MemoryCellMerger::Concatenate
            .merge(pools, 4, affinity.clone(), 3)
            .unwrap();

        assert_eq!(classifier.len(), 10);
        assert_eq!(classifier.pool(), expected.as_slice());
        assert_eq!(classifier.k(), 4);
        assert_eq!(classifier.affinity(), &affinity);
    }

    #[test]
    fn merge_does_not_rescore() {
        let mut cells = pool(0, 2);
        cells[0].set_stimulation(0.3);
        cells[1].set_stimulation(0.8);
        let classifier = MemoryCellMerger::Concatenate
            .merge(vec![cells], 1, AffinityFunction::new(&schema()).unwrap(), 3)
            .unwrap();
        assert_eq!(classifier.pool()[0].stimulation(), 0.3);
        assert_eq!(classifier.pool()[1].stimulation(), 0.8);
    }

    #[test]
    fn merge_rejects_zero_k() {
        let err = MemoryCellMerger::Concatenate
            .merge(vec![pool(0, 1)], 0, AffinityFunction::new(&schema()).unwrap(), 3)
            .unwrap_err();
        assert!(matches!(err, AirsError::Configuration { .. }));
    }
}
