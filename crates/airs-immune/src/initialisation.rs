//! Model initialisation: seeding the evolving pool.

use airs_core::cell::Cell;
use airs_core::error::{AirsError, Result};
use airs_core::types::Dataset;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How seed cells are drawn from the training set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ModelInitialisation {
    /// Copy a training record picked uniformly at random, unmutated.
    #[default]
    RandomInstances,
}

impl ModelInitialisation {
    /// Produce one seed cell. Deterministic for a fixed RNG stream.
    pub fn generate_cell<R: Rng + ?Sized>(&self, dataset: &Dataset, rng: &mut R) -> Result<Cell> {
        match self {
            ModelInitialisation::RandomInstances => {
                if dataset.is_empty() {
                    return Err(AirsError::EmptyDataset);
                }
                let index = rng.gen_range(0..dataset.len());
                Cell::from_record(&dataset.records()[index], dataset.schema())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airs_core::types::Schema;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn dataset() -> Dataset {
        let schema = Schema::builder()
            .numeric("x")
            .class("label", 2)
            .build()
            .unwrap();
        let records = (0..20).map(|i| vec![i as f64 / 20.0, (i % 2) as f64]).collect();
        Dataset::from_records(schema, records).unwrap()
    }

    #[test]
    fn seed_cell_is_a_training_record() {
        let data = dataset();
        let mut rng = StdRng::seed_from_u64(7);
        let cell = ModelInitialisation::RandomInstances
            .generate_cell(&data, &mut rng)
            .unwrap();
        assert!(data.records().iter().any(|r| r.as_slice() == cell.values()));
        assert_eq!(cell.stimulation(), 0.0);
    }

    #[test]
    fn same_seed_same_cell() {
        let data = dataset();
        let init = ModelInitialisation::RandomInstances;
        let a = init.generate_cell(&data, &mut StdRng::seed_from_u64(11)).unwrap();
        let b = init.generate_cell(&data, &mut StdRng::seed_from_u64(11)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_dataset_is_an_error() {
        let data = Dataset::new(dataset().schema().clone());
        let err = ModelInitialisation::RandomInstances
            .generate_cell(&data, &mut StdRng::seed_from_u64(1))
            .unwrap_err();
        assert_eq!(err, AirsError::EmptyDataset);
    }
}
