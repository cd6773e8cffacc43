//! A trained AIRS model: classifier plus the normalisation it was trained
//! under.

use crate::normalise::MinMaxNormaliser;
use crate::trainer::{AirsTrainer, TrainingReport};
use airs_core::error::Result;
use airs_core::types::Dataset;
use airs_immune::classifier::KnnClassifier;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Classification accuracy over a labeled dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Evaluation {
    pub correct: usize,
    pub total: usize,
    pub accuracy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirsModel {
    classifier: KnnClassifier,
    normaliser: Option<MinMaxNormaliser>,
}

impl AirsModel {
    /// Train on `dataset`, normalising it first when a normaliser is given.
    pub fn fit<R: Rng + ?Sized>(
        trainer: &AirsTrainer,
        dataset: &Dataset,
        normaliser: Option<MinMaxNormaliser>,
        rng: &mut R,
    ) -> Result<(Self, TrainingReport)> {
        let outcome = match &normaliser {
            Some(n) => trainer.train(&n.transform_dataset(dataset)?, rng)?,
            None => trainer.train(dataset, rng)?,
        };
        let model = Self {
            classifier: outcome.classifier,
            normaliser,
        };
        Ok((model, outcome.report))
    }

    pub fn from_parts(classifier: KnnClassifier, normaliser: Option<MinMaxNormaliser>) -> Self {
        Self {
            classifier,
            normaliser,
        }
    }

    /// Predict the class code of a raw record.
    pub fn predict(&self, record: &[f64]) -> Result<usize> {
        match &self.normaliser {
            Some(n) => self.classifier.classify(&n.transform(record)?),
            None => self.classifier.classify(record),
        }
    }

    pub fn evaluate(&self, dataset: &Dataset) -> Result<Evaluation> {
        let class_position = dataset.schema().class_position();
        let mut correct = 0;
        for record in dataset.records() {
            if self.predict(record)? == record[class_position] as usize {
                correct += 1;
            }
        }
        let total = dataset.len();
        let accuracy = if total == 0 {
            0.0
        } else {
            correct as f64 / total as f64
        };
        Ok(Evaluation {
            correct,
            total,
            accuracy,
        })
    }

    pub fn classifier(&self) -> &KnnClassifier {
        &self.classifier
    }

    pub fn normaliser(&self) -> Option<&MinMaxNormaliser> {
        self.normaliser.as_ref()
    }
}
