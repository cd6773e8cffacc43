//! Min-max normalisation into the unit box.
//!
//! Stimulation-proportional mutation walks inside `[0, 1]`, so numeric
//! features are rescaled before training. Nominal and class codes pass
//! through unchanged.

use airs_core::error::{AirsError, Result};
use airs_core::types::{AttributeKind, Dataset};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxNormaliser {
    /// Observed `[min, max]` per numeric position; `None` elsewhere.
    ranges: Vec<Option<(f64, f64)>>,
}

impl MinMaxNormaliser {
    /// Record the observed range of every numeric attribute.
    pub fn fit(dataset: &Dataset) -> Result<Self> {
        if dataset.is_empty() {
            return Err(AirsError::EmptyDataset);
        }
        let ranges = dataset
            .schema()
            .attributes()
            .iter()
            .enumerate()
            .map(|(position, attribute)| match attribute.kind {
                AttributeKind::Numeric => Some(dataset.records().iter().map(|r| r[position]).fold(
                    (f64::MAX, f64::MIN),
                    |(lo, hi), v| (lo.min(v), hi.max(v)),
                )),
                _ => None,
            })
            .collect();
        Ok(Self { ranges })
    }

    /// Rescale numeric values to `[0, 1]`. Values outside the fitted range
    /// are clamped; constant columns map to `0.0`.
    pub fn transform(&self, record: &[f64]) -> Result<Vec<f64>> {
        if record.len() != self.ranges.len() {
            return Err(AirsError::schema_mismatch(
                record.len().min(self.ranges.len()),
                format!(
                    "record has {} values, normaliser was fitted on {}",
                    record.len(),
                    self.ranges.len()
                ),
            ));
        }
        Ok(record
            .iter()
            .zip(&self.ranges)
            .map(|(&value, range)| match range {
                Some((lo, hi)) if hi > lo => ((value - lo) / (hi - lo)).clamp(0.0, 1.0),
                Some(_) => 0.0,
                None => value,
            })
            .collect())
    }

    pub fn transform_dataset(&self, dataset: &Dataset) -> Result<Dataset> {
        dataset.map_records(|record| self.transform(record))
    }

    /// Per-position `[lo, hi]` bounds. Non-numeric positions report the unit
    /// interval; mutation never reads them.
    pub fn bounds(&self) -> Vec<(f64, f64)> {
        self.ranges
            .iter()
            .map(|range| range.unwrap_or((0.0, 1.0)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airs_core::types::Schema;

    fn data() -> Dataset {
        let schema = Schema::builder()
            .numeric("temp")
            .nominal("sky", 3)
            .numeric("constant")
            .class("play", 2)
            .build()
            .unwrap();
        Dataset::from_records(
            schema,
            vec![
                vec![10.0, 2.0, 5.0, 0.0],
                vec![30.0, 0.0, 5.0, 1.0],
                vec![20.0, 1.0, 5.0, 1.0],
            ],
        )
        .unwrap()
    }

    #[test]
    fn numeric_columns_scale_to_unit() {
        let n = MinMaxNormaliser::fit(&data()).unwrap();
        assert_eq!(n.transform(&[20.0, 2.0, 5.0, 1.0]).unwrap(), vec![0.5, 2.0, 0.0, 1.0]);
        assert_eq!(n.transform(&[50.0, 0.0, 9.0, 0.0]).unwrap()[0], 1.0);
        assert_eq!(n.transform(&[-5.0, 0.0, 9.0, 0.0]).unwrap()[0], 0.0);
    }

    #[test]
    fn bounds_report_observed_ranges() {
        let n = MinMaxNormaliser::fit(&data()).unwrap();
        assert_eq!(
            n.bounds(),
            vec![(10.0, 30.0), (0.0, 1.0), (5.0, 5.0), (0.0, 1.0)]
        );
    }

    #[test]
    fn dataset_transform_keeps_labels() {
        let d = data();
        let n = MinMaxNormaliser::fit(&d).unwrap();
        let scaled = n.transform_dataset(&d).unwrap();
        assert_eq!(scaled.len(), 3);
        assert_eq!(scaled.class_at(1), Some(1));
        assert_eq!(scaled.record(0).unwrap()[0], 0.0);
    }

    #[test]
    fn wrong_length_is_rejected() {
        let n = MinMaxNormaliser::fit(&data()).unwrap();
        assert!(n.transform(&[1.0, 2.0]).is_err());
    }
}
