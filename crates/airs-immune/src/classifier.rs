//! k-nearest-neighbour majority vote over a merged memory pool.
//!
//! The classifier owns its pool and never changes it. It compares records in
//! whatever representation it is handed; callers that trained on normalised
//! data must normalise queries the same way first.

use airs_core::affinity::AffinityFunction;
use airs_core::cell::Cell;
use airs_core::error::{AirsError, Result};
use serde::{Deserialize, Serialize};

/// One of the nearest memory cells to a query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Neighbour {
    /// Index of the cell in the classifier's pool.
    pub index: usize,
    pub affinity: f64,
    pub class_value: usize,
}

#[derive(Deserialize)]
struct KnnClassifierRaw {
    k: usize,
    affinity: AffinityFunction,
    pool: Vec<Cell>,
    num_classes: usize,
}

/// A persisted classifier is checked like a freshly built one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "KnnClassifierRaw")]
pub struct KnnClassifier {
    k: usize,
    affinity: AffinityFunction,
    pool: Vec<Cell>,
    num_classes: usize,
}

impl TryFrom<KnnClassifierRaw> for KnnClassifier {
    type Error = AirsError;

    fn try_from(raw: KnnClassifierRaw) -> Result<Self> {
        KnnClassifier::new(raw.k, raw.affinity, raw.pool, raw.num_classes)
    }
}

impl KnnClassifier {
    /// Wrap a merged pool. `k` must be at least 1 and every cell must match
    /// the affinity's layout with a class code below `num_classes`.
    pub fn new(
        k: usize,
        affinity: AffinityFunction,
        pool: Vec<Cell>,
        num_classes: usize,
    ) -> Result<Self> {
        if k == 0 {
            return Err(AirsError::configuration("k", k, "must be at least 1"));
        }
        for cell in &pool {
            if cell.len() != affinity.len() {
                return Err(AirsError::schema_mismatch(
                    cell.len().min(affinity.len()),
                    format!(
                        "memory cell has {} attributes, affinity expects {}",
                        cell.len(),
                        affinity.len()
                    ),
                ));
            }
            if cell.class_value() >= num_classes {
                return Err(AirsError::schema_mismatch(
                    cell.class_position(),
                    format!(
                        "memory cell class {} outside {} classes",
                        cell.class_value(),
                        num_classes
                    ),
                ));
            }
        }
        Ok(Self {
            k,
            affinity,
            pool,
            num_classes,
        })
    }

    /// Predict the class code of `record`.
    pub fn classify(&self, record: &[f64]) -> Result<usize> {
        if self.pool.is_empty() {
            return Err(AirsError::EmptyPool);
        }
        let neighbours = self.nearest(record, self.k)?;
        let classes: Vec<usize> = neighbours.iter().map(|n| n.class_value).collect();
        Ok(majority_vote(&classes, self.num_classes))
    }

    /// The `k` affinity-nearest cells, closest first. Equal affinities keep
    /// pool order.
    pub fn nearest(&self, record: &[f64], k: usize) -> Result<Vec<Neighbour>> {
        let mut neighbours = Vec::with_capacity(self.pool.len());
        for (index, cell) in self.pool.iter().enumerate() {
            neighbours.push(Neighbour {
                index,
                affinity: self.affinity.affinity(record, cell.values())?,
                class_value: cell.class_value(),
            });
        }
        neighbours.sort_by(|a, b| a.affinity.total_cmp(&b.affinity));
        neighbours.truncate(k);
        Ok(neighbours)
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn affinity(&self) -> &AffinityFunction {
        &self.affinity
    }

    pub fn pool(&self) -> &[Cell] {
        &self.pool
    }

    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }
}

/// Most frequent class among `classes`.
///
/// Classes are scanned in ascending order and the leader only changes on a
/// strict increase, so ties go to the lowest class index.
pub fn majority_vote(classes: &[usize], num_classes: usize) -> usize {
    let slots = classes
        .iter()
        .map(|&c| c + 1)
        .max()
        .unwrap_or(0)
        .max(num_classes);
    let mut counts = vec![0usize; slots];
    for &class in classes {
        counts[class] += 1;
    }

    let mut leader = 0;
    let mut leader_count = 0;
    for (class, &count) in counts.iter().enumerate() {
        if count > leader_count {
            leader = class;
            leader_count = count;
        }
    }
    leader
}
