//! Whole-record affinity.
//!
//! An `AffinityFunction` is bound to a schema once, holding one
//! [`AttributeDistance`] per position. Binding fails immediately if any
//! position has no usable distance, so a constructed function can only fail
//! later on records that do not fit the schema.

use crate::distance::AttributeDistance;
use crate::error::{AirsError, Result};
use crate::types::{AttributeKind, Schema};
use serde::{Deserialize, Serialize};

/// Sum of per-attribute distances between two records. Lower is more similar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffinityFunction {
    distances: Vec<AttributeDistance>,
}

impl AffinityFunction {
    /// Bind the default distances: squared difference for numeric
    /// attributes, exact match for nominal ones.
    pub fn new(schema: &Schema) -> Result<Self> {
        Self::with_distances(schema, AttributeDistance::Numeric, AttributeDistance::Nominal)
    }

    /// Bind configured distances for numeric and nominal positions.
    ///
    /// Each configured distance must report the kind of the position it is
    /// bound to.
    pub fn with_distances(
        schema: &Schema,
        numeric: AttributeDistance,
        nominal: AttributeDistance,
    ) -> Result<Self> {
        let mut distances = Vec::with_capacity(schema.len());
        for (position, attribute) in schema.attributes().iter().enumerate() {
            let bound = match &attribute.kind {
                AttributeKind::Numeric if numeric.is_numeric() => numeric,
                AttributeKind::Nominal { .. } if nominal.is_nominal() => nominal,
                AttributeKind::Class { .. } => AttributeDistance::Class,
                kind => {
                    return Err(AirsError::schema_mismatch(
                        position,
                        format!(
                            "no distance configured for {} attribute '{}'",
                            kind.type_name(),
                            attribute.name
                        ),
                    ))
                }
            };
            distances.push(bound);
        }
        Ok(Self { distances })
    }

    /// Affinity between two records of this schema.
    pub fn affinity(&self, a: &[f64], b: &[f64]) -> Result<f64> {
        if a.len() != self.distances.len() || b.len() != self.distances.len() {
            return Err(AirsError::schema_mismatch(
                a.len().min(b.len()),
                format!(
                    "records of length {} and {} compared with a {}-attribute affinity",
                    a.len(),
                    b.len(),
                    self.distances.len()
                ),
            ));
        }

        let mut total = 0.0;
        for (position, distance) in self.distances.iter().enumerate() {
            total += distance.distance(position, a[position], b[position])?;
        }
        Ok(total)
    }

    /// Largest affinity two unit-scaled records can have: one per
    /// comparable position.
    pub fn max_affinity(&self) -> f64 {
        self.distances.iter().filter(|d| !d.is_class()).count() as f64
    }

    /// Largest affinity inside per-position `[lo, hi]` bounds.
    pub fn max_affinity_within(&self, bounds: &[(f64, f64)]) -> Result<f64> {
        if bounds.len() != self.distances.len() {
            return Err(AirsError::schema_mismatch(
                bounds.len().min(self.distances.len()),
                format!(
                    "{} bounds supplied for {} attributes",
                    bounds.len(),
                    self.distances.len()
                ),
            ));
        }
        let mut total = 0.0;
        for (distance, (lo, hi)) in self.distances.iter().zip(bounds) {
            if distance.is_numeric() {
                total += (hi - lo) * (hi - lo);
            } else if distance.is_nominal() {
                total += 1.0;
            }
        }
        Ok(total)
    }

    pub fn distances(&self) -> &[AttributeDistance] {
        &self.distances
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}
