//! Per-attribute distance measures.
//!
//! One measure is bound to each schema position. Numeric distance is the
//! squared difference, so a record-level affinity is a sum of squares (no
//! square root is ever taken).

use crate::error::{AirsError, Result};
use serde::{Deserialize, Serialize};

/// Distance between two values of a single attribute.
///
/// Every measure is symmetric and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeDistance {
    /// `(a - b)^2`.
    Numeric,
    /// `0.0` on exact match, `1.0` otherwise.
    Nominal,
    /// Always `0.0`: labels never contribute to affinity.
    Class,
    /// Always fails. Marks an attribute type that cannot be compared.
    Unsupported,
}

impl AttributeDistance {
    /// Distance between `a` and `b` at attribute `position`.
    pub fn distance(&self, position: usize, a: f64, b: f64) -> Result<f64> {
        match self {
            AttributeDistance::Numeric => {
                let d = a - b;
                Ok(d * d)
            }
            AttributeDistance::Nominal => Ok(if a == b { 0.0 } else { 1.0 }),
            AttributeDistance::Class => Ok(0.0),
            AttributeDistance::Unsupported => Err(AirsError::schema_mismatch(
                position,
                "attribute type has no distance measure",
            )),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, AttributeDistance::Numeric)
    }

    pub fn is_nominal(&self) -> bool {
        matches!(self, AttributeDistance::Nominal)
    }

    pub fn is_class(&self) -> bool {
        matches!(self, AttributeDistance::Class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_is_squared_and_symmetric() {
        let d = AttributeDistance::Numeric;
        assert_eq!(d.distance(0, 3.0, 5.0).unwrap(), 4.0);
        assert_eq!(d.distance(0, 5.0, 3.0).unwrap(), 4.0);
        assert_eq!(d.distance(0, 0.25, 0.25).unwrap(), 0.0);
    }

    #[test]
    fn nominal_is_match_or_mismatch() {
        let d = AttributeDistance::Nominal;
        assert_eq!(d.distance(0, 1.0, 1.0).unwrap(), 0.0);
        assert_eq!(d.distance(0, 1.0, 2.0).unwrap(), 1.0);
        assert_eq!(d.distance(0, 2.0, 1.0).unwrap(), 1.0);
    }

    #[test]
    fn class_never_contributes() {
        let d = AttributeDistance::Class;
        for (a, b) in [(0.0, 0.0), (0.0, 1.0), (4.0, 9.0)] {
            assert_eq!(d.distance(2, a, b).unwrap(), 0.0);
        }
    }

    #[test]
    fn unsupported_always_fails() {
        let d = AttributeDistance::Unsupported;
        for (a, b) in [(0.0, 0.0), (1.0, 2.0)] {
            let err = d.distance(7, a, b).unwrap_err();
            assert!(matches!(err, AirsError::SchemaMismatch { position: 7, .. }));
        }
    }

    #[test]
    fn predicates_report_kind() {
        assert!(AttributeDistance::Numeric.is_numeric());
        assert!(AttributeDistance::Nominal.is_nominal());
        assert!(AttributeDistance::Class.is_class());
        let u = AttributeDistance::Unsupported;
        assert!(!u.is_numeric() && !u.is_nominal() && !u.is_class());
    }
}
