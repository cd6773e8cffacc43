//! Sample generators: clone-then-mutate strategies.
//!
//! Every generator takes an immutable parent and returns a new cell. The
//! class attribute is never touched.
//!
//! Biological analog: somatic hypermutation. Clones of a stimulated B-cell
//! mutate at a rate inversely related to how well the parent already binds
//! the antigen, so well-fitted cells only explore a small neighbourhood.

use airs_core::cell::Cell;
use airs_core::error::{AirsError, Result};
use airs_core::types::{AttributeKind, Schema};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Strategy for producing mutated offspring of a cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum SampleGenerator {
    /// Each non-class attribute is re-drawn with probability `mutation_rate`;
    /// the scan repeats until at least one attribute was re-drawn.
    RandomMutate { mutation_rate: f64 },
    /// Affinity maturation in the unit box: each numeric attribute walks
    /// within a window of width `1 - stimulation` centred on its value.
    #[default]
    StimulationProportional,
    /// The same walk, clamped to per-attribute `[lo, hi]` bounds.
    RangeBounded { bounds: Vec<(f64, f64)> },
}

impl SampleGenerator {
    /// Uniform random mutation. The rate must lie in `(0, 1]`.
    pub fn random_mutate(mutation_rate: f64) -> Result<Self> {
        if !(mutation_rate > 0.0 && mutation_rate <= 1.0) {
            return Err(AirsError::configuration(
                "mutation_rate",
                mutation_rate,
                "must be in (0, 1]",
            ));
        }
        Ok(SampleGenerator::RandomMutate { mutation_rate })
    }

    /// Range-bounded affinity maturation. Every bound must be finite with
    /// `lo <= hi`.
    pub fn range_bounded(bounds: Vec<(f64, f64)>) -> Result<Self> {
        for (position, (lo, hi)) in bounds.iter().enumerate() {
            if !lo.is_finite() || !hi.is_finite() || lo > hi {
                return Err(AirsError::configuration(
                    "bounds",
                    format!("[{}, {}] at attribute {}", lo, hi, position),
                    "bounds must be finite with lo <= hi",
                ));
            }
        }
        Ok(SampleGenerator::RangeBounded { bounds })
    }

    /// Produce one mutated child of `parent`.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        parent: &Cell,
        schema: &Schema,
        rng: &mut R,
    ) -> Result<Cell> {
        if parent.len() != schema.len() {
            return Err(AirsError::schema_mismatch(
                parent.len().min(schema.len()),
                format!(
                    "cell has {} attributes, schema has {}",
                    parent.len(),
                    schema.len()
                ),
            ));
        }

        let mut child = parent.clone();
        match self {
            SampleGenerator::RandomMutate { mutation_rate } => {
                check_mutable(schema)?;
                while random_pass(&mut child, schema, *mutation_rate, rng)?.is_empty() {}
            }
            SampleGenerator::StimulationProportional => {
                proportional_walk(&mut child, schema, |_| (0.0, 1.0), rng)?;
            }
            SampleGenerator::RangeBounded { bounds } => {
                if bounds.len() != schema.len() {
                    return Err(AirsError::schema_mismatch(
                        bounds.len().min(schema.len()),
                        format!(
                            "{} bounds supplied for {} attributes",
                            bounds.len(),
                            schema.len()
                        ),
                    ));
                }
                proportional_walk(&mut child, schema, |p| bounds[p], rng)?;
            }
        }
        Ok(child)
    }

    /// Produce `count` independent children of `parent`.
    pub fn generate_clones<R: Rng + ?Sized>(
        &self,
        parent: &Cell,
        count: usize,
        schema: &Schema,
        rng: &mut R,
    ) -> Result<Vec<Cell>> {
        (0..count)
            .map(|_| self.generate(parent, schema, rng))
            .collect()
    }
}

/// Reject schemas the random scan could never mutate.
fn check_mutable(schema: &Schema) -> Result<()> {
    let mut mutable = 0;
    for (position, attribute) in schema.attributes().iter().enumerate() {
        if position == schema.class_position() {
            continue;
        }
        match attribute.kind {
            AttributeKind::Numeric => mutable += 1,
            AttributeKind::Nominal { cardinality } if cardinality > 0 => mutable += 1,
            ref kind => return Err(unmutable(position, kind)),
        }
    }
    if mutable == 0 {
        return Err(AirsError::schema_mismatch(
            schema.class_position(),
            "schema has no mutable attributes",
        ));
    }
    Ok(())
}

/// One scan over the non-class attributes. Returns the positions flagged as
/// mutated.
///
/// A nominal re-draw is flagged even when it lands on the value it already
/// had, so a flagged pass does not always change the cell.
fn random_pass<R: Rng + ?Sized>(
    child: &mut Cell,
    schema: &Schema,
    mutation_rate: f64,
    rng: &mut R,
) -> Result<Vec<usize>> {
    let mut flagged = Vec::new();
    for (position, attribute) in schema.attributes().iter().enumerate() {
        if position == schema.class_position() || !rng.gen_bool(mutation_rate) {
            continue;
        }
        let value = match attribute.kind {
            AttributeKind::Numeric => rng.gen::<f64>(),
            AttributeKind::Nominal { cardinality } if cardinality > 0 => {
                rng.gen_range(0..cardinality) as f64
            }
            ref kind => return Err(unmutable(position, kind)),
        };
        child.set_value(position, value)?;
        flagged.push(position);
    }
    Ok(flagged)
}

/// Stimulation-proportional walk. `bounds_of` gives the clamp box per
/// position.
fn proportional_walk<R, F>(child: &mut Cell, schema: &Schema, bounds_of: F, rng: &mut R) -> Result<()>
where
    R: Rng + ?Sized,
    F: Fn(usize) -> (f64, f64),
{
    let range = 1.0 - child.stimulation();

    for (position, attribute) in schema.attributes().iter().enumerate() {
        if position == schema.class_position() {
            continue;
        }
        let value = match attribute.kind {
            AttributeKind::Numeric => {
                let old = child.values()[position];
                let (lo, hi) = bounds_of(position);
                let min = (old - range / 2.0).max(lo);
                let max = (old + range / 2.0).min(hi);
                if min > max {
                    return Err(AirsError::invariant(
                        position,
                        format!("empty mutation window [{}, {}] for value {}", min, max, old),
                    ));
                }
                let drawn = rng.gen_range(min..=max);
                if drawn < min || drawn > max {
                    return Err(AirsError::invariant(
                        position,
                        format!("mutated value {} outside [{}, {}]", drawn, min, max),
                    ));
                }
                drawn
            }
            AttributeKind::Nominal { cardinality } if cardinality > 0 => {
                rng.gen_range(0..cardinality) as f64
            }
            ref kind => return Err(unmutable(position, kind)),
        };
        child.set_value(position, value)?;
    }
    Ok(())
}

fn unmutable(position: usize, kind: &AttributeKind) -> AirsError {
    AirsError::schema_mismatch(
        position,
        format!("no mutation handler for {} attribute", kind.type_name()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn numeric_schema() -> Schema {
        Schema::builder()
            .numeric("a")
            .numeric("b")
            .class("label", 2)
            .numeric("c")
            .build()
            .unwrap()
    }

    fn mixed_schema() -> Schema {
        Schema::builder()
            .numeric("a")
            .nominal("colour", 5)
            .class("label", 3)
            .build()
            .unwrap()
    }

    fn parent(schema: &Schema, record: &[f64], stimulation: f64) -> Cell {
        let mut cell = Cell::from_record(record, schema).unwrap();
        cell.set_stimulation(stimulation);
        cell
    }

    #[test]
    fn full_rate_flags_every_attribute_in_one_pass() {
        let schema = mixed_schema();
        let mut child = parent(&schema, &[0.5, 2.0, 1.0], 0.0);
        let mut rng = StdRng::seed_from_u64(3);
        let flagged = random_pass(&mut child, &schema, 1.0, &mut rng).unwrap();
        assert_eq!(flagged, vec![0, 1]);
        assert_eq!(child.class_value(), 1);
    }

    #[test]
    fn partial_rate_always_changes_something() {
        let schema = numeric_schema();
        let p = parent(&schema, &[0.5, 0.5, 1.0, 0.5], 0.0);
        let generator = SampleGenerator::random_mutate(0.05).unwrap();
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let child = generator.generate(&p, &schema, &mut rng).unwrap();
            let changed = [0, 1, 3].iter().any(|&i| child.values()[i] != p.values()[i]);
            assert!(changed, "seed {} produced an unchanged child", seed);
            assert_eq!(child.class_value(), 1);
        }
    }

    #[test]
    fn random_mutate_rejects_bad_rates() {
        for rate in [0.0, -0.5, 1.5, f64::NAN] {
            let err = SampleGenerator::random_mutate(rate).unwrap_err();
            assert!(matches!(err, AirsError::Configuration { .. }));
        }
    }

    #[test]
    fn full_stimulation_leaves_numerics_unchanged() {
        let schema = numeric_schema();
        let p = parent(&schema, &[0.2, 0.7, 0.0, 0.9], 1.0);
        let mut rng = StdRng::seed_from_u64(5);
        let child = SampleGenerator::StimulationProportional
            .generate(&p, &schema, &mut rng)
            .unwrap();
        assert_eq!(child.values(), p.values());
    }

    #[test]
    fn zero_stimulation_reaches_the_whole_unit_range() {
        let schema = numeric_schema();
        let p = parent(&schema, &[0.5, 0.5, 0.0, 0.5], 0.0);
        let mut rng = StdRng::seed_from_u64(9);
        let mut lowest: f64 = 1.0;
        let mut highest: f64 = 0.0;
        for _ in 0..500 {
            let child = SampleGenerator::StimulationProportional
                .generate(&p, &schema, &mut rng)
                .unwrap();
            lowest = lowest.min(child.values()[0]);
            highest = highest.max(child.values()[0]);
        }
        assert!(lowest < 0.05, "lowest draw was {}", lowest);
        assert!(highest > 0.95, "highest draw was {}", highest);
    }

    #[test]
    fn proportional_walk_stays_in_unit_box() {
        let schema = numeric_schema();
        let mut rng = StdRng::seed_from_u64(21);
        for step in 0..300 {
            let s = (step % 11) as f64 / 10.0;
            let p = parent(&schema, &[0.0, 1.0, 1.0, 0.95], s);
            let child = SampleGenerator::StimulationProportional
                .generate(&p, &schema, &mut rng)
                .unwrap();
            for i in [0, 1, 3] {
                let v = child.values()[i];
                assert!((0.0..=1.0).contains(&v), "value {} escaped [0,1]", v);
                assert!((v - p.values()[i]).abs() <= (1.0 - s) / 2.0 + 1e-12);
            }
            assert_eq!(child.class_value(), 1);
        }
    }

    #[test]
    fn range_bounded_walk_respects_bounds() {
        let schema = numeric_schema();
        let bounds = vec![(10.0, 10.5), (-2.0, 2.0), (0.0, 1.0), (100.0, 100.2)];
        let generator = SampleGenerator::range_bounded(bounds.clone()).unwrap();
        let p = parent(&schema, &[10.25, 0.0, 0.0, 100.1], 0.0);
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..300 {
            let child = generator.generate(&p, &schema, &mut rng).unwrap();
            for i in [0, 1, 3] {
                let (lo, hi) = bounds[i];
                let v = child.values()[i];
                assert!(v >= lo && v <= hi, "value {} escaped [{}, {}]", v, lo, hi);
            }
            assert_eq!(child.class_value(), 0);
        }
    }

    #[test]
    fn range_bounded_needs_one_bound_per_attribute() {
        let schema = numeric_schema();
        let generator = SampleGenerator::range_bounded(vec![(0.0, 1.0)]).unwrap();
        let p = parent(&schema, &[0.5, 0.5, 0.0, 0.5], 0.5);
        let err = generator
            .generate(&p, &schema, &mut StdRng::seed_from_u64(1))
            .unwrap_err();
        assert!(matches!(err, AirsError::SchemaMismatch { .. }));
    }

    #[test]
    fn value_outside_its_box_is_an_invariant_violation() {
        let schema = numeric_schema();
        let p = parent(&schema, &[1.5, 0.5, 0.0, 0.5], 0.9);
        let err = SampleGenerator::StimulationProportional
            .generate(&p, &schema, &mut StdRng::seed_from_u64(1))
            .unwrap_err();
        assert!(matches!(err, AirsError::InvariantViolation { position: 0, .. }));
    }

    #[test]
    fn nominal_attributes_are_redrawn_within_cardinality() {
        let schema = mixed_schema();
        let p = parent(&schema, &[0.5, 4.0, 2.0], 1.0);
        let mut rng = StdRng::seed_from_u64(8);
        let mut seen = [false; 5];
        for _ in 0..200 {
            let child = SampleGenerator::StimulationProportional
                .generate(&p, &schema, &mut rng)
                .unwrap();
            let code = child.values()[1];
            assert!(code >= 0.0 && code < 5.0 && code.fract() == 0.0);
            seen[code as usize] = true;
            assert_eq!(child.values()[0], 0.5);
            assert_eq!(child.class_value(), 2);
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn unsupported_attribute_cannot_be_mutated() {
        let schema = Schema::builder()
            .numeric("a")
            .unsupported("when", "date")
            .class("label", 2)
            .build()
            .unwrap();
        let p = parent(&schema, &[0.5, 0.0, 0.0], 0.5);
        for generator in [
            SampleGenerator::StimulationProportional,
            SampleGenerator::random_mutate(0.5).unwrap(),
        ] {
            let err = generator
                .generate(&p, &schema, &mut StdRng::seed_from_u64(2))
                .unwrap_err();
            assert!(matches!(err, AirsError::SchemaMismatch { position: 1, .. }));
        }
    }

    #[test]
    fn clones_are_independent() {
        let schema = numeric_schema();
        let p = parent(&schema, &[0.5, 0.5, 1.0, 0.5], 0.2);
        let clones = SampleGenerator::StimulationProportional
            .generate_clones(&p, 4, &schema, &mut StdRng::seed_from_u64(12))
            .unwrap();
        assert_eq!(clones.len(), 4);
        assert_ne!(clones[0], clones[1]);
        assert_eq!(p.values(), &[0.5, 0.5, 1.0, 0.5]);
    }
}
