//! End-to-end training runs.
//!
//! Trains on a small two-class dataset with four numeric features and checks
//! that a fixed seed reproduces the merged pool and every prediction.

use airs_core::prelude::*;
use airs_immune::mutation::SampleGenerator;
use airs_runtime::model::AirsModel;
use airs_runtime::normalise::MinMaxNormaliser;
use airs_runtime::trainer::{AirsTrainer, TrainingParams};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn toy_dataset(seed: u64) -> Dataset {
    let schema = Schema::builder()
        .numeric("f0")
        .numeric("f1")
        .numeric("f2")
        .numeric("f3")
        .class("label", 2)
        .build()
        .unwrap();

    let mut rng = StdRng::seed_from_u64(seed);
    let mut records = Vec::new();
    for i in 0..40 {
        let class = i % 2;
        let centre = if class == 0 { 0.25 } else { 0.75 };
        let mut record: Vec<f64> = (0..4)
            .map(|_| centre + rng.gen_range(-0.15..0.15))
            .collect();
        record.push(class as f64);
        records.push(record);
    }
    Dataset::from_records(schema, records).unwrap()
}

fn trainer(data: &Dataset) -> AirsTrainer {
    AirsTrainer::new(
        TrainingParams {
            passes: 2,
            ..Default::default()
        },
        AffinityFunction::new(data.schema()).unwrap(),
    )
    .unwrap()
}

#[test]
fn fixed_seed_reproduces_pool_and_predictions() {
    let data = toy_dataset(100);
    let queries = toy_dataset(200);
    let t = trainer(&data);

    let first = t.train(&data, &mut StdRng::seed_from_u64(42)).unwrap();
    let second = t.train(&data, &mut StdRng::seed_from_u64(42)).unwrap();

    assert_eq!(first.classifier.pool(), second.classifier.pool());
    assert_eq!(first.report, second.report);

    for record in queries.records() {
        assert_eq!(
            first.classifier.classify(record).unwrap(),
            second.classifier.classify(record).unwrap()
        );
    }
}

#[test]
fn different_seeds_evolve_different_pools() {
    let data = toy_dataset(100);
    let t = trainer(&data);
    let a = t.train(&data, &mut StdRng::seed_from_u64(1)).unwrap();
    let b = t.train(&data, &mut StdRng::seed_from_u64(2)).unwrap();
    assert_ne!(a.classifier.pool(), b.classifier.pool());
}

#[test]
fn trained_pool_separates_the_classes() {
    let data = toy_dataset(100);
    let held_out = toy_dataset(300);
    let outcome = trainer(&data)
        .train(&data, &mut StdRng::seed_from_u64(7))
        .unwrap();

    // every memory cell stays on its own side of the feature space
    for cell in outcome.classifier.pool() {
        let mean = cell.values()[..4].iter().sum::<f64>() / 4.0;
        if cell.class_value() == 0 {
            assert!(mean < 0.5, "class 0 cell drifted to {:?}", cell.values());
        } else {
            assert!(mean > 0.5, "class 1 cell drifted to {:?}", cell.values());
        }
    }

    assert_eq!(outcome.classifier.k(), 3);
    let model = AirsModel::from_parts(outcome.classifier, None);
    let eval = model.evaluate(&held_out).unwrap();
    assert!(eval.accuracy >= 0.9, "accuracy {}", eval.accuracy);
}

#[test]
fn report_accounts_for_every_memory_cell() {
    let data = toy_dataset(100);
    let outcome = trainer(&data)
        .train(&data, &mut StdRng::seed_from_u64(11))
        .unwrap();
    let report = &outcome.report;
    assert_eq!(
        outcome.classifier.len(),
        report.seed_cells + report.memory_cells_added - report.memory_cells_replaced
    );
    assert_eq!(report.antigens_presented, 80);
    assert!(report.memory_cells_added > 0);
    assert!(outcome.report.arbs_generated > 0);
    assert!(outcome.report.affinity_threshold > 0.0);
}

#[test]
fn refinement_iterates_and_pools_keep_several_cells() {
    let data = toy_dataset(100);
    let outcome = trainer(&data)
        .train(&data, &mut StdRng::seed_from_u64(9))
        .unwrap();
    let report = &outcome.report;
    assert!(
        report.refinement_iterations > report.antigens_presented,
        "{} refinement rounds for {} antigens",
        report.refinement_iterations,
        report.antigens_presented
    );
    assert!(
        report.pool_sizes.iter().any(|&n| n > 1),
        "pool sizes {:?}",
        report.pool_sizes
    );
    assert!(report.memory_cells_added > report.memory_cells_replaced + 1);
}

#[test]
fn random_mutation_trains_deterministically() {
    let data = toy_dataset(100);
    let t = trainer(&data).with_generator(SampleGenerator::random_mutate(0.25).unwrap());
    let a = t.train(&data, &mut StdRng::seed_from_u64(5)).unwrap();
    let b = t.train(&data, &mut StdRng::seed_from_u64(5)).unwrap();
    assert_eq!(a.classifier.pool(), b.classifier.pool());
}

#[test]
fn range_bounded_mutation_trains_on_raw_features() {
    // same layout, scaled to [100, 200]
    let unit = toy_dataset(100);
    let raw = unit
        .map_records(|r| {
            let mut scaled: Vec<f64> = r[..4].iter().map(|v| 100.0 + v * 100.0).collect();
            scaled.push(r[4]);
            Ok(scaled)
        })
        .unwrap();
    let bounds = MinMaxNormaliser::fit(&raw).unwrap().bounds();

    let t = trainer(&raw).with_generator(SampleGenerator::range_bounded(bounds.clone()).unwrap());
    let outcome = t.train(&raw, &mut StdRng::seed_from_u64(3)).unwrap();

    for cell in outcome.classifier.pool() {
        for (i, (lo, hi)) in bounds.iter().enumerate().take(4) {
            let v = cell.values()[i];
            assert!(v >= *lo && v <= *hi, "value {} escaped [{}, {}]", v, lo, hi);
        }
    }
}
