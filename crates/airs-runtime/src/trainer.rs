//! AIRS training: clonal selection and affinity maturation.
//!
//! For every training antigen, within the pool of the antigen's class:
//! 1. The pool is stimulated by the antigen and the best-matching memory
//!    cells are selected
//! 2. The matches are cloned and mutated into a set of candidate cells (ARBs)
//! 3. ARBs are stimulated relative to the closest and furthest ARB, then
//!    compete for a fixed budget of resources; losers are removed
//! 4. Survivors are cloned and mutated again until their mean stimulation
//!    reaches the threshold or the iteration budget runs out
//! 5. The strongest ARB becomes a memory cell if it lies closer to the
//!    antigen than the best match, and replaces the match when the two are
//!    nearly identical
//!
//! Memory cells are scored on the fixed scale of the feature space, so the
//! clones of a close match mutate in a narrow window.
//!
//! Antigens are presented strictly in order and every random draw comes from
//! the caller's RNG, so a run is reproducible for a fixed seed.

use crate::pool::{normalised_affinity, stimulation, CellPool};
use airs_core::affinity::AffinityFunction;
use airs_core::cell::Cell;
use airs_core::error::{AirsError, Result};
use airs_core::types::{Dataset, Schema};
use airs_immune::classifier::KnnClassifier;
use airs_immune::initialisation::ModelInitialisation;
use airs_immune::merger::MemoryCellMerger;
use airs_immune::mutation::SampleGenerator;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

/// Tunable training parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingParams {
    /// Neighbours consulted by the classifier (default: 3).
    pub k: usize,
    /// Fraction of the affinity threshold under which a new memory cell
    /// replaces its match (default: 0.2).
    pub affinity_threshold_scalar: f64,
    /// Clones per unit of stimulation during refinement (default: 10.0).
    pub clonal_rate: f64,
    /// Extra clone multiplier when a memory cell is first matched (default: 2.0).
    pub hypermutation_rate: f64,
    /// Resource budget shared by the ARBs of one antigen (default: 150.0).
    pub total_resources: f64,
    /// Mean ARB stimulation that ends refinement (default: 0.9).
    pub stimulation_threshold: f64,
    /// Seed cells drawn before training (default: 1).
    pub initial_pool_size: usize,
    /// Best-matching memory cells cloned per antigen (default: 1).
    pub match_count: usize,
    /// Refinement rounds allowed per antigen (default: 100).
    pub max_refinement_iterations: usize,
    /// ARBs holding fewer resources than this are pruned (default: 0.0).
    pub prune_threshold: f64,
    /// Passes over the training set (default: 1).
    pub passes: usize,
    /// Records used to estimate the affinity threshold; `None` uses all.
    pub affinity_threshold_instances: Option<usize>,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            k: 3,
            affinity_threshold_scalar: 0.2,
            clonal_rate: 10.0,
            hypermutation_rate: 2.0,
            total_resources: 150.0,
            stimulation_threshold: 0.9,
            initial_pool_size: 1,
            match_count: 1,
            max_refinement_iterations: 100,
            prune_threshold: 0.0,
            passes: 1,
            affinity_threshold_instances: None,
        }
    }
}

impl TrainingParams {
    /// Reject parameter sets the training loop cannot run with.
    pub fn validate(&self) -> Result<()> {
        fn positive(field: &str, value: f64) -> Result<()> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(AirsError::configuration(field, value, "must be positive"))
            }
        }
        fn at_least_one(field: &str, value: usize) -> Result<()> {
            if value >= 1 {
                Ok(())
            } else {
                Err(AirsError::configuration(field, value, "must be at least 1"))
            }
        }
        fn unit(field: &str, value: f64) -> Result<()> {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(AirsError::configuration(field, value, "must be in [0, 1]"))
            }
        }

        at_least_one("k", self.k)?;
        at_least_one("match_count", self.match_count)?;
        at_least_one("passes", self.passes)?;
        at_least_one("max_refinement_iterations", self.max_refinement_iterations)?;
        positive("clonal_rate", self.clonal_rate)?;
        positive("hypermutation_rate", self.hypermutation_rate)?;
        positive("total_resources", self.total_resources)?;
        unit("stimulation_threshold", self.stimulation_threshold)?;
        unit("affinity_threshold_scalar", self.affinity_threshold_scalar)?;
        if !(self.prune_threshold >= 0.0 && self.prune_threshold < self.clonal_rate) {
            return Err(AirsError::configuration(
                "prune_threshold",
                self.prune_threshold,
                "must be in [0, clonal_rate)",
            ));
        }
        Ok(())
    }
}

/// Counters collected over one training run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrainingReport {
    pub antigens_presented: usize,
    pub seed_cells: usize,
    pub memory_cells_added: usize,
    pub memory_cells_replaced: usize,
    pub arbs_generated: usize,
    pub refinement_iterations: usize,
    /// Mean normalised affinity between training records.
    pub affinity_threshold: f64,
    /// Memory cells per class after training.
    pub pool_sizes: Vec<usize>,
}

/// A trained classifier and the report of the run that produced it.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub classifier: KnnClassifier,
    pub report: TrainingReport,
}

/// Runs AIRS training with a fixed set of strategies.
#[derive(Debug, Clone)]
pub struct AirsTrainer {
    params: TrainingParams,
    affinity: AffinityFunction,
    initialisation: ModelInitialisation,
    generator: SampleGenerator,
    merger: MemoryCellMerger,
}

impl AirsTrainer {
    /// Create a trainer with the default strategies: random-instance
    /// seeding, stimulation-proportional mutation, concatenating merge.
    pub fn new(params: TrainingParams, affinity: AffinityFunction) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            affinity,
            initialisation: ModelInitialisation::default(),
            generator: SampleGenerator::default(),
            merger: MemoryCellMerger::default(),
        })
    }

    pub fn with_initialisation(mut self, initialisation: ModelInitialisation) -> Self {
        self.initialisation = initialisation;
        self
    }

    pub fn with_generator(mut self, generator: SampleGenerator) -> Self {
        self.generator = generator;
        self
    }

    pub fn with_merger(mut self, merger: MemoryCellMerger) -> Self {
        self.merger = merger;
        self
    }

    pub fn params(&self) -> &TrainingParams {
        &self.params
    }

    pub fn affinity(&self) -> &AffinityFunction {
        &self.affinity
    }

    pub fn generator(&self) -> &SampleGenerator {
        &self.generator
    }

    /// Largest affinity the generator's feature space allows.
    pub fn affinity_scale(&self) -> Result<f64> {
        match &self.generator {
            SampleGenerator::RangeBounded { bounds } => self.affinity.max_affinity_within(bounds),
            _ => Ok(self.affinity.max_affinity()),
        }
    }

    /// Mean normalised affinity over record pairs.
    pub fn affinity_threshold(&self, dataset: &Dataset, scale: f64) -> Result<f64> {
        let records = dataset.records();
        let n = self
            .params
            .affinity_threshold_instances
            .map_or(records.len(), |m| m.min(records.len()));
        if n < 2 {
            return Ok(0.0);
        }

        let mut total = 0.0;
        let mut pairs = 0usize;
        for i in 0..n {
            for j in (i + 1)..n {
                let a = self.affinity.affinity(&records[i], &records[j])?;
                total += normalised_affinity(a, scale);
                pairs += 1;
            }
        }
        Ok(total / pairs as f64)
    }

    /// Evolve memory cells from `dataset` and merge them into a classifier.
    pub fn train<R: Rng + ?Sized>(&self, dataset: &Dataset, rng: &mut R) -> Result<TrainingOutcome> {
        if dataset.is_empty() {
            return Err(AirsError::EmptyDataset);
        }
        let schema = dataset.schema();
        if self.affinity.len() != schema.len() {
            return Err(AirsError::schema_mismatch(
                self.affinity.len().min(schema.len()),
                format!(
                    "affinity bound to {} attributes, dataset has {}",
                    self.affinity.len(),
                    schema.len()
                ),
            ));
        }

        let scale = self.affinity_scale()?;
        let threshold = self.affinity_threshold(dataset, scale)?;
        info!(
            records = dataset.len(),
            classes = schema.num_classes(),
            affinity_threshold = threshold,
            "Starting AIRS training"
        );

        let mut report = TrainingReport {
            affinity_threshold: threshold,
            ..TrainingReport::default()
        };
        let mut pools: Vec<CellPool> = (0..schema.num_classes()).map(CellPool::new).collect();

        for _ in 0..self.params.initial_pool_size {
            let seed = self.initialisation.generate_cell(dataset, rng)?;
            pools[seed.class_value()].push(seed);
            report.seed_cells += 1;
        }

        for pass in 0..self.params.passes {
            for record in dataset.records() {
                let class = schema.class_of(record)?;
                self.present(&mut pools[class], record, schema, scale, threshold, rng, &mut report)?;
            }
            debug!(
                pass,
                memory_cells = pools.iter().map(CellPool::len).sum::<usize>(),
                "Training pass complete"
            );
        }

        report.pool_sizes = pools.iter().map(CellPool::len).collect();
        let classifier = self.merger.merge(
            pools.into_iter().map(CellPool::into_cells).collect(),
            self.params.k,
            self.affinity.clone(),
            schema.num_classes(),
        )?;

        info!(
            memory_cells = classifier.len(),
            added = report.memory_cells_added,
            replaced = report.memory_cells_replaced,
            "AIRS training finished"
        );
        Ok(TrainingOutcome { classifier, report })
    }

    /// Present one antigen to its class pool.
    #[allow(clippy::too_many_arguments)]
    fn present<R: Rng + ?Sized>(
        &self,
        pool: &mut CellPool,
        antigen: &[f64],
        schema: &Schema,
        scale: f64,
        threshold: f64,
        rng: &mut R,
        report: &mut TrainingReport,
    ) -> Result<()> {
        report.antigens_presented += 1;

        if pool.is_empty() {
            pool.push(Cell::from_record(antigen, schema)?);
            report.memory_cells_added += 1;
            debug!(class = pool.class_value(), "Antigen adopted as first memory cell");
            return Ok(());
        }

        // 1. best matches
        pool.stimulate(antigen, &self.affinity, scale)?;
        let matches = pool.best_matches(self.params.match_count);
        let best_index = matches[0];
        let best_affinity = self
            .affinity
            .affinity(pool.cells()[best_index].values(), antigen)?;

        // 2. initial ARBs
        let mut arbs = CellPool::new(pool.class_value());
        let first_rate = self.params.clonal_rate * self.params.hypermutation_rate;
        for &index in &matches {
            let parent = &pool.cells()[index];
            let count = clone_count(parent.stimulation(), first_rate);
            arbs.push(parent.clone());
            arbs.extend(self.generator.generate_clones(parent, count, schema, rng)?);
            report.arbs_generated += count;
        }

        // 3-4. competition and refinement
        let mut iterations = 0;
        loop {
            arbs.stimulate_relative(antigen, &self.affinity)?;
            let competition = arbs.compete_for_resources(
                self.params.total_resources,
                self.params.clonal_rate,
                self.params.prune_threshold,
            );
            iterations += 1;

            let mean = arbs.mean_stimulation();
            trace!(
                iteration = iterations,
                arbs = arbs.len(),
                removed = competition.removed,
                mean_stimulation = mean,
                "Refinement round"
            );
            if mean >= self.params.stimulation_threshold
                || iterations >= self.params.max_refinement_iterations
            {
                break;
            }

            let mut offspring = Vec::new();
            for arb in arbs.cells() {
                let count = clone_count(arb.stimulation(), self.params.clonal_rate);
                offspring.extend(self.generator.generate_clones(arb, count, schema, rng)?);
            }
            report.arbs_generated += offspring.len();
            arbs.extend(offspring);
        }
        report.refinement_iterations += iterations;

        // 5. promotion
        let mut candidate = match arbs.strongest() {
            Some(cell) => cell.clone(),
            None => return Ok(()),
        };
        let candidate_affinity = self.affinity.affinity(candidate.values(), antigen)?;
        if candidate_affinity < best_affinity {
            candidate.set_stimulation(stimulation(candidate_affinity, scale));
            let to_match = self
                .affinity
                .affinity(candidate.values(), pool.cells()[best_index].values())?;
            pool.push(candidate);
            report.memory_cells_added += 1;

            if normalised_affinity(to_match, scale)
                < threshold * self.params.affinity_threshold_scalar
            {
                pool.remove(best_index);
                report.memory_cells_replaced += 1;
                debug!(class = pool.class_value(), "Memory cell replaced by candidate");
            } else {
                debug!(class = pool.class_value(), "Candidate added as memory cell");
            }
        }
        Ok(())
    }
}

/// Whole clones earned by a cell at `stimulation` under `rate`.
fn clone_count(stimulation: f64, rate: f64) -> usize {
    (stimulation * rate).floor().max(0.0) as usize
}
