//! TOML configuration for an AIRS run.
//!
//! ```toml
//! [training]
//! k = 3
//! clonal_rate = 10.0
//!
//! [strategies]
//! sample_generator = 2
//! normalise = true
//! seed = 7
//!
//! [kernels]
//! learning_rate = "linear"
//! ```
//!
//! Every section and field is optional and falls back to its default.

use crate::kernels::{LearningRateKernel, NeighbourhoodKernel};
use crate::selectors::{self, GeneratorSelection};
use airs_core::affinity::AffinityFunction;
use airs_core::error::AirsError;
use airs_core::types::Dataset;
use airs_immune::mutation::SampleGenerator;
use airs_runtime::model::AirsModel;
use airs_runtime::normalise::MinMaxNormaliser;
use airs_runtime::trainer::{AirsTrainer, TrainingParams, TrainingReport};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write config {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Airs(#[from] AirsError),
}

/// AIRS run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirsConfig {
    #[serde(default)]
    pub training: TrainingParams,
    #[serde(default)]
    pub strategies: StrategyConfig,
    #[serde(default)]
    pub kernels: KernelConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    #[serde(default = "default_code")]
    pub numeric_distance: u32,
    #[serde(default = "default_code")]
    pub nominal_distance: u32,
    #[serde(default = "default_code")]
    pub initialisation: u32,
    #[serde(default = "default_sample_generator")]
    pub sample_generator: u32,
    #[serde(default = "default_code")]
    pub merge: u32,
    /// Per-attribute probability used by random mutation.
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,
    /// Min-max normalise numeric features before training.
    #[serde(default = "default_normalise")]
    pub normalise: bool,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelConfig {
    #[serde(default = "default_learning_rate")]
    pub learning_rate: String,
    #[serde(default = "default_neighbourhood")]
    pub neighbourhood: String,
}

// Default value functions
fn default_code() -> u32 { 1 }
fn default_sample_generator() -> u32 { 2 }
fn default_mutation_rate() -> f64 { 0.1 }
fn default_normalise() -> bool { true }
fn default_seed() -> u64 { 1 }
fn default_learning_rate() -> String { "linear".to_string() }
fn default_neighbourhood() -> String { "gaussian".to_string() }

impl Default for AirsConfig {
    fn default() -> Self {
        Self {
            training: TrainingParams::default(),
            strategies: StrategyConfig::default(),
            kernels: KernelConfig::default(),
        }
    }
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            numeric_distance: default_code(),
            nominal_distance: default_code(),
            initialisation: default_code(),
            sample_generator: default_sample_generator(),
            merge: default_code(),
            mutation_rate: default_mutation_rate(),
            normalise: default_normalise(),
            seed: default_seed(),
        }
    }
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            learning_rate: default_learning_rate(),
            neighbourhood: default_neighbourhood(),
        }
    }
}

impl KernelConfig {
    pub fn learning_rate(&self) -> std::result::Result<LearningRateKernel, AirsError> {
        LearningRateKernel::from_code(&self.learning_rate)
    }

    pub fn neighbourhood(&self) -> std::result::Result<NeighbourhoodKernel, AirsError> {
        NeighbourhoodKernel::from_code(&self.neighbourhood)
    }
}

impl AirsConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AirsConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Resolve every selector and check the training parameters.
    pub fn validate(&self) -> Result<()> {
        self.training.validate()?;
        let s = &self.strategies;
        selectors::resolve_numeric_distance(s.numeric_distance)?;
        selectors::resolve_nominal_distance(s.nominal_distance)?;
        selectors::resolve_initialisation(s.initialisation)?;
        selectors::resolve_merge(s.merge)?;
        match selectors::resolve_sample_generator(s.sample_generator)? {
            GeneratorSelection::RandomMutate => {
                SampleGenerator::random_mutate(s.mutation_rate)?;
            }
            GeneratorSelection::StimulationProportional if !s.normalise => {
                return Err(AirsError::configuration(
                    "normalise",
                    false,
                    "stimulation-proportional mutation walks inside [0, 1] and needs normalised records",
                )
                .into());
            }
            _ => {}
        }
        self.kernels.learning_rate()?;
        self.kernels.neighbourhood()?;
        Ok(())
    }

    /// Build a trainer for `dataset`, plus the normaliser its records must
    /// pass through first.
    ///
    /// Range-bounded mutation works on raw features inside the dataset's
    /// observed bounds, so it never gets a normaliser.
    pub fn build_trainer(&self, dataset: &Dataset) -> Result<(AirsTrainer, Option<MinMaxNormaliser>)> {
        self.validate()?;
        let s = &self.strategies;
        let numeric = selectors::resolve_numeric_distance(s.numeric_distance)?;
        let nominal = selectors::resolve_nominal_distance(s.nominal_distance)?;
        let initialisation = selectors::resolve_initialisation(s.initialisation)?;
        let merger = selectors::resolve_merge(s.merge)?;
        let selection = selectors::resolve_sample_generator(s.sample_generator)?;

        let affinity = AffinityFunction::with_distances(dataset.schema(), numeric, nominal)?;
        let (generator, normaliser) = match selection {
            GeneratorSelection::RandomMutate => (
                SampleGenerator::random_mutate(s.mutation_rate)?,
                self.normaliser_for(dataset)?,
            ),
            GeneratorSelection::StimulationProportional => (
                SampleGenerator::StimulationProportional,
                self.normaliser_for(dataset)?,
            ),
            GeneratorSelection::RangeBounded => {
                let bounds = MinMaxNormaliser::fit(dataset)?.bounds();
                (SampleGenerator::range_bounded(bounds)?, None)
            }
        };

        let generator_label = selectors::describe_sample_generator(s.sample_generator)?;
        let merge_label = selectors::describe_merge(s.merge)?;
        debug!(
            sample_generator = generator_label,
            merge = merge_label,
            normalise = normaliser.is_some(),
            "Resolved AIRS strategies"
        );

        let trainer = AirsTrainer::new(self.training.clone(), affinity)?
            .with_initialisation(initialisation)
            .with_generator(generator)
            .with_merger(merger);
        Ok((trainer, normaliser))
    }

    /// Build a trainer and fit a model, seeding the RNG from `[strategies] seed`.
    pub fn fit(&self, dataset: &Dataset) -> Result<(AirsModel, TrainingReport)> {
        let (trainer, normaliser) = self.build_trainer(dataset)?;
        let mut rng = StdRng::seed_from_u64(self.strategies.seed);
        Ok(AirsModel::fit(&trainer, dataset, normaliser, &mut rng)?)
    }

    fn normaliser_for(&self, dataset: &Dataset) -> Result<Option<MinMaxNormaliser>> {
        if self.strategies.normalise {
            Ok(Some(MinMaxNormaliser::fit(dataset)?))
        } else {
            Ok(None)
        }
    }
}
