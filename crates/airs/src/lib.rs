//! # AIRS
//!
//! Artificial Immune Recognition System: a supervised learner that evolves a
//! compact set of labeled prototypes ("memory cells") by clonal selection,
//! then classifies records by k-nearest-neighbour vote among them.
//!
//! ## Quick Start
//!
//! ```rust
//! use airs::prelude::*;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let schema = Schema::builder()
//!     .numeric("temperature")
//!     .class("season", 2)
//!     .build()
//!     .unwrap();
//! let mut data = Dataset::new(schema);
//! for i in 0..10 {
//!     data.push(vec![0.05 + i as f64 * 0.01, 0.0]).unwrap();
//!     data.push(vec![0.85 + i as f64 * 0.01, 1.0]).unwrap();
//! }
//!
//! let params = TrainingParams { k: 1, ..Default::default() };
//! let trainer = AirsTrainer::new(params, AffinityFunction::new(data.schema()).unwrap()).unwrap();
//! let outcome = trainer.train(&data, &mut StdRng::seed_from_u64(7)).unwrap();
//!
//! assert_eq!(outcome.classifier.classify(&[0.1, 0.0]).unwrap(), 0);
//! assert_eq!(outcome.classifier.classify(&[0.9, 0.0]).unwrap(), 1);
//! ```
//!
//! ## Architecture
//!
//! - [`airs_core`] - Schema, datasets, distances, affinity and cells
//! - [`airs_immune`] - Seeding, mutation, merge and the k-NN classifier
//! - [`airs_runtime`] - Cell pools, the training loop, normalisation, models
//! - `airs_config` - TOML configuration and selector tables (feature `config`)
//!
//! ## Key Concepts
//!
//! | Term | Meaning |
//! |------|---------|
//! | Antigen | A training or query record |
//! | Memory cell | An evolved, labeled prototype |
//! | ARB | A candidate clone competing for resources |
//! | Affinity | Distance between two records; lower is closer |
//! | Stimulation | `1 - normalised affinity`; ARBs are scored against their own closest and furthest |
//! | Affinity threshold | Mean pairwise normalised affinity of the training data |

// Re-export all subcrates
pub use airs_core as core;
pub use airs_immune as immune;
pub use airs_runtime as runtime;

#[cfg(feature = "config")]
pub use airs_config as config;

/// Prelude module for convenient imports.
///
/// ```rust
/// use airs::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use airs_core::types::{Attribute, AttributeKind, Dataset, Schema, SchemaBuilder};
    pub use airs_core::distance::AttributeDistance;
    pub use airs_core::affinity::AffinityFunction;
    pub use airs_core::cell::Cell;

    // Error types
    pub use airs_core::error::{AirsError, Result};

    // Strategies and classification
    pub use airs_immune::initialisation::ModelInitialisation;
    pub use airs_immune::mutation::SampleGenerator;
    pub use airs_immune::merger::MemoryCellMerger;
    pub use airs_immune::classifier::{majority_vote, KnnClassifier, Neighbour};

    // Runtime
    pub use airs_runtime::pool::{CellPool, Competition};
    pub use airs_runtime::trainer::{AirsTrainer, TrainingOutcome, TrainingParams, TrainingReport};
    pub use airs_runtime::normalise::MinMaxNormaliser;
    pub use airs_runtime::model::{AirsModel, Evaluation};

    // Configuration (requires "config" feature)
    #[cfg(feature = "config")]
    pub use airs_config::prelude::*;
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
