//! AIRS Config Prelude — convenient imports for common usage.
//!
//! ```rust
//! use airs_config::prelude::*;
//! ```

pub use crate::config::{AirsConfig, ConfigError, KernelConfig, StrategyConfig};
pub use crate::kernels::{
    describe_learning_rate, describe_neighbourhood, LearningRateKernel, NeighbourhoodKernel,
};
pub use crate::selectors::{
    describe_initialisation, describe_merge, describe_nominal_distance, describe_numeric_distance,
    describe_sample_generator, GeneratorSelection,
};
