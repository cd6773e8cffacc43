//! # AIRS Config
//!
//! TOML configuration for AIRS runs and the lookup tables that turn selector
//! codes into strategies.
//!
//! The algorithm crates only know closed enums. This crate owns the codes,
//! their labels, and the step from a config file to a ready trainer:
//!
//! ```rust
//! use airs_config::prelude::*;
//!
//! let config = AirsConfig::from_toml_str("[training]\nk = 5\n").unwrap();
//! assert_eq!(config.training.k, 5);
//! assert_eq!(describe_sample_generator(config.strategies.sample_generator).unwrap(),
//!            "Stimulation proportional");
//! ```

pub mod config;
pub mod kernels;
pub mod selectors;
pub mod prelude;
