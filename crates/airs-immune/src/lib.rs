//! # AIRS Immune
//!
//! The strategy families that act on cells:
//!
//! - **ModelInitialisation** - seed a cell from a random training record
//! - **SampleGenerator** - clone a cell and mutate its non-class attributes
//! - **MemoryCellMerger** - concatenate per-class memory pools
//! - **KnnClassifier** - majority vote among the k nearest memory cells
//!
//! Each family is a closed enum. Variants are picked by explicit
//! configuration, and all randomness comes from a caller-supplied
//! [`rand::Rng`].

pub mod initialisation;
pub mod mutation;
pub mod merger;
pub mod classifier;
pub mod prelude;
