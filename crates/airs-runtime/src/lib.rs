//! # AIRS Runtime
//!
//! Training and evaluation.
//!
//! The runtime is the "lymph node": each class gets its own pool of memory
//! cells, training antigens are presented one at a time, and the clones that
//! win the competition for resources become new memory cells. When every
//! antigen has been presented, the class pools are merged into a single
//! k-NN classifier.

pub mod pool;
pub mod trainer;
pub mod normalise;
pub mod model;
pub mod prelude;
