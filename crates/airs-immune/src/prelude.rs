//! AIRS Immune Prelude — convenient imports for common usage.
//!
//! ```rust
//! use airs_immune::prelude::*;
//! ```

pub use crate::initialisation::ModelInitialisation;
pub use crate::mutation::SampleGenerator;
pub use crate::merger::MemoryCellMerger;
pub use crate::classifier::{KnnClassifier, Neighbour};

// Re-export from core
pub use airs_core::prelude::*;
