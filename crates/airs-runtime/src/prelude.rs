//! AIRS Runtime Prelude — convenient imports for common usage.
//!
//! ```rust
//! use airs_runtime::prelude::*;
//! ```

// Re-export pools and training
pub use crate::pool::{CellPool, Competition};
pub use crate::trainer::{AirsTrainer, TrainingOutcome, TrainingParams, TrainingReport};

// Re-export model and normalisation
pub use crate::model::{AirsModel, Evaluation};
pub use crate::normalise::MinMaxNormaliser;

// Re-export from immune
pub use airs_immune::prelude::*;
