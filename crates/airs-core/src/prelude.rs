//! AIRS Core Prelude — convenient imports for common usage.
//!
//! ```rust
//! use airs_core::prelude::*;
//! ```

// Re-export schema and dataset types
pub use crate::types::{Attribute, AttributeKind, Dataset, Schema, SchemaBuilder};

// Re-export the distance framework
pub use crate::distance::AttributeDistance;
pub use crate::affinity::AffinityFunction;

// Re-export cells
pub use crate::cell::Cell;

// Re-export error types
pub use crate::error::{AirsError, Result};
