//! # AIRS Core
//!
//! Core types shared by every AIRS crate.
//!
//! An Artificial Immune Recognition System learns a small set of labeled
//! prototype vectors ("memory cells") through clonal selection, then
//! classifies records by majority vote among the nearest cells. This crate
//! holds the pieces the rest of the workspace is built on:
//!
//! - **Schema / Dataset** - typed attribute layout and in-memory records
//! - **AttributeDistance** - per-attribute distance (numeric, nominal, class)
//! - **AffinityFunction** - whole-record affinity, lower means more similar
//! - **Cell** - an owned attribute vector with a transient stimulation score
//!
//! ## Quick Start
//!
//! ```rust
//! use airs_core::prelude::*;
//!
//! let schema = Schema::builder()
//!     .numeric("width")
//!     .numeric("height")
//!     .class("label", 2)
//!     .build()
//!     .unwrap();
//!
//! let affinity = AffinityFunction::new(&schema).unwrap();
//! let a = [0.0, 3.0, 0.0];
//! let b = [0.0, 5.0, 1.0];
//! assert_eq!(affinity.affinity(&a, &b).unwrap(), 4.0);
//! ```

pub mod types;
pub mod error;
pub mod distance;
pub mod affinity;
pub mod cell;
pub mod prelude;
