//! Core types for the critical-bandwidth mode test
//!
//! This crate holds the pieces shared by the density-estimation crate and the
//! search/bootstrap crate:
//!
//! - [`Error`] / [`Result`]: the single error type used across the workspace
//! - [`outcome`]: search and bootstrap-iteration outcomes, shared with
//!   [`Error::Timeout`]
//! - [`execution`]: sequential and (feature `parallel`) Rayon execution engines
//! - [`math`]: normal density, evenly spaced grids, tolerant ratio flooring
//!
//! # Example
//!
//! ```rust
//! use silverman_core::{execution::sequential, ExecutionEngine};
//!
//! let engine = sequential();
//! let doubled = engine.execute_batch(4, |i| i * 2);
//! assert_eq!(doubled, vec![0, 2, 4, 6]);
//! ```

pub mod error;
pub mod execution;
pub mod math;
pub mod outcome;

// Re-export core types
pub use error::{Error, Result};
pub use outcome::{CriticalBandwidth, IterationOutcome};

pub use execution::{sequential, ExecutionEngine, ExecutionStrategy, SequentialEngine};
#[cfg(feature = "parallel")]
pub use execution::{parallel, ParallelEngine};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::{ExecutionEngine, ExecutionStrategy, Result, SequentialEngine};

    #[cfg(feature = "parallel")]
    pub use crate::ParallelEngine;
}
