//! # automl-sweep
//!
//! Hyperparameter search spaces for AutoML trainers.
//!
//! Provides sweep parameter definitions (numeric ranges, log-scaled ranges,
//! discrete option sets), domain sampling and grid helpers for the search
//! loop, and the per-family builders that declare each trainer's tunable
//! hyperparameters.

mod parameter;
pub mod sweepable;

pub use parameter::{ParameterDomain, SweepParameter, DEFAULT_GRID_STEPS};
