//! # automl-trainers
//!
//! Trainer extension layer for AutoML.
//!
//! Maps each trainer identity to an extension that can build a configured
//! trainer instance and declare its sweep space, keeps a catalog that picks
//! trainers for a task under an iteration budget, and translates
//! hyperparameters between sweep parameters, pipeline-node properties and
//! flat parameter sets.

mod catalog;
mod config;
mod context;
mod extension;
pub mod schema;
pub mod util;

pub use catalog::TrainerExtensionCatalog;
pub use config::{CatalogConfig, CONFIG_ENV_VAR};
pub use context::{TrainerContext, TrainerInstance};
pub use extension::TrainerExtension;
pub use schema::{NestedBlock, PropertyRoute, PropertySchema};
pub use util::{build_parameter_set, build_pipeline_node_props};
