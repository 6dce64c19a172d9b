//! Execution context and constructed trainer instances.

use automl_types::{MlResult, ParameterSet, PropertyBag, TaskKind, TrainerName};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::util;

/// Execution settings handed through to trainer construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainerContext {
    /// Seed for trainers with randomized training.
    pub seed: Option<u64>,
    /// Worker thread limit. `None` lets the trainer decide.
    pub num_threads: Option<usize>,
}

impl TrainerContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_num_threads(mut self, n: usize) -> Self {
        self.num_threads = Some(n);
        self
    }
}

/// A configured trainer, ready to be wrapped by a pipeline node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerInstance {
    pub id: Uuid,
    pub trainer: TrainerName,
    pub task: TaskKind,
    pub seed: Option<u64>,
    pub num_threads: Option<usize>,
    /// Fully resolved hyperparameters.
    pub options: PropertyBag,
}

impl TrainerInstance {
    pub(crate) fn new(
        trainer: TrainerName,
        context: &TrainerContext,
        options: PropertyBag,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            trainer,
            task: trainer.task(),
            seed: context.seed,
            num_threads: context.num_threads,
            options,
        }
    }

    /// Flattened view of the resolved options, for reporting.
    pub fn parameter_set(&self) -> MlResult<ParameterSet> {
        util::build_parameter_set(self.trainer, &self.options)
    }
}
