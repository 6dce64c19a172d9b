//! Catalog configuration.

use automl_types::{config_error, MlResult, TrainerName};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming a JSON file with a [`CatalogConfig`].
pub const CONFIG_ENV_VAR: &str = "AUTOML_CATALOG_CONFIG";

/// Controls which trainers the catalog registers and how iteration budgets
/// map to trainer tiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Smallest budget that unlocks tier-1 trainers.
    pub tier1_min_iterations: u32,
    /// Smallest budget that unlocks tier-2 trainers.
    pub tier2_min_iterations: u32,
    /// Trainers left out of the catalog entirely.
    pub excluded_trainers: Vec<TrainerName>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            tier1_min_iterations: 20,
            tier2_min_iterations: 100,
            excluded_trainers: Vec::new(),
        }
    }
}

impl CatalogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tiers(mut self, tier1_min_iterations: u32, tier2_min_iterations: u32) -> Self {
        self.tier1_min_iterations = tier1_min_iterations;
        self.tier2_min_iterations = tier2_min_iterations;
        self
    }

    pub fn with_excluded(mut self, trainer: TrainerName) -> Self {
        if !self.excluded_trainers.contains(&trainer) {
            self.excluded_trainers.push(trainer);
        }
        self
    }

    pub fn is_excluded(&self, trainer: TrainerName) -> bool {
        self.excluded_trainers.contains(&trainer)
    }

    pub fn from_json_str(json: &str) -> MlResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> MlResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Load from the file named by [`CONFIG_ENV_VAR`], or defaults when unset.
    pub fn from_env() -> MlResult<Self> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => Self::from_file(path),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> MlResult<()> {
        if self.tier1_min_iterations >= self.tier2_min_iterations {
            return Err(config_error!(
                "tier1_min_iterations ({}) must be below tier2_min_iterations ({})",
                self.tier1_min_iterations,
                self.tier2_min_iterations
            ));
        }
        Ok(())
    }
}
