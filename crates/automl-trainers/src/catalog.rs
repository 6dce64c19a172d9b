//! Registry of trainer extensions and budget-based trainer selection.

use automl_types::{AutoMlError, MlResult, TaskKind, TrainerName};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::config::CatalogConfig;
use crate::extension::TrainerExtension;

/// Trainers per task, grouped by the budget tier that unlocks them. Within a
/// tier, order is preference order.
static BINARY_TIERS: [&[TrainerName]; 3] = [
    &[
        TrainerName::AveragedPerceptronBinary,
        TrainerName::SdcaBinary,
        TrainerName::LightGbmBinary,
        TrainerName::SymSgdBinary,
    ],
    &[TrainerName::LinearSvmBinary, TrainerName::FastTreeBinary],
    &[
        TrainerName::LogisticRegressionBinary,
        TrainerName::FastForestBinary,
        TrainerName::SgdBinary,
    ],
];

static MULTICLASS_TIERS: [&[TrainerName]; 3] = [
    &[
        TrainerName::AveragedPerceptronOva,
        TrainerName::SdcaMulti,
        TrainerName::LightGbmMulti,
        TrainerName::SymSgdOva,
    ],
    &[
        TrainerName::FastTreeOva,
        TrainerName::LinearSvmOva,
        TrainerName::LogisticRegressionMulti,
    ],
    &[TrainerName::FastForestOva, TrainerName::SgdOva],
];

static REGRESSION_TIERS: [&[TrainerName]; 3] = [
    &[
        TrainerName::FastTreeRegression,
        TrainerName::LightGbmRegression,
        TrainerName::SdcaRegression,
    ],
    &[
        TrainerName::FastTreeTweedieRegression,
        TrainerName::FastForestRegression,
        TrainerName::PoissonRegression,
    ],
    &[
        TrainerName::OnlineGradientDescentRegression,
        TrainerName::OrdinaryLeastSquaresRegression,
    ],
];

fn tiers_for(task: TaskKind) -> &'static [&'static [TrainerName]; 3] {
    match task {
        TaskKind::BinaryClassification => &BINARY_TIERS,
        TaskKind::MulticlassClassification => &MULTICLASS_TIERS,
        TaskKind::Regression => &REGRESSION_TIERS,
    }
}

/// Maps trainer identities to their extensions.
///
/// Built once and read-only afterwards; every registered extension has been
/// validated at build time.
#[derive(Debug, Clone)]
pub struct TrainerExtensionCatalog {
    config: CatalogConfig,
    extensions: BTreeMap<TrainerName, TrainerExtension>,
}

impl TrainerExtensionCatalog {
    /// Catalog with every trainer and the default budget tiers.
    pub fn standard() -> MlResult<Self> {
        Self::build(CatalogConfig::default())
    }

    /// Register and validate every trainer not excluded by `config`.
    pub fn build(config: CatalogConfig) -> MlResult<Self> {
        config.validate()?;

        let mut extensions = BTreeMap::new();
        for trainer in TrainerName::all() {
            if config.is_excluded(*trainer) {
                debug!("Skipping excluded trainer {}", trainer);
                continue;
            }
            let extension = TrainerExtension::new(*trainer);
            extension.validate()?;
            extensions.insert(*trainer, extension);
        }

        info!(
            "Trainer catalog ready: {} of {} trainers registered",
            extensions.len(),
            TrainerName::all().len()
        );
        Ok(Self { config, extensions })
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn get_trainer_extension(&self, trainer: TrainerName) -> MlResult<&TrainerExtension> {
        self.extensions
            .get(&trainer)
            .ok_or(AutoMlError::Lookup { trainer })
    }

    /// Registered trainers in declaration order.
    pub fn trainers(&self) -> impl Iterator<Item = TrainerName> + '_ {
        self.extensions.keys().copied()
    }

    /// Trainers applicable to `task` within an iteration budget.
    ///
    /// Larger budgets unlock further tiers, so the result only grows as
    /// `max_iterations` grows.
    pub fn get_trainers(&self, task: TaskKind, max_iterations: u32) -> Vec<TrainerName> {
        let unlocked = if max_iterations < self.config.tier1_min_iterations {
            1
        } else if max_iterations < self.config.tier2_min_iterations {
            2
        } else {
            3
        };

        let trainers: Vec<TrainerName> = tiers_for(task)[..unlocked]
            .iter()
            .flat_map(|tier| tier.iter().copied())
            .filter(|trainer| self.extensions.contains_key(trainer))
            .collect();

        debug!(
            "{} trainers for {} at budget {}",
            trainers.len(),
            task,
            max_iterations
        );
        trainers
    }
}
