//! Per-trainer adapters.

use automl_sweep::{sweepable, SweepParameter};
use automl_types::{MlResult, PropertyBag, TaskKind, TrainerFamily, TrainerName};
use tracing::debug;

use crate::context::{TrainerContext, TrainerInstance};
use crate::schema::{schema_for, PropertySchema};
use crate::util;

/// Adapter exposing construction, sweep space and property layout of one
/// trainer. Task variants of a family differ only in `trainer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainerExtension {
    trainer: TrainerName,
    schema: &'static PropertySchema,
}

impl TrainerExtension {
    pub fn new(trainer: TrainerName) -> Self {
        Self {
            trainer,
            schema: schema_for(trainer.family()),
        }
    }

    pub fn trainer(&self) -> TrainerName {
        self.trainer
    }

    pub fn task(&self) -> TaskKind {
        self.trainer.task()
    }

    pub fn family(&self) -> TrainerFamily {
        self.trainer.family()
    }

    pub fn schema(&self) -> &'static PropertySchema {
        self.schema
    }

    /// Default sweep space with no values assigned.
    pub fn hyperparam_sweep_ranges(&self) -> Vec<SweepParameter> {
        sweepable::for_family(self.family())
    }

    /// Family defaults laid out as pipeline-node properties.
    pub fn default_hyperparams(&self) -> MlResult<PropertyBag> {
        let mut params = self.hyperparam_sweep_ranges();
        for param in &mut params {
            param.raw_value = Some(param.default_value.clone());
        }
        util::build_pipeline_node_props(self.trainer, &params)
    }

    /// Build a trainer instance. `fixed` pins hyperparameters on top of the
    /// family defaults; `None` uses the defaults unchanged.
    pub fn create_instance(
        &self,
        context: &TrainerContext,
        fixed: Option<&PropertyBag>,
    ) -> MlResult<TrainerInstance> {
        let mut options = self.default_hyperparams()?;
        if let Some(fixed) = fixed {
            util::merge_pipeline_node_props(self.trainer, &mut options, fixed)?;
        }
        debug!(
            "Created {} instance with {} properties",
            self.trainer,
            options.len()
        );
        Ok(TrainerInstance::new(self.trainer, context, options))
    }

    /// Registration check run when the catalog is built.
    ///
    /// Every domain must be well formed and the sweep space must cover the
    /// schema exactly.
    pub fn validate(&self) -> MlResult<()> {
        self.schema.check().map_err(|message| {
            automl_types::config_error!("{} schema: {}", self.trainer, message)
        })?;
        for param in self.hyperparam_sweep_ranges() {
            param.validate()?;
        }
        self.default_hyperparams().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use automl_types::{AutoMlError, CustomProperty, ParameterValue};

    #[test]
    fn every_extension_validates() {
        for trainer in TrainerName::all() {
            TrainerExtension::new(*trainer)
                .validate()
                .unwrap_or_else(|e| panic!("{trainer}: {e}"));
        }
    }

    #[test]
    fn defaults_fill_booster_block() {
        let ext = TrainerExtension::new(TrainerName::LightGbmMulti);
        let defaults = ext.default_hyperparams().unwrap();
        assert_eq!(defaults.scalar("NumLeaves"), Some(&ParameterValue::Int(31)));
        let booster = defaults.custom("TreeBooster").unwrap();
        assert_eq!(booster.name, "Microsoft.ML.LightGBM.TreeBooster");
        assert_eq!(booster.properties["RegLambda"], ParameterValue::Float(0.0));
    }

    #[test]
    fn create_instance_records_context() {
        let ext = TrainerExtension::new(TrainerName::SdcaRegression);
        let ctx = TrainerContext::new().with_seed(42).with_num_threads(2);
        let instance = ext.create_instance(&ctx, None).unwrap();
        assert_eq!(instance.trainer, TrainerName::SdcaRegression);
        assert_eq!(instance.task, TaskKind::Regression);
        assert_eq!(instance.seed, Some(42));
        assert_eq!(instance.num_threads, Some(2));
        assert_eq!(instance.options, ext.default_hyperparams().unwrap());
    }

    #[test]
    fn create_instance_pins_fixed_values() {
        let ext = TrainerExtension::new(TrainerName::LightGbmBinary);
        let fixed = PropertyBag::new().with_scalar("NumLeaves", 64).with_custom(
            "TreeBooster",
            CustomProperty::new("Microsoft.ML.LightGBM.TreeBooster").with_property("RegAlpha", 0.5),
        );
        let instance = ext
            .create_instance(&TrainerContext::new(), Some(&fixed))
            .unwrap();

        assert_eq!(instance.options.scalar("NumLeaves"), Some(&ParameterValue::Int(64)));
        let booster = instance.options.custom("TreeBooster").unwrap();
        assert_eq!(booster.properties["RegAlpha"], ParameterValue::Float(0.5));
        assert_eq!(booster.properties["RegLambda"], ParameterValue::Float(0.0));
        assert_eq!(instance.options.len(), 12);
    }

    #[test]
    fn create_instance_rejects_unknown_fixed_property() {
        let ext = TrainerExtension::new(TrainerName::SdcaBinary);
        let fixed = PropertyBag::new().with_scalar("NumLeaves", 8);
        let err = ext
            .create_instance(&TrainerContext::new(), Some(&fixed))
            .unwrap_err();
        assert!(matches!(err, AutoMlError::SchemaMismatch { .. }));
    }

    #[test]
    fn instance_reports_parameter_set() {
        let ext = TrainerExtension::new(TrainerName::SdcaBinary);
        let instance = ext.create_instance(&TrainerContext::new(), None).unwrap();
        let report = instance.parameter_set().unwrap();
        assert_eq!(report.len(), 6);
        assert_eq!(report["L2Const"].value_text, "<Auto>");
        assert_eq!(report["ConvergenceTolerance"].value_text, "0.1");
    }
}
