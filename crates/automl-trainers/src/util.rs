//! Conversions between sweep parameters, pipeline-node properties and
//! parameter sets.

use automl_sweep::SweepParameter;
use automl_types::{
    schema_error, AutoMlError, CustomProperty, MlResult, ParameterSet, ParameterValue,
    PropertyBag, PropertyValue, TrainerName,
};
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::schema::{schema_for, NestedBlock, PropertyRoute};

/// Lay out a complete sweep as pipeline-node properties.
///
/// Scalars land at the top level under their own name. Members of a nested
/// block are collected into one [`CustomProperty`] stored under the block's
/// key. Every schema parameter must be supplied exactly once.
pub fn build_pipeline_node_props(
    trainer: TrainerName,
    sweep_params: &[SweepParameter],
) -> MlResult<PropertyBag> {
    let schema = schema_for(trainer.family());
    let mut props = PropertyBag::new();
    let mut seen = HashSet::with_capacity(sweep_params.len());

    for param in sweep_params {
        if !seen.insert(param.name.as_str()) {
            return Err(AutoMlError::DuplicateParameter {
                parameter: param.name.clone(),
            });
        }
        let route = schema
            .route(&param.name)
            .ok_or_else(|| schema_error!(trainer, param.name))?;
        let value = param
            .value()
            .cloned()
            .ok_or_else(|| AutoMlError::UnsetParameter {
                parameter: param.name.clone(),
            })?;
        match route {
            PropertyRoute::Scalar => {
                props.insert(param.name.clone(), PropertyValue::Scalar(value));
            }
            PropertyRoute::Nested(block) => {
                nested_block_mut(trainer, &mut props, block)?
                    .properties
                    .insert(param.name.clone(), value);
            }
        }
    }

    let missing: Vec<String> = schema
        .leaf_names()
        .filter(|name| !seen.contains(name))
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(AutoMlError::IncompleteSweep { trainer, missing });
    }

    debug!("Built {} pipeline properties for {}", props.len(), trainer);
    Ok(props)
}

/// Flatten pipeline-node properties into a parameter set.
///
/// Each scalar yields one entry; each nested block yields one entry per
/// member. Any subset of the schema is accepted.
pub fn build_parameter_set(trainer: TrainerName, props: &PropertyBag) -> MlResult<ParameterSet> {
    let schema = schema_for(trainer.family());
    let mut set = ParameterSet::new();

    for (key, value) in props.iter() {
        match value {
            PropertyValue::Scalar(scalar) => set.push(key, scalar)?,
            PropertyValue::Custom(custom) => {
                if schema.block(key).is_none() {
                    warn!(
                        "{} has no nested block {}, flattening {} anyway",
                        trainer, key, custom.name
                    );
                }
                for (name, member) in &custom.properties {
                    set.push(name.as_str(), member)?;
                }
            }
        }
    }

    Ok(set)
}

/// Overlay pinned properties on a resolved property bag.
///
/// Nested blocks merge member by member. A nested member may also be given
/// as a top-level scalar, in which case it is routed into its block.
/// `target` is left untouched when any override is rejected.
pub fn merge_pipeline_node_props(
    trainer: TrainerName,
    target: &mut PropertyBag,
    overrides: &PropertyBag,
) -> MlResult<()> {
    let schema = schema_for(trainer.family());
    let mut merged = target.clone();

    for (key, value) in overrides.iter() {
        match value {
            PropertyValue::Scalar(scalar) => match schema.route(key) {
                Some(PropertyRoute::Scalar) => {
                    merged.insert(key, PropertyValue::Scalar(scalar.clone()));
                }
                Some(PropertyRoute::Nested(block)) => {
                    nested_block_mut(trainer, &mut merged, block)?
                        .properties
                        .insert(key.to_string(), scalar.clone());
                }
                None => return Err(schema_error!(trainer, key)),
            },
            PropertyValue::Custom(custom) => {
                let block = schema.block(key).ok_or_else(|| schema_error!(trainer, key))?;
                if custom.name != block.type_name {
                    return Err(schema_error!(trainer, custom.name));
                }
                for (name, member) in &custom.properties {
                    if !block.members.iter().any(|known| *known == name.as_str()) {
                        return Err(schema_error!(trainer, name));
                    }
                    nested_block_mut(trainer, &mut merged, block)?
                        .properties
                        .insert(name.clone(), member.clone());
                }
            }
        }
    }

    *target = merged;
    debug!("Merged {} pinned properties for {}", overrides.len(), trainer);
    Ok(())
}

/// Apply the values of a parameter set back onto a sweep.
///
/// Text is parsed against each parameter's domain. Parameters absent from
/// the set keep their current value. Nothing is assigned unless every
/// entry parses.
pub fn apply_parameter_set(
    trainer: TrainerName,
    sweep_params: &mut [SweepParameter],
    set: &ParameterSet,
) -> MlResult<()> {
    let mut parsed = Vec::with_capacity(set.len());
    for entry in set.iter() {
        let index = sweep_params
            .iter()
            .position(|param| param.name == entry.name)
            .ok_or_else(|| schema_error!(trainer, entry.name))?;
        parsed.push((index, parse_value_text(&sweep_params[index], &entry.value_text)?));
    }
    for (index, value) in parsed {
        sweep_params[index].raw_value = Some(value);
    }
    Ok(())
}

fn parse_value_text(param: &SweepParameter, text: &str) -> MlResult<ParameterValue> {
    use automl_sweep::ParameterDomain;

    let invalid = || AutoMlError::InvalidDomain {
        parameter: param.name.clone(),
        message: format!("cannot read value {text}"),
    };
    match &param.domain {
        ParameterDomain::FloatRange { .. } => text
            .parse::<f64>()
            .map(ParameterValue::Float)
            .map_err(|_| invalid()),
        ParameterDomain::IntRange { .. } => text
            .parse::<i64>()
            .map(ParameterValue::Int)
            .map_err(|_| invalid()),
        ParameterDomain::Discrete { options } => options
            .iter()
            .find(|option| option.to_string() == text)
            .cloned()
            .ok_or_else(invalid),
    }
}

fn nested_block_mut<'a>(
    trainer: TrainerName,
    props: &'a mut PropertyBag,
    block: &NestedBlock,
) -> MlResult<&'a mut CustomProperty> {
    if !props.contains_key(block.property) {
        props.insert(
            block.property,
            PropertyValue::Custom(CustomProperty::new(block.type_name)),
        );
    }
    match props.get_mut(block.property) {
        Some(PropertyValue::Custom(custom)) => Ok(custom),
        _ => Err(schema_error!(trainer, block.property)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use automl_sweep::sweepable;
    use serde_json::json;

    fn all_set_to_one(mut params: Vec<SweepParameter>) -> Vec<SweepParameter> {
        for param in &mut params {
            param.set_value(1);
        }
        params
    }

    #[test]
    fn unknown_parameter_is_schema_mismatch() {
        let mut params = all_set_to_one(sweepable::sdca_params());
        params.push({
            let mut extra = SweepParameter::discrete("NumLeaves", [2, 4]);
            extra.set_value(2);
            extra
        });
        match build_pipeline_node_props(TrainerName::SdcaBinary, &params) {
            Err(AutoMlError::SchemaMismatch { trainer, parameter }) => {
                assert_eq!(trainer, TrainerName::SdcaBinary);
                assert_eq!(parameter, "NumLeaves");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn missing_parameter_is_incomplete() {
        let mut params = all_set_to_one(sweepable::lightgbm_params());
        params.retain(|p| p.name != "RegAlpha");
        match build_pipeline_node_props(TrainerName::LightGbmRegression, &params) {
            Err(AutoMlError::IncompleteSweep { missing, .. }) => {
                assert_eq!(missing, vec!["RegAlpha".to_string()]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn unset_parameter_is_rejected() {
        let mut params = all_set_to_one(sweepable::sdca_params());
        params[2].clear();
        assert!(matches!(
            build_pipeline_node_props(TrainerName::SdcaMulti, &params),
            Err(AutoMlError::UnsetParameter { parameter }) if parameter == "ConvergenceTolerance"
        ));
    }

    #[test]
    fn duplicate_parameter_is_rejected() {
        let mut params = all_set_to_one(sweepable::sdca_params());
        let dup = params[0].clone();
        params.push(dup);
        assert!(matches!(
            build_pipeline_node_props(TrainerName::SdcaBinary, &params),
            Err(AutoMlError::DuplicateParameter { .. })
        ));
    }

    #[test]
    fn raw_values_are_copied_verbatim() {
        let mut params = sweepable::lightgbm_params();
        for param in &mut params {
            param.raw_value = Some(param.default_value.clone());
        }
        params[4].set_value(false);
        params[1].set_value(0.05);

        let props = build_pipeline_node_props(TrainerName::LightGbmBinary, &params).unwrap();
        assert_eq!(props.scalar("UseSoftmax"), Some(&ParameterValue::Bool(false)));
        assert_eq!(props.scalar("LearningRate"), Some(&ParameterValue::Float(0.05)));
        assert_eq!(props.scalar("NumBoostRound"), Some(&ParameterValue::Int(100)));
    }

    #[test]
    fn reverse_flattens_unknown_blocks() {
        let props = PropertyBag::new().with_custom(
            "Booster",
            CustomProperty::new("Other.Booster").with_property("Depth", 3),
        );
        let set = build_parameter_set(TrainerName::FastTreeBinary, &props).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set["Depth"].value_text, "3");
    }

    #[test]
    fn reverse_rejects_colliding_leaves() {
        let props = PropertyBag::new().with_scalar("RegLambda", 1).with_custom(
            "TreeBooster",
            CustomProperty::new("Microsoft.ML.LightGBM.TreeBooster")
                .with_property("RegLambda", 2),
        );
        assert!(matches!(
            build_parameter_set(TrainerName::LightGbmBinary, &props),
            Err(AutoMlError::DuplicateParameter { .. })
        ));
    }

    #[test]
    fn reverse_keeps_bag_order() {
        let props = PropertyBag::new()
            .with_scalar("Shuffle", true)
            .with_scalar("L2Const", "<Auto>")
            .with_scalar("MaxIterations", 20);
        let set = build_parameter_set(TrainerName::SdcaBinary, &props).unwrap();
        let names: Vec<_> = set.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Shuffle", "L2Const", "MaxIterations"]);
        assert_eq!(set.to_string(), "Shuffle=true, L2Const=<Auto>, MaxIterations=20");
    }

    #[test]
    fn merge_routes_flat_booster_member() {
        let mut target = PropertyBag::new().with_scalar("NumLeaves", 31);
        let overrides = PropertyBag::new().with_scalar("RegLambda", 0.5);
        merge_pipeline_node_props(TrainerName::LightGbmBinary, &mut target, &overrides).unwrap();
        assert_eq!(
            serde_json::to_value(&target).unwrap(),
            json!({
                "NumLeaves": 31,
                "TreeBooster": {
                    "Name": "Microsoft.ML.LightGBM.TreeBooster",
                    "Properties": { "RegLambda": 0.5 }
                }
            })
        );
    }

    #[test]
    fn merge_rejects_wrong_block_type() {
        let mut target = PropertyBag::new();
        let overrides = PropertyBag::new().with_custom(
            "TreeBooster",
            CustomProperty::new("LightGbm.DartBooster").with_property("RegLambda", 1),
        );
        assert!(matches!(
            merge_pipeline_node_props(TrainerName::LightGbmMulti, &mut target, &overrides),
            Err(AutoMlError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn failed_merge_leaves_target_unchanged() {
        let mut target = PropertyBag::new().with_scalar("NumLeaves", 31);
        let before = target.clone();
        let overrides = PropertyBag::new()
            .with_scalar("NumLeaves", 64)
            .with_scalar("RegAlpha", 0.25)
            .with_scalar("Bogus", 1);

        match merge_pipeline_node_props(TrainerName::LightGbmBinary, &mut target, &overrides) {
            Err(AutoMlError::SchemaMismatch { parameter, .. }) => assert_eq!(parameter, "Bogus"),
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(target, before);
        assert_eq!(target.scalar("NumLeaves"), Some(&ParameterValue::Int(31)));
    }

    #[test]
    fn failed_apply_leaves_sweep_unchanged() {
        let mut params = sweepable::sdca_params();
        let mut set = ParameterSet::new();
        set.push("L2Const", &ParameterValue::Float(1e-5)).unwrap();
        set.push("MaxIterations", &ParameterValue::from("many")).unwrap();

        assert!(matches!(
            apply_parameter_set(TrainerName::SdcaBinary, &mut params, &set),
            Err(AutoMlError::InvalidDomain { .. })
        ));
        assert!(params.iter().all(|param| param.value().is_none()));
    }

    #[test]
    fn apply_parameter_set_parses_by_domain() {
        let mut params = sweepable::sdca_params();
        let mut set = ParameterSet::new();
        set.push("L2Const", &ParameterValue::Float(1e-5)).unwrap();
        set.push("MaxIterations", &ParameterValue::from("<Auto>")).unwrap();
        set.push("Shuffle", &ParameterValue::Bool(false)).unwrap();

        apply_parameter_set(TrainerName::SdcaBinary, &mut params, &set).unwrap();
        assert_eq!(params[0].value(), Some(&ParameterValue::Float(1e-5)));
        assert_eq!(params[3].value(), Some(&ParameterValue::Text("<Auto>".into())));
        assert_eq!(params[4].value(), Some(&ParameterValue::Bool(false)));
        assert!(params[1].value().is_none());
    }

    #[test]
    fn apply_parameter_set_rejects_unknown_name() {
        let mut params = sweepable::sgd_params();
        let mut set = ParameterSet::new();
        set.push("NumTrees", &ParameterValue::Int(20)).unwrap();
        assert!(matches!(
            apply_parameter_set(TrainerName::SgdBinary, &mut params, &set),
            Err(AutoMlError::SchemaMismatch { .. })
        ));
    }
}
