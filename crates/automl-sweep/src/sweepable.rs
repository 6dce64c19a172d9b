//! Sweepable hyperparameter spaces, one builder per trainer family.
//!
//! Each builder returns a fresh list with no raw values assigned. Parameter
//! order is stable and is the order the translator writes properties in.

use automl_types::{ParameterValue, TrainerFamily};

use crate::parameter::SweepParameter;

const AUTO: &str = "<Auto>";

/// Sweep space for the given trainer family.
pub fn for_family(family: TrainerFamily) -> Vec<SweepParameter> {
    match family {
        TrainerFamily::AveragedPerceptron => averaged_perceptron_params(),
        TrainerFamily::FastForest => fast_forest_params(),
        TrainerFamily::FastTree => fast_tree_params(),
        TrainerFamily::FastTreeTweedie => fast_tree_tweedie_params(),
        TrainerFamily::LightGbm => lightgbm_params(),
        TrainerFamily::LinearSvm => linear_svm_params(),
        TrainerFamily::LogisticRegression => lbfgs_params(),
        TrainerFamily::OnlineGradientDescent => online_gradient_descent_params(),
        TrainerFamily::OrdinaryLeastSquares => ols_params(),
        TrainerFamily::Poisson => lbfgs_params(),
        TrainerFamily::Sdca => sdca_params(),
        TrainerFamily::Sgd => sgd_params(),
        TrainerFamily::SymSgd => sym_sgd_params(),
    }
}

fn averaged_linear_params() -> Vec<SweepParameter> {
    vec![
        SweepParameter::discrete("LearningRate", [0.01, 0.1, 0.5, 1.0]).with_default(1.0),
        SweepParameter::discrete("DecreaseLearningRate", [false, true]),
        SweepParameter::float("L2RegularizerWeight", 0.0, 0.4).steps(5),
    ]
}

fn online_linear_params() -> Vec<SweepParameter> {
    vec![
        SweepParameter::int("NumIterations", 1, 100)
            .log_scale()
            .steps(10)
            .with_default(1),
        SweepParameter::float("InitWtsDiameter", 0.0, 1.0).steps(5),
        SweepParameter::discrete("Shuffle", [true, false]),
    ]
}

fn tree_params() -> Vec<SweepParameter> {
    vec![
        SweepParameter::int("NumLeaves", 2, 128)
            .log_scale()
            .steps(4)
            .with_default(20),
        SweepParameter::discrete("MinDocumentsInLeafs", [1, 10, 50]).with_default(10),
        SweepParameter::discrete("NumTrees", [20, 100, 500]).with_default(100),
    ]
}

pub fn averaged_perceptron_params() -> Vec<SweepParameter> {
    let mut params = averaged_linear_params();
    params.extend(online_linear_params());
    params
}

pub fn online_gradient_descent_params() -> Vec<SweepParameter> {
    let mut params = averaged_linear_params();
    params.extend(online_linear_params());
    params
}

pub fn fast_tree_params() -> Vec<SweepParameter> {
    let mut params = tree_params();
    params.extend([
        SweepParameter::float("LearningRates", 0.025, 0.4)
            .log_scale()
            .with_default(0.2),
        SweepParameter::float("Shrinkage", 0.025, 4.0)
            .log_scale()
            .with_default(1.0),
    ]);
    params
}

pub fn fast_forest_params() -> Vec<SweepParameter> {
    let mut params = tree_params();
    params.push(SweepParameter::float("FeatureFraction", 0.3, 1.0).with_default(1.0));
    params
}

pub fn fast_tree_tweedie_params() -> Vec<SweepParameter> {
    let mut params = fast_tree_params();
    params.push(SweepParameter::float("Index", 1.0, 2.0).with_default(1.5));
    params
}

/// LightGBM space. `RegLambda` and `RegAlpha` belong to the tree booster
/// sub-object rather than the trainer itself.
pub fn lightgbm_params() -> Vec<SweepParameter> {
    vec![
        SweepParameter::discrete("NumBoostRound", [10, 20, 50, 100, 150, 200]).with_default(100),
        SweepParameter::float("LearningRate", 0.025, 0.4)
            .log_scale()
            .with_default(0.2),
        SweepParameter::int("NumLeaves", 2, 128)
            .log_scale()
            .steps(4)
            .with_default(31),
        SweepParameter::discrete("MinDataPerLeaf", [1, 10, 20, 50]).with_default(20),
        SweepParameter::discrete("UseSoftmax", [true, false]),
        SweepParameter::discrete("UseCat", [true, false]),
        SweepParameter::discrete("UseMissing", [true, false]),
        SweepParameter::discrete("MinDataPerGroup", [10, 50, 100, 200]).with_default(100),
        SweepParameter::discrete("MaxCatThreshold", [8, 16, 32, 64]).with_default(32),
        SweepParameter::discrete("CatSmooth", [1, 10, 20]).with_default(10),
        SweepParameter::discrete("CatL2", [0.1, 0.5, 1.0, 5.0, 10.0]).with_default(10.0),
        SweepParameter::discrete("RegLambda", [0.0, 0.5, 1.0]).with_default(0.0),
        SweepParameter::discrete("RegAlpha", [0.0, 0.5, 1.0]).with_default(0.0),
    ]
}

pub fn linear_svm_params() -> Vec<SweepParameter> {
    vec![
        SweepParameter::float("Lambda", 0.00001, 0.1)
            .log_scale()
            .steps(4)
            .with_default(0.001),
        SweepParameter::discrete("PerformProjection", [false, true]),
        SweepParameter::discrete("NoBias", [false, true]),
        SweepParameter::int("NumIterations", 1, 100)
            .log_scale()
            .steps(10)
            .with_default(1),
    ]
}

/// Space shared by the L-BFGS based trainers (logistic and Poisson regression).
pub fn lbfgs_params() -> Vec<SweepParameter> {
    vec![
        SweepParameter::float("L2Weight", 0.0, 1.0).steps(4).with_default(1.0),
        SweepParameter::float("L1Weight", 0.0, 1.0).steps(4).with_default(1.0),
        SweepParameter::discrete("OptTol", [1e-4, 1e-7]).with_default(1e-7),
        SweepParameter::discrete("MemorySize", [5, 20, 50]).with_default(20),
        SweepParameter::int("MaxIterations", 1, 1_000_000)
            .log_scale()
            .with_default(1_000_000),
        SweepParameter::discrete("EnforceNonNegativity", [false, true]),
        SweepParameter::discrete("DenseOptimizer", [false, true]),
    ]
}

pub fn ols_params() -> Vec<SweepParameter> {
    vec![
        SweepParameter::discrete("L2Weight", [1e-6, 0.1, 1.0]),
        SweepParameter::discrete("PerParameterSignificance", [true, false]),
    ]
}

pub fn sdca_params() -> Vec<SweepParameter> {
    vec![
        SweepParameter::discrete(
            "L2Const",
            vec![
                ParameterValue::from(AUTO),
                1e-7.into(),
                1e-6.into(),
                1e-5.into(),
                1e-4.into(),
                1e-3.into(),
                1e-2.into(),
            ],
        ),
        SweepParameter::discrete(
            "L1Threshold",
            vec![
                ParameterValue::from(AUTO),
                0.0.into(),
                0.25.into(),
                0.5.into(),
                0.75.into(),
                1.0.into(),
            ],
        ),
        SweepParameter::discrete("ConvergenceTolerance", [0.001, 0.01, 0.1, 0.2]).with_default(0.1),
        SweepParameter::discrete(
            "MaxIterations",
            vec![ParameterValue::from(AUTO), 10.into(), 20.into(), 100.into()],
        ),
        SweepParameter::discrete("Shuffle", [true, false]),
        SweepParameter::discrete("BiasLearningRate", [0.0, 0.01, 0.1, 1.0]),
    ]
}

pub fn sgd_params() -> Vec<SweepParameter> {
    vec![
        SweepParameter::discrete("MaxIterations", [1, 5, 10, 20]).with_default(20),
        SweepParameter::discrete("ConvergenceTolerance", [1e-2, 1e-3, 1e-4, 1e-5])
            .with_default(1e-4),
        SweepParameter::float("L2Weight", 1e-7, 5e-2)
            .log_scale()
            .with_default(1e-6),
        SweepParameter::discrete("Shuffle", [true, false]),
    ]
}

pub fn sym_sgd_params() -> Vec<SweepParameter> {
    vec![
        SweepParameter::int("NumberOfIterations", 1, 50)
            .log_scale()
            .steps(5)
            .with_default(50),
        SweepParameter::float("LearningRate", 0.01, 1.0)
            .log_scale()
            .with_default(0.01),
        SweepParameter::discrete("L2Regularization", [0.0, 1e-5, 1e-6, 1e-7]),
        SweepParameter::discrete(
            "UpdateFrequency",
            vec![ParameterValue::from(AUTO), 5.into(), 20.into()],
        ),
        SweepParameter::discrete("Shuffle", [true, false]),
    ]
}
