//! Property schemas: where each hyperparameter lands in a pipeline node.
//!
//! Schemas are static data declared once per trainer family, so the binary,
//! multiclass and regression variants of an algorithm always agree.

use automl_types::TrainerFamily;
use std::collections::HashSet;

/// A sub-object embedded in a pipeline node's properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NestedBlock {
    /// Key of the block in the top-level property bag.
    pub property: &'static str,
    /// Type identifier written as the block's `Name`.
    pub type_name: &'static str,
    /// Sweep parameters routed into this block.
    pub members: &'static [&'static str],
}

/// Property layout of one trainer family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertySchema {
    pub scalars: &'static [&'static str],
    pub blocks: &'static [NestedBlock],
}

/// Destination of a single parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyRoute {
    Scalar,
    Nested(&'static NestedBlock),
}

impl PropertySchema {
    pub fn route(&self, name: &str) -> Option<PropertyRoute> {
        if self.scalars.iter().any(|scalar| *scalar == name) {
            return Some(PropertyRoute::Scalar);
        }
        self.blocks
            .iter()
            .find(|block| block.members.iter().any(|member| *member == name))
            .map(PropertyRoute::Nested)
    }

    /// Block stored under `property`, if the family declares one.
    pub fn block(&self, property: &str) -> Option<&'static NestedBlock> {
        self.blocks.iter().find(|block| block.property == property)
    }

    /// Every leaf parameter name: scalars first, then block members.
    pub fn leaf_names(&self) -> impl Iterator<Item = &'static str> {
        let scalars: &'static [&'static str] = self.scalars;
        let blocks: &'static [NestedBlock] = self.blocks;
        scalars
            .iter()
            .copied()
            .chain(blocks.iter().flat_map(|block| block.members.iter().copied()))
    }

    /// Names must not collide across scalars, block keys and block members.
    pub fn check(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        let names = self
            .leaf_names()
            .chain(self.blocks.iter().map(|block| block.property));
        for name in names {
            if !seen.insert(name) {
                return Err(format!("property name {name} declared twice"));
            }
        }
        if let Some(block) = self.blocks.iter().find(|block| block.members.is_empty()) {
            return Err(format!("block {} has no members", block.property));
        }
        Ok(())
    }
}

static AVERAGED_LINEAR: PropertySchema = PropertySchema {
    scalars: &[
        "LearningRate",
        "DecreaseLearningRate",
        "L2RegularizerWeight",
        "NumIterations",
        "InitWtsDiameter",
        "Shuffle",
    ],
    blocks: &[],
};

static FAST_FOREST: PropertySchema = PropertySchema {
    scalars: &[
        "NumLeaves",
        "MinDocumentsInLeafs",
        "NumTrees",
        "FeatureFraction",
    ],
    blocks: &[],
};

static FAST_TREE: PropertySchema = PropertySchema {
    scalars: &[
        "NumLeaves",
        "MinDocumentsInLeafs",
        "NumTrees",
        "LearningRates",
        "Shrinkage",
    ],
    blocks: &[],
};

static FAST_TREE_TWEEDIE: PropertySchema = PropertySchema {
    scalars: &[
        "NumLeaves",
        "MinDocumentsInLeafs",
        "NumTrees",
        "LearningRates",
        "Shrinkage",
        "Index",
    ],
    blocks: &[],
};

static LIGHTGBM: PropertySchema = PropertySchema {
    scalars: &[
        "NumBoostRound",
        "LearningRate",
        "NumLeaves",
        "MinDataPerLeaf",
        "UseSoftmax",
        "UseCat",
        "UseMissing",
        "MinDataPerGroup",
        "MaxCatThreshold",
        "CatSmooth",
        "CatL2",
    ],
    blocks: &[NestedBlock {
        property: "TreeBooster",
        type_name: "Microsoft.ML.LightGBM.TreeBooster",
        members: &["RegLambda", "RegAlpha"],
    }],
};

static LINEAR_SVM: PropertySchema = PropertySchema {
    scalars: &["Lambda", "PerformProjection", "NoBias", "NumIterations"],
    blocks: &[],
};

static LBFGS: PropertySchema = PropertySchema {
    scalars: &[
        "L2Weight",
        "L1Weight",
        "OptTol",
        "MemorySize",
        "MaxIterations",
        "EnforceNonNegativity",
        "DenseOptimizer",
    ],
    blocks: &[],
};

static OLS: PropertySchema = PropertySchema {
    scalars: &["L2Weight", "PerParameterSignificance"],
    blocks: &[],
};

static SDCA: PropertySchema = PropertySchema {
    scalars: &[
        "L2Const",
        "L1Threshold",
        "ConvergenceTolerance",
        "MaxIterations",
        "Shuffle",
        "BiasLearningRate",
    ],
    blocks: &[],
};

static SGD: PropertySchema = PropertySchema {
    scalars: &[
        "MaxIterations",
        "ConvergenceTolerance",
        "L2Weight",
        "Shuffle",
    ],
    blocks: &[],
};

static SYM_SGD: PropertySchema = PropertySchema {
    scalars: &[
        "NumberOfIterations",
        "LearningRate",
        "L2Regularization",
        "UpdateFrequency",
        "Shuffle",
    ],
    blocks: &[],
};

/// Schema shared by every trainer of `family`.
pub fn schema_for(family: TrainerFamily) -> &'static PropertySchema {
    match family {
        TrainerFamily::AveragedPerceptron | TrainerFamily::OnlineGradientDescent => {
            &AVERAGED_LINEAR
        }
        TrainerFamily::FastForest => &FAST_FOREST,
        TrainerFamily::FastTree => &FAST_TREE,
        TrainerFamily::FastTreeTweedie => &FAST_TREE_TWEEDIE,
        TrainerFamily::LightGbm => &LIGHTGBM,
        TrainerFamily::LinearSvm => &LINEAR_SVM,
        TrainerFamily::LogisticRegression | TrainerFamily::Poisson => &LBFGS,
        TrainerFamily::OrdinaryLeastSquares => &OLS,
        TrainerFamily::Sdca => &SDCA,
        TrainerFamily::Sgd => &SGD,
        TrainerFamily::SymSgd => &SYM_SGD,
    }
}
