use serde::{Deserialize, Serialize};
use std::fmt;

/// Machine-learning task a trainer solves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskKind {
    BinaryClassification,
    MulticlassClassification,
    Regression,
}

impl TaskKind {
    pub fn all() -> [TaskKind; 3] {
        [
            TaskKind::BinaryClassification,
            TaskKind::MulticlassClassification,
            TaskKind::Regression,
        ]
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TaskKind::BinaryClassification => "binary-classification",
            TaskKind::MulticlassClassification => "multiclass-classification",
            TaskKind::Regression => "regression",
        };
        write!(f, "{name}")
    }
}

/// Algorithm shared by the task variants of a trainer.
///
/// Variants of one family share a single hyperparameter schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrainerFamily {
    AveragedPerceptron,
    FastForest,
    FastTree,
    FastTreeTweedie,
    LightGbm,
    LinearSvm,
    LogisticRegression,
    OnlineGradientDescent,
    OrdinaryLeastSquares,
    Poisson,
    Sdca,
    Sgd,
    SymSgd,
}

/// Identity of a concrete trainer: one algorithm bound to one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TrainerName {
    AveragedPerceptronBinary,
    AveragedPerceptronOva,
    FastForestBinary,
    FastForestOva,
    FastForestRegression,
    FastTreeBinary,
    FastTreeOva,
    FastTreeRegression,
    FastTreeTweedieRegression,
    LightGbmBinary,
    LightGbmMulti,
    LightGbmRegression,
    LinearSvmBinary,
    LinearSvmOva,
    LogisticRegressionBinary,
    LogisticRegressionMulti,
    OnlineGradientDescentRegression,
    OrdinaryLeastSquaresRegression,
    PoissonRegression,
    SdcaBinary,
    SdcaMulti,
    SdcaRegression,
    SgdBinary,
    SgdOva,
    SymSgdBinary,
    SymSgdOva,
}

impl TrainerName {
    const ALL: [TrainerName; 26] = [
        TrainerName::AveragedPerceptronBinary,
        TrainerName::AveragedPerceptronOva,
        TrainerName::FastForestBinary,
        TrainerName::FastForestOva,
        TrainerName::FastForestRegression,
        TrainerName::FastTreeBinary,
        TrainerName::FastTreeOva,
        TrainerName::FastTreeRegression,
        TrainerName::FastTreeTweedieRegression,
        TrainerName::LightGbmBinary,
        TrainerName::LightGbmMulti,
        TrainerName::LightGbmRegression,
        TrainerName::LinearSvmBinary,
        TrainerName::LinearSvmOva,
        TrainerName::LogisticRegressionBinary,
        TrainerName::LogisticRegressionMulti,
        TrainerName::OnlineGradientDescentRegression,
        TrainerName::OrdinaryLeastSquaresRegression,
        TrainerName::PoissonRegression,
        TrainerName::SdcaBinary,
        TrainerName::SdcaMulti,
        TrainerName::SdcaRegression,
        TrainerName::SgdBinary,
        TrainerName::SgdOva,
        TrainerName::SymSgdBinary,
        TrainerName::SymSgdOva,
    ];

    /// Every trainer identity, in declaration order.
    pub fn all() -> &'static [TrainerName] {
        &Self::ALL
    }

    pub fn task(&self) -> TaskKind {
        use TrainerName::*;
        match self {
            AveragedPerceptronBinary | FastForestBinary | FastTreeBinary | LightGbmBinary
            | LinearSvmBinary | LogisticRegressionBinary | SdcaBinary | SgdBinary
            | SymSgdBinary => TaskKind::BinaryClassification,
            AveragedPerceptronOva | FastForestOva | FastTreeOva | LightGbmMulti | LinearSvmOva
            | LogisticRegressionMulti | SdcaMulti | SgdOva | SymSgdOva => {
                TaskKind::MulticlassClassification
            }
            FastForestRegression | FastTreeRegression | FastTreeTweedieRegression
            | LightGbmRegression | OnlineGradientDescentRegression
            | OrdinaryLeastSquaresRegression | PoissonRegression | SdcaRegression => {
                TaskKind::Regression
            }
        }
    }

    pub fn family(&self) -> TrainerFamily {
        use TrainerName::*;
        match self {
            AveragedPerceptronBinary | AveragedPerceptronOva => TrainerFamily::AveragedPerceptron,
            FastForestBinary | FastForestOva | FastForestRegression => TrainerFamily::FastForest,
            FastTreeBinary | FastTreeOva | FastTreeRegression => TrainerFamily::FastTree,
            FastTreeTweedieRegression => TrainerFamily::FastTreeTweedie,
            LightGbmBinary | LightGbmMulti | LightGbmRegression => TrainerFamily::LightGbm,
            LinearSvmBinary | LinearSvmOva => TrainerFamily::LinearSvm,
            LogisticRegressionBinary | LogisticRegressionMulti => {
                TrainerFamily::LogisticRegression
            }
            OnlineGradientDescentRegression => TrainerFamily::OnlineGradientDescent,
            OrdinaryLeastSquaresRegression => TrainerFamily::OrdinaryLeastSquares,
            PoissonRegression => TrainerFamily::Poisson,
            SdcaBinary | SdcaMulti | SdcaRegression => TrainerFamily::Sdca,
            SgdBinary | SgdOva => TrainerFamily::Sgd,
            SymSgdBinary | SymSgdOva => TrainerFamily::SymSgd,
        }
    }
}

impl fmt::Display for TrainerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
