//! Sweep parameter definitions and their value domains.

use automl_types::{AutoMlError, MlResult, ParameterValue};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of grid points used for a numeric range that declares no step count.
pub const DEFAULT_GRID_STEPS: usize = 5;

/// Describes the values a sweep parameter may take.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParameterDomain {
    /// Continuous range [min, max].
    FloatRange {
        min: f64,
        max: f64,
        log_scale: bool,
        steps: Option<usize>,
    },
    /// Integer range [min, max] inclusive.
    IntRange {
        min: i64,
        max: i64,
        log_scale: bool,
        steps: Option<usize>,
    },
    /// Fixed set of options.
    Discrete { options: Vec<ParameterValue> },
}

impl ParameterDomain {
    /// Check that the domain can be sampled.
    pub fn check(&self) -> Result<(), String> {
        match self {
            Self::FloatRange {
                min,
                max,
                log_scale,
                steps,
            } => {
                if !min.is_finite() || !max.is_finite() {
                    return Err(format!("range bounds must be finite, got [{min}, {max}]"));
                }
                if min > max {
                    return Err(format!("inverted range [{min}, {max}]"));
                }
                if *log_scale && *min <= 0.0 {
                    return Err(format!("log-scaled range must be positive, got min {min}"));
                }
                check_steps(*steps)
            }
            Self::IntRange {
                min,
                max,
                log_scale,
                steps,
            } => {
                if min > max {
                    return Err(format!("inverted range [{min}, {max}]"));
                }
                if *log_scale && *min <= 0 {
                    return Err(format!("log-scaled range must be positive, got min {min}"));
                }
                check_steps(*steps)
            }
            Self::Discrete { options } => {
                if options.is_empty() {
                    Err("discrete domain has no options".to_string())
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Whether `value` lies inside the domain.
    pub fn contains(&self, value: &ParameterValue) -> bool {
        match self {
            Self::FloatRange { min, max, .. } => value
                .as_f64()
                .map(|v| v >= *min && v <= *max)
                .unwrap_or(false),
            Self::IntRange { min, max, .. } => match value {
                ParameterValue::Int(v) => v >= min && v <= max,
                _ => false,
            },
            Self::Discrete { options } => options.contains(value),
        }
    }

    /// Draw a random value from the domain.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ParameterValue {
        match self {
            Self::FloatRange {
                min,
                max,
                log_scale,
                ..
            } => {
                if *log_scale {
                    let log_val: f64 = rng.gen_range(min.ln()..=max.ln());
                    ParameterValue::Float(log_val.exp().clamp(*min, *max))
                } else if (max - min).is_finite() {
                    ParameterValue::Float(rng.gen_range(*min..=*max))
                } else {
                    let t: f64 = rng.gen();
                    ParameterValue::Float(interpolate(*min, *max, t))
                }
            }
            Self::IntRange {
                min,
                max,
                log_scale,
                ..
            } => {
                if *log_scale {
                    let log_val: f64 = rng.gen_range((*min as f64).ln()..=(*max as f64).ln());
                    ParameterValue::Int((log_val.exp().round() as i64).clamp(*min, *max))
                } else {
                    ParameterValue::Int(rng.gen_range(*min..=*max))
                }
            }
            Self::Discrete { options } => options[rng.gen_range(0..options.len())].clone(),
        }
    }

    /// Evenly spaced grid over the domain (log-spaced for log-scaled ranges).
    pub fn grid_values(&self) -> Vec<ParameterValue> {
        match self {
            Self::FloatRange {
                min,
                max,
                log_scale,
                steps,
            } => spaced(*min, *max, *log_scale, steps.unwrap_or(DEFAULT_GRID_STEPS))
                .into_iter()
                .map(ParameterValue::Float)
                .collect(),
            Self::IntRange {
                min,
                max,
                log_scale,
                steps,
            } => {
                let steps = steps.unwrap_or(DEFAULT_GRID_STEPS);
                if !log_scale && max.abs_diff(*min) < steps as u64 {
                    return (*min..=*max).map(ParameterValue::Int).collect();
                }
                let mut values: Vec<i64> = spaced(*min as f64, *max as f64, *log_scale, steps)
                    .into_iter()
                    .map(|v| (v.round() as i64).clamp(*min, *max))
                    .collect();
                values.dedup();
                values.into_iter().map(ParameterValue::Int).collect()
            }
            Self::Discrete { options } => options.clone(),
        }
    }
}

fn check_steps(steps: Option<usize>) -> Result<(), String> {
    match steps {
        Some(n) if n < 2 => Err(format!("step count must be at least 2, got {n}")),
        _ => Ok(()),
    }
}

fn spaced(min: f64, max: f64, log_scale: bool, steps: usize) -> Vec<f64> {
    if min == max {
        return vec![min];
    }
    let steps = steps.max(2);
    (0..steps)
        .map(|i| {
            let t = i as f64 / (steps - 1) as f64;
            if log_scale {
                (min.ln() + t * (max.ln() - min.ln())).exp().clamp(min, max)
            } else {
                interpolate(min, max, t)
            }
        })
        .collect()
}

/// Point at fraction `t` of [min, max]; stays finite when the width overflows.
fn interpolate(min: f64, max: f64, t: f64) -> f64 {
    let width = max - min;
    let value = if width.is_finite() {
        min + t * width
    } else {
        min * (1.0 - t) + max * t
    };
    value.clamp(min, max)
}

/// One tunable hyperparameter of a trainer.
///
/// `raw_value` is the only mutable part and belongs to the trial that is
/// currently evaluating this parameter list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepParameter {
    pub name: String,
    pub domain: ParameterDomain,
    /// Value used when the trainer is instantiated without pinned values.
    pub default_value: ParameterValue,
    pub raw_value: Option<ParameterValue>,
}

impl SweepParameter {
    pub fn float(name: impl Into<String>, min: f64, max: f64) -> Self {
        Self::with_domain(
            name,
            ParameterDomain::FloatRange {
                min,
                max,
                log_scale: false,
                steps: None,
            },
            ParameterValue::Float(min),
        )
    }

    pub fn int(name: impl Into<String>, min: i64, max: i64) -> Self {
        Self::with_domain(
            name,
            ParameterDomain::IntRange {
                min,
                max,
                log_scale: false,
                steps: None,
            },
            ParameterValue::Int(min),
        )
    }

    /// Discrete parameter; the first option is the default.
    ///
    /// An empty option list gets `Bool(false)` as a placeholder default.
    /// [`SweepParameter::validate`] rejects such a parameter for having no
    /// options.
    pub fn discrete<I, V>(name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ParameterValue>,
    {
        let options: Vec<ParameterValue> = options.into_iter().map(Into::into).collect();
        let default_value = options
            .first()
            .cloned()
            .unwrap_or(ParameterValue::Bool(false));
        Self::with_domain(name, ParameterDomain::Discrete { options }, default_value)
    }

    fn with_domain(
        name: impl Into<String>,
        domain: ParameterDomain,
        default_value: ParameterValue,
    ) -> Self {
        Self {
            name: name.into(),
            domain,
            default_value,
            raw_value: None,
        }
    }

    /// Sample numeric ranges in log space.
    pub fn log_scale(mut self) -> Self {
        match &mut self.domain {
            ParameterDomain::FloatRange { log_scale, .. }
            | ParameterDomain::IntRange { log_scale, .. } => *log_scale = true,
            ParameterDomain::Discrete { .. } => {}
        }
        self
    }

    /// Number of grid points for numeric ranges.
    pub fn steps(mut self, n: usize) -> Self {
        match &mut self.domain {
            ParameterDomain::FloatRange { steps, .. } | ParameterDomain::IntRange { steps, .. } => {
                *steps = Some(n)
            }
            ParameterDomain::Discrete { .. } => {}
        }
        self
    }

    pub fn with_default(mut self, value: impl Into<ParameterValue>) -> Self {
        self.default_value = value.into();
        self
    }

    pub fn value(&self) -> Option<&ParameterValue> {
        self.raw_value.as_ref()
    }

    pub fn set_value(&mut self, value: impl Into<ParameterValue>) {
        self.raw_value = Some(value.into());
    }

    pub fn clear(&mut self) {
        self.raw_value = None;
    }

    /// Assign a random value drawn from the domain.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.raw_value = Some(self.domain.sample(rng));
    }

    /// Registration check: the domain is well formed and holds the default.
    pub fn validate(&self) -> MlResult<()> {
        self.domain.check().map_err(|message| AutoMlError::InvalidDomain {
            parameter: self.name.clone(),
            message,
        })?;
        if !self.domain.contains(&self.default_value) {
            return Err(AutoMlError::InvalidDomain {
                parameter: self.name.clone(),
                message: format!("default {} lies outside the domain", self.default_value),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn inverted_range_is_rejected() {
        let param = SweepParameter::float("LearningRate", 0.4, 0.025);
        match param.validate() {
            Err(AutoMlError::InvalidDomain { parameter, message }) => {
                assert_eq!(parameter, "LearningRate");
                assert!(message.contains("inverted"));
            }
            other => panic!("unexpected validation result: {other:?}"),
        }
    }

    #[test]
    fn empty_discrete_is_rejected() {
        let param = SweepParameter::discrete("Shuffle", Vec::<bool>::new());
        match param.validate() {
            Err(AutoMlError::InvalidDomain { message, .. }) => {
                assert!(message.contains("no options"), "{message}");
            }
            other => panic!("unexpected validation result: {other:?}"),
        }
    }

    #[test]
    fn log_scale_requires_positive_min() {
        let param = SweepParameter::float("L2", 0.0, 1.0).log_scale();
        assert!(param.validate().is_err());
    }

    #[test]
    fn default_must_lie_in_domain() {
        let param = SweepParameter::int("NumLeaves", 2, 128).with_default(500);
        assert!(param.validate().is_err());
        let param = SweepParameter::int("NumLeaves", 2, 128).with_default(20);
        assert!(param.validate().is_ok());
    }

    #[test]
    fn samples_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let params = [
            SweepParameter::float("LearningRate", 0.025, 0.4).log_scale(),
            SweepParameter::int("NumLeaves", 2, 128).log_scale(),
            SweepParameter::int("MinDataPerLeaf", 1, 50),
            SweepParameter::discrete("UseCat", [true, false]),
        ];
        for param in &params {
            for _ in 0..200 {
                let value = param.domain.sample(&mut rng);
                assert!(
                    param.domain.contains(&value),
                    "{} out of domain: {value}",
                    param.name
                );
            }
        }
    }

    #[test]
    fn randomize_sets_raw_value() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut param = SweepParameter::discrete("NumBoostRound", [10, 20, 50]);
        assert!(param.value().is_none());
        param.randomize(&mut rng);
        assert!(param.value().is_some());
        param.clear();
        assert!(param.value().is_none());
    }

    #[test]
    fn log_grid_is_geometric() {
        let param = SweepParameter::float("Lambda", 0.001, 1.0).log_scale().steps(4);
        let grid: Vec<f64> = param
            .domain
            .grid_values()
            .iter()
            .filter_map(ParameterValue::as_f64)
            .collect();
        assert_eq!(grid.len(), 4);
        assert!((grid[1] - 0.01).abs() < 1e-9);
        assert!((grid[2] - 0.1).abs() < 1e-9);
        assert!((grid[3] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn small_int_range_grid_lists_every_value() {
        let param = SweepParameter::int("MemorySize", 3, 5);
        assert_eq!(
            param.domain.grid_values(),
            vec![
                ParameterValue::Int(3),
                ParameterValue::Int(4),
                ParameterValue::Int(5)
            ]
        );
    }

    #[test]
    fn discrete_grid_returns_options() {
        let param =
            SweepParameter::discrete("L2Const", [ParameterValue::from("<Auto>"), 1e-7.into()]);
        assert_eq!(param.domain.grid_values().len(), 2);
        assert_eq!(param.default_value, ParameterValue::Text("<Auto>".into()));
    }

    #[test]
    fn full_width_int_range_builds_grid() {
        let param = SweepParameter::int("Seed", i64::MIN, i64::MAX);
        assert!(param.validate().is_ok());

        let grid = param.domain.grid_values();
        assert_eq!(grid.len(), DEFAULT_GRID_STEPS);
        assert_eq!(grid.first(), Some(&ParameterValue::Int(i64::MIN)));
        assert_eq!(grid.last(), Some(&ParameterValue::Int(i64::MAX)));
    }

    #[test]
    fn unbounded_width_float_range_samples_and_grids() {
        let param = SweepParameter::float("Offset", -f64::MAX, f64::MAX);
        assert!(param.validate().is_ok());

        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let value = param.domain.sample(&mut rng);
            assert!(value.as_f64().is_some_and(f64::is_finite), "{value}");
            assert!(param.domain.contains(&value));
        }
        let grid = param.domain.grid_values();
        assert_eq!(grid.len(), DEFAULT_GRID_STEPS);
        assert!(grid.iter().all(|value| param.domain.contains(value)));
        assert_eq!(grid[2], ParameterValue::Float(0.0));
    }

    #[test]
    fn sweep_parameter_serialization() {
        let mut param = SweepParameter::int("NumLeaves", 2, 128).log_scale().steps(4);
        param.set_value(16);

        let json = serde_json::to_string(&param).unwrap();
        let back: SweepParameter = serde_json::from_str(&json).unwrap();
        assert_eq!(param, back);
        assert_eq!(back.value(), Some(&ParameterValue::Int(16)));
    }
}
