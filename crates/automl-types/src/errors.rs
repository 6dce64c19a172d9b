use thiserror::Error;

use crate::task::TrainerName;

/// Main error type for the trainer extension layer
#[derive(Error, Debug)]
pub enum AutoMlError {
    #[error("Trainer not registered in catalog: {trainer}")]
    Lookup { trainer: TrainerName },

    #[error("Parameter {parameter} has no mapping in the {trainer} property schema")]
    SchemaMismatch {
        trainer: TrainerName,
        parameter: String,
    },

    #[error("Sweep for {trainer} is missing schema parameters: {}", .missing.join(", "))]
    IncompleteSweep {
        trainer: TrainerName,
        missing: Vec<String>,
    },

    #[error("Sweep parameter {parameter} has no value assigned")]
    UnsetParameter { parameter: String },

    #[error("Parameter {parameter} appears more than once")]
    DuplicateParameter { parameter: String },

    #[error("Invalid domain for parameter {parameter}: {message}")]
    InvalidDomain { parameter: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for trainer extension operations
pub type MlResult<T> = Result<T, AutoMlError>;

/// Macro for creating configuration errors
#[macro_export]
macro_rules! config_error {
    ($($arg:tt)*) => {
        $crate::AutoMlError::Config(format!($($arg)*))
    };
}

/// Macro for creating schema mismatch errors
#[macro_export]
macro_rules! schema_error {
    ($trainer:expr, $parameter:expr) => {
        $crate::AutoMlError::SchemaMismatch {
            trainer: $trainer,
            parameter: $parameter.to_string(),
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = AutoMlError::IncompleteSweep {
            trainer: TrainerName::LightGbmBinary,
            missing: vec!["RegLambda".to_string(), "RegAlpha".to_string()],
        };

        let text = error.to_string();
        assert!(text.contains("LightGbmBinary"));
        assert!(text.contains("RegLambda, RegAlpha"));
    }

    #[test]
    fn test_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: AutoMlError = json_error.into();

        match error {
            AutoMlError::Serialization(_) => (),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_macros() {
        let config_err = config_error!("tier {} out of order", 2);
        assert!(config_err.to_string().contains("tier 2 out of order"));

        let schema_err = schema_error!(TrainerName::SdcaBinary, "NumLeaves");
        match schema_err {
            AutoMlError::SchemaMismatch { trainer, parameter } => {
                assert_eq!(trainer, TrainerName::SdcaBinary);
                assert_eq!(parameter, "NumLeaves");
            }
            _ => panic!("Expected SchemaMismatch error"),
        }
    }
}
