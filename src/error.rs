//! User-facing error type.
//!
//! Every failure that reaches the binary is an `AppError`: a message that is
//! printed as-is plus the process exit code.
//!
//! Exit codes:
//! - `2` bad input, I/O, or a cancelled prompt
//! - `3` a model artifact is missing or cannot be deserialized
//! - `4` prediction or terminal failure

use crate::models::ModelError;

pub const EXIT_INPUT: u8 = 2;
pub const EXIT_ARTIFACT: u8 = 3;
pub const EXIT_RUNTIME: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::new(EXIT_INPUT, message)
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        Self::new(EXIT_RUNTIME, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        let exit_code = match err {
            ModelError::ArtifactMissing { .. } | ModelError::ArtifactCorrupt { .. } => EXIT_ARTIFACT,
            ModelError::Prediction { .. } => EXIT_RUNTIME,
        };
        Self::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn missing_artifact_maps_to_artifact_exit_code() {
        let err: AppError = ModelError::ArtifactMissing {
            label: "XGBoost model".to_string(),
            path: PathBuf::from("models/xgb_model.onnx"),
        }
        .into();
        assert_eq!(err.exit_code(), EXIT_ARTIFACT);
        assert!(err.message().contains("models/xgb_model.onnx"));
    }

    #[test]
    fn prediction_failure_maps_to_runtime_exit_code() {
        let err: AppError = ModelError::Prediction {
            label: "CatBoost model".to_string(),
            cause: "non-finite output".to_string(),
        }
        .into();
        assert_eq!(err.exit_code(), EXIT_RUNTIME);
    }
}
