//! Where the model artifacts live.
//!
//! The directory comes from, in order: `--model-dir`, the `RELSCORE_MODEL_DIR`
//! environment variable (a `.env` file is honoured), then `./models`.

use std::path::PathBuf;

use crate::cli::ModelArgs;

pub const MODEL_DIR_ENV: &str = "RELSCORE_MODEL_DIR";
pub const DEFAULT_MODEL_DIR: &str = "models";

pub const MODEL_A_FILE: &str = "xgb_model.onnx";
pub const MODEL_A_LABEL: &str = "XGBoost model";
pub const MODEL_B_FILE: &str = "cat_model.onnx";
pub const MODEL_B_LABEL: &str = "CatBoost model";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    pub dir: PathBuf,
    pub file_a: String,
    pub file_b: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_MODEL_DIR),
            file_a: MODEL_A_FILE.to_string(),
            file_b: MODEL_B_FILE.to_string(),
        }
    }
}

impl ModelConfig {
    /// Resolve from CLI args plus the process environment.
    pub fn from_env(args: &ModelArgs) -> Self {
        dotenvy::dotenv().ok();
        let env_dir = std::env::var(MODEL_DIR_ENV).ok();
        Self::resolve(args, env_dir)
    }

    /// Pure precedence rule: flag > env > default.
    pub fn resolve(args: &ModelArgs, env_dir: Option<String>) -> Self {
        let dir = args
            .model_dir
            .clone()
            .or_else(|| env_dir.filter(|d| !d.trim().is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_DIR));
        Self {
            dir,
            file_a: args.model_a.clone(),
            file_b: args.model_b.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(dir: Option<&str>) -> ModelArgs {
        ModelArgs {
            model_dir: dir.map(PathBuf::from),
            model_a: MODEL_A_FILE.to_string(),
            model_b: MODEL_B_FILE.to_string(),
        }
    }

    #[test]
    fn flag_wins_over_env() {
        let config = ModelConfig::resolve(&args(Some("/opt/models")), Some("/env/models".to_string()));
        assert_eq!(config.dir, PathBuf::from("/opt/models"));
    }

    #[test]
    fn env_used_when_no_flag() {
        let config = ModelConfig::resolve(&args(None), Some("/env/models".to_string()));
        assert_eq!(config.dir, PathBuf::from("/env/models"));
    }

    #[test]
    fn blank_env_falls_back_to_default() {
        let config = ModelConfig::resolve(&args(None), Some("  ".to_string()));
        assert_eq!(config, ModelConfig::default());
        assert_eq!(ModelConfig::resolve(&args(None), None), ModelConfig::default());
    }
}
