//! Model artifact loader.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::features::FeatureRecord;
use crate::models::{EvalError, ModelArtifact, ModelError, OnnxModel, Regressor};

/// A compiled model plus where it came from.
pub struct LoadedModel {
    /// Human label used in error messages ("XGBoost model").
    pub label: String,
    pub path: PathBuf,
    regressor: Box<dyn Regressor>,
}

impl LoadedModel {
    /// Wrap an already-built regressor (no file involved).
    pub fn from_regressor(label: impl Into<String>, regressor: Box<dyn Regressor>) -> Self {
        Self {
            label: label.into(),
            path: PathBuf::new(),
            regressor,
        }
    }

    /// Invoke the model, tagging failures with the model label.
    ///
    /// A non-finite output is a failure whatever the regressor, so NaN never
    /// reaches the blend.
    pub fn predict(&self, record: &FeatureRecord) -> Result<f64, ModelError> {
        let out = self
            .regressor
            .predict(record)
            .and_then(|out| if out.is_finite() { Ok(out) } else { Err(EvalError::NonFinite(out)) })
            .map_err(|e| ModelError::Prediction {
                label: self.label.clone(),
                cause: e.to_string(),
            })?;
        debug!(model = %self.label, output = out, "Model invoked");
        Ok(out)
    }

    pub fn describe(&self) -> String {
        self.regressor.describe()
    }
}

impl std::fmt::Debug for LoadedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModel")
            .field("label", &self.label)
            .field("path", &self.path)
            .field("model", &self.regressor.describe())
            .finish()
    }
}

/// Load one artifact from `base_dir/file_name`.
///
/// `.onnx` files go through ONNX Runtime; anything else is read as a JSON
/// artifact. A missing file is reported separately from every other failure
/// (unreadable file, invalid model, failed validation), which all count as
/// corrupt. Every model is run once on the default record before it is
/// accepted, so a shape mismatch surfaces here and not on the first request.
pub fn load_model(base_dir: &Path, file_name: &str, label: &str) -> Result<LoadedModel, ModelError> {
    let path = base_dir.join(file_name);
    info!(model = %label, path = %path.display(), "Loading model artifact");

    let corrupt = |cause: String| ModelError::ArtifactCorrupt {
        label: label.to_string(),
        path: path.clone(),
        cause,
    };

    match fs::metadata(&path) {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => return Err(corrupt("not a regular file".to_string())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ModelError::ArtifactMissing {
                label: label.to_string(),
                path: path.clone(),
            });
        }
        Err(e) => return Err(corrupt(e.to_string())),
    }

    let regressor: Box<dyn Regressor> = if is_onnx(&path) {
        Box::new(OnnxModel::load(&path).map_err(corrupt)?)
    } else {
        let text = fs::read_to_string(&path).map_err(|e| corrupt(e.to_string()))?;
        ModelArtifact::from_json(&text)
            .and_then(ModelArtifact::compile)
            .map_err(corrupt)?
    };

    regressor
        .predict(&FeatureRecord::defaults())
        .map_err(|e| corrupt(format!("model rejected the default feature record: {e}")))?;

    info!(model = %label, summary = %regressor.describe(), "Model loaded");

    Ok(LoadedModel {
        label: label.to_string(),
        path,
        regressor,
    })
}

fn is_onnx(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("onnx"))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::domain::UserInputs;
    use crate::features::assemble;

    const LINEAR: &str = r#"{ "kind": "linear", "intercept": 25.0, "weights": { "F6": 2.0 } }"#;

    #[test]
    fn loads_and_predicts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("m.json"), LINEAR).unwrap();

        let model = load_model(dir.path(), "m.json", "Test model").unwrap();
        assert_eq!(model.label, "Test model");
        assert_eq!(model.path, dir.path().join("m.json"));

        let out = model.predict(&assemble(&UserInputs::default())).unwrap();
        assert!((out - 35.0).abs() < 1e-12);
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_model(dir.path(), "xgb_model.json", "XGBoost model").unwrap_err();
        match &err {
            ModelError::ArtifactMissing { path, .. } => {
                assert_eq!(path, &dir.path().join("xgb_model.json"));
            }
            other => panic!("expected ArtifactMissing, got {other:?}"),
        }
        let msg = err.to_string();
        assert!(msg.contains("XGBoost model"));
        assert!(msg.contains("xgb_model.json"));
    }

    #[test]
    fn invalid_json_is_corrupt_with_cause() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("cat_model.json"), "{ not json").unwrap();
        let err = load_model(dir.path(), "cat_model.json", "CatBoost model").unwrap_err();
        assert!(matches!(err, ModelError::ArtifactCorrupt { .. }));
        assert!(err.to_string().contains("invalid artifact JSON"));
    }

    #[test]
    fn failed_validation_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("bad.json"),
            r#"{ "kind": "linear", "intercept": 0.0, "weights": { "height": 1.0 } }"#,
        )
        .unwrap();
        let err = load_model(dir.path(), "bad.json", "Bad model").unwrap_err();
        assert!(err.to_string().contains("unknown feature 'height'"));
    }

    #[test]
    fn directory_in_place_of_file_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("xgb_model.json")).unwrap();
        let err = load_model(dir.path(), "xgb_model.json", "XGBoost model").unwrap_err();
        assert!(matches!(err, ModelError::ArtifactCorrupt { .. }));
    }

    fn fixtures() -> std::path::PathBuf {
        std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
    }

    #[test]
    fn onnx_extension_selects_onnx_runtime() {
        let models = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("models");
        let model = load_model(&models, "xgb_model.onnx", "XGBoost model").unwrap();
        assert!(model.describe().starts_with("onnx model"));
        let out = model.predict(&assemble(&UserInputs::default())).unwrap();
        assert!((out - 52.0).abs() < 1e-3);
    }

    #[test]
    fn onnx_with_wrong_input_width_is_corrupt() {
        let err = load_model(&fixtures(), "narrow_input.onnx", "CatBoost model").unwrap_err();
        assert!(matches!(err, ModelError::ArtifactCorrupt { .. }));
        assert!(err.to_string().contains("default feature record"));
    }

    #[test]
    fn missing_onnx_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_model(dir.path(), "cat_model.onnx", "CatBoost model").unwrap_err();
        assert!(matches!(err, ModelError::ArtifactMissing { .. }));
        assert!(err.to_string().contains("cat_model.onnx"));
    }

    struct Constant(f64);

    impl Regressor for Constant {
        fn predict(&self, _record: &FeatureRecord) -> Result<f64, EvalError> {
            Ok(self.0)
        }

        fn describe(&self) -> String {
            format!("constant {}", self.0)
        }
    }

    #[test]
    fn non_finite_output_is_a_prediction_error() {
        let record = assemble(&UserInputs::default());
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let model = LoadedModel::from_regressor("XGBoost model", Box::new(Constant(bad)));
            match model.predict(&record) {
                Err(ModelError::Prediction { label, cause }) => {
                    assert_eq!(label, "XGBoost model");
                    assert!(cause.contains("non-finite"));
                }
                other => panic!("expected prediction error, got {other:?}"),
            }
        }
    }
}
