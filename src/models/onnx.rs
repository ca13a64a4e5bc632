//! ONNX Runtime backed models.
//!
//! Gradient-boosted models exported from XGBoost or CatBoost (through
//! `onnxmltools` or the native exporters) take one float tensor of shape
//! `[batch, 33]` and return one float per row. The session is opaque: the
//! crate only feeds it the assembled record and reads back the first value.

use std::path::Path;
use std::sync::Mutex;

use ort::session::{Session, builder::GraphOptimizationLevel};
use ort::value::Tensor;
use tracing::{debug, info};

use crate::features::{FEATURE_COUNT, FeatureRecord};
use crate::models::{EvalError, Regressor};

/// A loaded ONNX session plus the tensor names it exposes.
pub struct OnnxModel {
    /// `Session::run` needs `&mut`, the model is shared read-only otherwise.
    session: Mutex<Session>,
    input_name: String,
    output_name: String,
}

impl OnnxModel {
    /// Build a session from a `.onnx` file.
    pub fn load(path: &Path) -> Result<Self, String> {
        let session = Session::builder()
            .map_err(|e| format!("failed to create ONNX session builder: {e}"))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| format!("failed to set optimization level: {e}"))?
            .with_intra_threads(1)
            .map_err(|e| format!("failed to set thread count: {e}"))?
            .commit_from_file(path)
            .map_err(|e| format!("invalid ONNX model: {e}"))?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .ok_or_else(|| "ONNX model declares no inputs".to_string())?;
        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| "ONNX model declares no outputs".to_string())?;

        info!(input = %input_name, output = %output_name, "ONNX session ready");

        Ok(Self {
            session: Mutex::new(session),
            input_name,
            output_name,
        })
    }
}

impl Regressor for OnnxModel {
    fn predict(&self, record: &FeatureRecord) -> Result<f64, EvalError> {
        let values = record.values();
        if values.len() != FEATURE_COUNT {
            return Err(EvalError::RecordLength {
                expected: FEATURE_COUNT,
                got: values.len(),
            });
        }

        let shape = vec![1_i64, FEATURE_COUNT as i64];
        let row: Vec<f32> = values.iter().map(|&v| v as f32).collect();
        let input = Tensor::from_array((shape, row))
            .map_err(|e| EvalError::Runtime(format!("failed to build input tensor: {e}")))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| EvalError::Runtime("ONNX session lock poisoned".to_string()))?;
        let outputs = session
            .run(ort::inputs![&self.input_name => input])
            .map_err(|e| EvalError::Runtime(format!("inference failed: {e}")))?;

        let output = outputs
            .get(&self.output_name)
            .ok_or_else(|| EvalError::Runtime(format!("missing output '{}'", self.output_name)))?;
        let (_, data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| EvalError::Runtime(format!("output is not a float tensor: {e}")))?;
        let out = data
            .first()
            .copied()
            .map(f64::from)
            .ok_or_else(|| EvalError::Runtime("model returned an empty tensor".to_string()))?;

        debug!(output = out, "ONNX inference");
        Ok(out)
    }

    fn describe(&self) -> String {
        format!(
            "onnx model: input '{}' [1, {FEATURE_COUNT}], output '{}'",
            self.input_name, self.output_name
        )
    }
}
