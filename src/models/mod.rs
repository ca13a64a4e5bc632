//! Pre-trained regression models.
//!
//! The rest of the crate sees a model only through [`Regressor`]: given a
//! feature record, return one scalar. Exported `.onnx` files run through ONNX
//! Runtime ([`onnx`]). Small hand-written JSON artifacts ([`artifact`]) are
//! also accepted; the test fixtures use them.

pub mod artifact;
pub mod linear;
pub mod loader;
pub mod onnx;
pub mod tree;

use std::path::PathBuf;

use thiserror::Error;

use crate::features::FeatureRecord;

pub use artifact::ModelArtifact;
pub use linear::LinearModel;
pub use loader::{LoadedModel, load_model};
pub use onnx::OnnxModel;
pub use tree::TreeEnsemble;

/// The single capability a model exposes.
pub trait Regressor: Send + Sync {
    fn predict(&self, record: &FeatureRecord) -> Result<f64, EvalError>;

    /// One-line human summary (kind, size, constants).
    fn describe(&self) -> String;
}

/// Failure inside a single model evaluation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("expected {expected} features, got {got}")]
    RecordLength { expected: usize, got: usize },
    #[error("model produced a non-finite output ({0})")]
    NonFinite(f64),
    #[error("{0}")]
    Runtime(String),
}

/// Model loading and invocation failures.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error(
        "File for {label} not found.\nTried to load: {}\nMake sure the artifact is in the model directory.",
        .path.display()
    )]
    ArtifactMissing { label: String, path: PathBuf },

    #[error("Error loading {label} from {}: {cause}", .path.display())]
    ArtifactCorrupt {
        label: String,
        path: PathBuf,
        cause: String,
    },

    #[error("Error while predicting with {label}: {cause}")]
    Prediction { label: String, cause: String },
}
