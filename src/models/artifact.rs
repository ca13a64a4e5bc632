//! JSON model artifacts, the format of the test fixtures and of hand-written models.
//!
//! An artifact is a JSON object tagged by `kind`:
//!
//! ```json
//! { "kind": "tree_ensemble", "base_score": 50.0, "learning_rate": 0.3,
//!   "trees": [ { "nodes": [
//!       { "split": { "feature": "F4", "threshold": 3.5, "left": 1, "right": 2 } },
//!       { "leaf": -4.0 },
//!       { "leaf": 6.5 } ] } ] }
//! ```
//!
//! ```json
//! { "kind": "linear", "intercept": 12.0, "weights": { "F4": 3.1, "F6": 2.4 } }
//! ```
//!
//! Features are referenced by schema name. If `feature_names` is present it
//! must list the full schema in order; this guards against artifacts trained on
//! a different column layout.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::features::feature_names;
use crate::models::{LinearModel, Regressor, TreeEnsemble};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    TreeEnsemble(TreeEnsembleSpec),
    Linear(LinearSpec),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TreeEnsembleSpec {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub base_score: f64,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    pub trees: Vec<TreeSpec>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TreeSpec {
    pub nodes: Vec<NodeSpec>,
}

/// Flat-array tree node. Children are indices into the same `nodes` array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeSpec {
    /// `value < threshold` descends into `left`, otherwise `right`.
    Split {
        feature: String,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf(f64),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinearSpec {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub intercept: f64,
    pub weights: BTreeMap<String, f64>,
}

fn default_learning_rate() -> f64 {
    1.0
}

impl ModelArtifact {
    pub fn from_json(text: &str) -> Result<Self, String> {
        serde_json::from_str(text).map_err(|e| format!("invalid artifact JSON: {e}"))
    }

    /// Validate and compile into an evaluator.
    pub fn compile(self) -> Result<Box<dyn Regressor>, String> {
        match self {
            ModelArtifact::TreeEnsemble(spec) => {
                check_feature_names(spec.feature_names.as_deref())?;
                Ok(Box::new(TreeEnsemble::compile(spec)?))
            }
            ModelArtifact::Linear(spec) => {
                check_feature_names(spec.feature_names.as_deref())?;
                Ok(Box::new(LinearModel::compile(spec)?))
            }
        }
    }
}

fn check_feature_names(declared: Option<&[String]>) -> Result<(), String> {
    let Some(declared) = declared else {
        return Ok(());
    };
    let expected: Vec<&str> = feature_names().collect();
    if declared.len() != expected.len() {
        return Err(format!(
            "feature schema mismatch: artifact declares {} features, expected {}",
            declared.len(),
            expected.len()
        ));
    }
    for (idx, (got, want)) in declared.iter().zip(expected.iter()).enumerate() {
        if got != want {
            return Err(format!(
                "feature schema mismatch at position {idx}: artifact has '{got}', expected '{want}'"
            ));
        }
    }
    Ok(())
}
