//! Gradient-boosted regression tree ensembles.
//!
//! Output is `base_score + learning_rate * Σ leaf(tree)`, the usual additive
//! form for boosted regressors.

use crate::features::{FEATURE_COUNT, FeatureRecord, feature_index};
use crate::models::artifact::{NodeSpec, TreeEnsembleSpec};
use crate::models::{EvalError, Regressor};

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf(f64),
}

#[derive(Debug, Clone, PartialEq)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Walk from the root to a leaf.
    ///
    /// Children always point forward (checked at compile time), so the walk
    /// terminates in at most `nodes.len()` steps.
    fn eval(&self, values: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf(value) => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if values[*feature] < *threshold { *left } else { *right };
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreeEnsemble {
    name: Option<String>,
    base_score: f64,
    learning_rate: f64,
    trees: Vec<Tree>,
}

impl TreeEnsemble {
    pub fn compile(spec: TreeEnsembleSpec) -> Result<Self, String> {
        if !spec.base_score.is_finite() {
            return Err("base_score must be finite".to_string());
        }
        if !spec.learning_rate.is_finite() {
            return Err("learning_rate must be finite".to_string());
        }
        if spec.trees.is_empty() {
            return Err("ensemble has no trees".to_string());
        }

        let trees = spec
            .trees
            .into_iter()
            .enumerate()
            .map(|(tree_idx, tree)| compile_tree(tree.nodes).map_err(|e| format!("tree {tree_idx}: {e}")))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: spec.name,
            base_score: spec.base_score,
            learning_rate: spec.learning_rate,
            trees,
        })
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }
}

fn compile_tree(nodes: Vec<NodeSpec>) -> Result<Tree, String> {
    if nodes.is_empty() {
        return Err("tree has no nodes".to_string());
    }
    let n = nodes.len();
    let mut out = Vec::with_capacity(n);
    for (idx, node) in nodes.into_iter().enumerate() {
        let node = match node {
            NodeSpec::Leaf(value) => {
                if !value.is_finite() {
                    return Err(format!("node {idx}: leaf value must be finite"));
                }
                Node::Leaf(value)
            }
            NodeSpec::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                let feature = feature_index(&feature)
                    .ok_or_else(|| format!("node {idx}: unknown feature '{feature}'"))?;
                if !threshold.is_finite() {
                    return Err(format!("node {idx}: threshold must be finite"));
                }
                for child in [left, right] {
                    if child >= n {
                        return Err(format!("node {idx}: child {child} out of bounds ({n} nodes)"));
                    }
                    if child <= idx {
                        return Err(format!("node {idx}: child {child} must come after its parent"));
                    }
                }
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }
            }
        };
        out.push(node);
    }
    Ok(Tree { nodes: out })
}

impl Regressor for TreeEnsemble {
    fn predict(&self, record: &FeatureRecord) -> Result<f64, EvalError> {
        let values = record.values();
        if values.len() != FEATURE_COUNT {
            return Err(EvalError::RecordLength {
                expected: FEATURE_COUNT,
                got: values.len(),
            });
        }

        let sum: f64 = self.trees.iter().map(|tree| tree.eval(values)).sum();
        let out = self.base_score + self.learning_rate * sum;
        if !out.is_finite() {
            return Err(EvalError::NonFinite(out));
        }
        Ok(out)
    }

    fn describe(&self) -> String {
        let nodes: usize = self.trees.iter().map(|t| t.nodes.len()).sum();
        format!(
            "{}tree ensemble: {} trees, {nodes} nodes, base_score={:.3}, learning_rate={:.3}",
            self.name.as_deref().map(|n| format!("{n} ")).unwrap_or_default(),
            self.tree_count(),
            self.base_score,
            self.learning_rate,
        )
    }
}
