//! Linear regressors: `intercept + w·x`.

use nalgebra::DVector;

use crate::features::{FEATURE_COUNT, FeatureRecord, feature_index};
use crate::models::artifact::LinearSpec;
use crate::models::{EvalError, Regressor};

#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    name: Option<String>,
    intercept: f64,
    /// Dense, schema-ordered; slots without a weight are zero.
    weights: DVector<f64>,
}

impl LinearModel {
    pub fn compile(spec: LinearSpec) -> Result<Self, String> {
        if !spec.intercept.is_finite() {
            return Err("intercept must be finite".to_string());
        }
        let mut weights = DVector::zeros(FEATURE_COUNT);
        for (feature, weight) in &spec.weights {
            let idx = feature_index(feature).ok_or_else(|| format!("unknown feature '{feature}'"))?;
            if !weight.is_finite() {
                return Err(format!("weight for '{feature}' must be finite"));
            }
            weights[idx] = *weight;
        }
        Ok(Self {
            name: spec.name,
            intercept: spec.intercept,
            weights,
        })
    }
}

impl Regressor for LinearModel {
    fn predict(&self, record: &FeatureRecord) -> Result<f64, EvalError> {
        let values = record.values();
        if values.len() != self.weights.len() {
            return Err(EvalError::RecordLength {
                expected: self.weights.len(),
                got: values.len(),
            });
        }
        let x = DVector::from_column_slice(values);
        let out = self.intercept + self.weights.dot(&x);
        if !out.is_finite() {
            return Err(EvalError::NonFinite(out));
        }
        Ok(out)
    }

    fn describe(&self) -> String {
        let active = self.weights.iter().filter(|w| **w != 0.0).count();
        format!(
            "{}linear: {active} non-zero weights, intercept={:.3}",
            self.name.as_deref().map(|n| format!("{n} ")).unwrap_or_default(),
            self.intercept,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::domain::UserInputs;
    use crate::features::assemble;

    fn spec(intercept: f64, weights: &[(&str, f64)]) -> LinearSpec {
        LinearSpec {
            name: Some("toy".to_string()),
            feature_names: None,
            intercept,
            weights: weights
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn dot_product_plus_intercept() {
        let model = LinearModel::compile(spec(10.0, &[("F4", 3.0), ("F6", 2.0)])).unwrap();
        let record = assemble(&UserInputs {
            gym_freq: 4,
            social_score: 7,
            ..UserInputs::default()
        });
        assert!((model.predict(&record).unwrap() - (10.0 + 12.0 + 14.0)).abs() < 1e-12);
    }

    #[test]
    fn constant_slots_contribute_their_defaults() {
        let model = LinearModel::compile(spec(0.0, &[("F26", 0.01)])).unwrap();
        let record = assemble(&UserInputs::default());
        assert!((model.predict(&record).unwrap() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_unknown_feature_and_bad_constants() {
        assert!(LinearModel::compile(spec(0.0, &[("age", 1.0)])).is_err());
        assert!(LinearModel::compile(spec(f64::NAN, &[])).is_err());
        assert!(LinearModel::compile(spec(0.0, &[("F1", f64::INFINITY)])).is_err());
    }

    #[test]
    fn describe_counts_active_weights() {
        let model = LinearModel::compile(spec(1.0, &[("F1", 1.0), ("F2", 0.0)])).unwrap();
        assert!(model.describe().starts_with("toy linear: 1 non-zero weights"));
    }
}
