//! Blending predictor: two model outputs → one bounded score.
//!
//! `score = 0.6 * a + 0.4 * b`, clamped to `[0, 100]`. The weights and bounds
//! are fixed constants.

use tracing::debug;

use crate::features::FeatureRecord;
use crate::models::{LoadedModel, ModelError};

pub const WEIGHT_A: f64 = 0.6;
pub const WEIGHT_B: f64 = 0.4;
pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 100.0;

/// Raw outputs of the two models for the same record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionPair {
    pub a: f64,
    pub b: f64,
}

impl PredictionPair {
    /// Weighted sum before clamping.
    pub fn raw_blend(&self) -> f64 {
        WEIGHT_A * self.a + WEIGHT_B * self.b
    }
}

/// A score in `[SCORE_MIN, SCORE_MAX]`, never NaN.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct BlendedScore(f64);

impl BlendedScore {
    /// Clamp `raw` into range. NaN has no place in the range and yields `None`.
    pub fn new(raw: f64) -> Option<Self> {
        if raw.is_nan() {
            return None;
        }
        Some(Self(raw.clamp(SCORE_MIN, SCORE_MAX)))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Two-decimal percentage, e.g. `70.40%`.
    pub fn percent_label(self) -> String {
        format!("{:.2}%", self.0)
    }
}

/// Combine a prediction pair. `None` only if the raw blend is NaN.
pub fn blend(pair: PredictionPair) -> Option<BlendedScore> {
    BlendedScore::new(pair.raw_blend())
}

/// Run both models on `record` and blend.
///
/// The invocations are independent and run through `rayon::join`; a failure
/// in either one fails the whole request (model A's error wins if both fail).
pub fn predict(
    record: &FeatureRecord,
    model_a: &LoadedModel,
    model_b: &LoadedModel,
) -> Result<(PredictionPair, BlendedScore), ModelError> {
    let (a, b) = rayon::join(|| model_a.predict(record), || model_b.predict(record));
    let pair = PredictionPair { a: a?, b: b? };
    let score = blend(pair).ok_or_else(|| ModelError::Prediction {
        label: format!("{} + {}", model_a.label, model_b.label),
        cause: format!("blend of {} and {} is not a number", pair.a, pair.b),
    })?;
    debug!(a = pair.a, b = pair.b, raw = pair.raw_blend(), score = score.value(), "Blended prediction");
    Ok((pair, score))
}
