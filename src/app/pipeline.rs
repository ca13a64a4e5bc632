//! Shared prediction pipeline used by every front end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! validate -> assemble -> both models -> blend -> tier
//!
//! The CLI, the questionnaire and the TUI can then focus on presentation.

use tracing::{error, info};

use crate::blend::{BlendedScore, PredictionPair};
use crate::config::{MODEL_A_LABEL, MODEL_B_LABEL, ModelConfig};
use crate::domain::UserInputs;
use crate::error::AppError;
use crate::features::{FeatureRecord, assemble};
use crate::models::{LoadedModel, ModelError, load_model};
use crate::report::{TierRow, select_tier};

/// Both models, loaded once per process and read-only afterwards.
#[derive(Debug)]
pub struct ModelPair {
    /// Primary model (weight 0.6).
    pub a: LoadedModel,
    /// Secondary model (weight 0.4).
    pub b: LoadedModel,
}

impl ModelPair {
    /// Load both artifacts. Either failure aborts; nothing partial is returned.
    pub fn load(config: &ModelConfig) -> Result<Self, ModelError> {
        let a = load_model(&config.dir, &config.file_a, MODEL_A_LABEL)?;
        let b = load_model(&config.dir, &config.file_b, MODEL_B_LABEL)?;
        Ok(Self { a, b })
    }
}

/// All computed outputs of a single prediction request.
#[derive(Debug, Clone)]
pub struct PredictionOutcome {
    pub record: FeatureRecord,
    pub pair: PredictionPair,
    pub score: BlendedScore,
    pub tier: &'static TierRow,
    /// Model labels, in the same order as `pair`.
    pub labels: (String, String),
}

/// Execute one full request.
pub fn run_prediction(models: &ModelPair, inputs: &UserInputs) -> Result<PredictionOutcome, AppError> {
    inputs.validate()?;

    let record = assemble(inputs);
    let (pair, score) = crate::blend::predict(&record, &models.a, &models.b).map_err(|e| {
        error!(error = %e, "Prediction failed");
        AppError::from(e)
    })?;
    let tier = select_tier(score);

    info!(score = score.value(), tier = tier.label, "Prediction complete");

    Ok(PredictionOutcome {
        record,
        pair,
        score,
        tier,
        labels: (models.a.label.clone(), models.b.label.clone()),
    })
}
