//! Plain-text rendering of inputs, results, and model summaries.

use crate::app::pipeline::{ModelPair, PredictionOutcome};
use crate::blend::{WEIGHT_A, WEIGHT_B};
use crate::domain::UserInputs;
use crate::report::DISCLAIMER;

/// Echo the submitted inputs.
pub fn format_inputs(inputs: &UserInputs) -> String {
    let mut out = String::new();
    out.push_str(&format!("Name: {}\n", inputs.display_name()));
    out.push_str(&format!(
        "Age: {} | Height: {} cm | Weight: {} kg\n",
        inputs.age, inputs.height_cm, inputs.weight_kg
    ));
    out.push_str(&format!(
        "Gym: {}x/week | Branch: {} | Social vibe: {}/10\n",
        inputs.gym_freq, inputs.branch, inputs.social_score
    ));
    out
}

/// Format the result block for one prediction.
pub fn format_result(inputs: &UserInputs, outcome: &PredictionOutcome, breakdown: bool) -> String {
    let name = inputs.display_name();
    let tier = outcome.tier;
    let mut out = String::new();

    out.push_str(&format!(
        "Probability for {name}: {}\n",
        outcome.score.percent_label()
    ));
    out.push_str(&format!("Tier: {}\n", tier.label));
    out.push_str(&format!("{}\n", tier.message_for(name)));
    out.push_str(&format!("Catch line: \"{}\"\n", tier.catch_line));

    if breakdown {
        out.push_str(&format_breakdown(outcome));
    }

    out.push_str(&format!("\n{DISCLAIMER}\n"));
    out
}

/// Per-model raw outputs and the blend arithmetic.
pub fn format_breakdown(outcome: &PredictionOutcome) -> String {
    let pair = outcome.pair;
    let raw = pair.raw_blend();
    let mut out = String::new();
    out.push_str("\nBreakdown:\n");
    out.push_str(&format!("- {:<16} {:>8.3}  (weight {WEIGHT_A:.1})\n", outcome.labels.0, pair.a));
    out.push_str(&format!("- {:<16} {:>8.3}  (weight {WEIGHT_B:.1})\n", outcome.labels.1, pair.b));
    out.push_str(&format!("- {:<16} {:>8.3}\n", "blend", raw));
    if (raw - outcome.score.value()).abs() > f64::EPSILON {
        out.push_str(&format!("- {:<16} {:>8.3}\n", "clamped", outcome.score.value()));
    }
    out
}

/// Summarise the loaded models.
pub fn format_models(models: &ModelPair) -> String {
    let mut out = String::new();
    out.push_str("Loaded models:\n");
    for (model, weight) in [(&models.a, WEIGHT_A), (&models.b, WEIGHT_B)] {
        out.push_str(&format!(
            "- {} (weight {weight:.1})\n  path: {}\n  {}\n",
            model.label,
            model.path.display(),
            model.describe()
        ));
    }
    out
}
