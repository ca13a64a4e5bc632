//! Command-line parsing for the relationship score predictor.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! scoring code. Input ranges are enforced by clap here so the pipeline only
//! ever sees in-range values.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{MODEL_A_FILE, MODEL_B_FILE};
use crate::domain::{Branch, UserInputs};

pub mod prompt;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "relscore", version, about = "Relationship probability predictor")]
pub struct Cli {
    /// Write logs to this file (the TUI does not log otherwise).
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive TUI (default).
    Tui(TuiArgs),
    /// Score one set of inputs given as flags and print the result.
    Predict(PredictArgs),
    /// Ask for each input on the terminal, then print the result.
    Ask(AskArgs),
    /// Load both model artifacts and print what they contain.
    Inspect(InspectArgs),
}

/// Where to find the two model artifacts.
#[derive(Debug, Args, Clone)]
pub struct ModelArgs {
    /// Directory holding the artifacts (default: $RELSCORE_MODEL_DIR, then ./models).
    #[arg(long, value_name = "DIR")]
    pub model_dir: Option<PathBuf>,

    /// File name of the primary model (weight 0.6).
    #[arg(long, default_value = MODEL_A_FILE)]
    pub model_a: String,

    /// File name of the secondary model (weight 0.4).
    #[arg(long, default_value = MODEL_B_FILE)]
    pub model_b: String,
}

#[derive(Debug, Args, Clone)]
pub struct TuiArgs {
    #[command(flatten)]
    pub models: ModelArgs,
}

#[derive(Debug, Args, Clone)]
pub struct PredictArgs {
    #[command(flatten)]
    pub models: ModelArgs,

    /// Name used in the greeting.
    #[arg(long)]
    pub name: Option<String>,

    /// Age in years (16-35).
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u8).range(16..=35))]
    pub age: u8,

    /// Height in cm (140-200).
    #[arg(long, default_value_t = 170, value_parser = clap::value_parser!(u8).range(140..=200))]
    pub height: u8,

    /// Weight in kg (40-100).
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u8).range(40..=100))]
    pub weight: u8,

    /// Gym sessions per week (0-7).
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(0..=7))]
    pub gym_freq: u8,

    /// Branch of study.
    #[arg(long, value_enum, ignore_case = true, default_value_t = Branch::Biotech)]
    pub branch: Branch,

    /// Social vibe score (0-10).
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(0..=10))]
    pub social_score: u8,

    /// Also print each model's raw output and the blend.
    #[arg(long)]
    pub breakdown: bool,

    /// Disable coloured output.
    #[arg(long)]
    pub no_color: bool,
}

impl PredictArgs {
    pub fn to_inputs(&self) -> UserInputs {
        UserInputs {
            name: self.name.clone(),
            age: self.age,
            height_cm: self.height,
            weight_kg: self.weight,
            gym_freq: self.gym_freq,
            branch: self.branch,
            social_score: self.social_score,
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct AskArgs {
    #[command(flatten)]
    pub models: ModelArgs,

    /// Also print each model's raw output and the blend.
    #[arg(long)]
    pub breakdown: bool,

    /// Disable coloured output.
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Debug, Args, Clone)]
pub struct InspectArgs {
    #[command(flatten)]
    pub models: ModelArgs,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn predict_defaults_match_input_defaults() {
        let cli = Cli::parse_from(["relscore", "predict"]);
        let Command::Predict(args) = cli.command else {
            panic!("expected predict");
        };
        assert_eq!(args.to_inputs(), UserInputs::default());
        assert_eq!(args.models.model_a, MODEL_A_FILE);
    }

    #[test]
    fn predict_parses_worked_example() {
        let cli = Cli::parse_from([
            "relscore", "predict", "--age", "20", "--height", "170", "--weight", "60", "--gym-freq",
            "2", "--branch", "cse", "--social-score", "5", "--name", "Kartik",
        ]);
        let Command::Predict(args) = cli.command else {
            panic!("expected predict");
        };
        let inputs = args.to_inputs();
        assert_eq!(inputs.branch, Branch::Cse);
        assert_eq!(inputs.name.as_deref(), Some("Kartik"));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(Cli::try_parse_from(["relscore", "predict", "--age", "15"]).is_err());
        assert!(Cli::try_parse_from(["relscore", "predict", "--gym-freq", "8"]).is_err());
        assert!(Cli::try_parse_from(["relscore", "predict", "--branch", "MBA"]).is_err());
    }

    #[test]
    fn log_file_is_global() {
        let cli = Cli::parse_from(["relscore", "inspect", "--log-file", "out.log"]);
        assert_eq!(cli.log_file, Some(PathBuf::from("out.log")));
    }
}
