//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - sets up logging
//! - loads both models (once, before any input is taken)
//! - dispatches to the TUI, the questionnaire, or the one-shot commands

use std::io::{self, Write};

use clap::Parser;
use crossterm::style::{Color, Stylize};

use crate::cli::{AskArgs, Command, InspectArgs, ModelArgs, PredictArgs, TuiArgs};
use crate::config::ModelConfig;
use crate::domain::UserInputs;
use crate::error::AppError;
use crate::logging::LogTarget;
use crate::report::Rgb;

pub mod pipeline;

use pipeline::{ModelPair, PredictionOutcome};

/// Entry point for the `relscore` binary.
pub fn run() -> Result<(), AppError> {
    // We want `relscore` and `relscore --model-dir X` to behave like
    // `relscore tui ...`, so the argv list is rewritten before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    let owns_terminal = matches!(cli.command, Command::Tui(_));
    crate::logging::init(LogTarget::for_command(cli.log_file.clone(), owns_terminal))?;

    match cli.command {
        Command::Tui(args) => handle_tui(args),
        Command::Predict(args) => handle_predict(args),
        Command::Ask(args) => handle_ask(args),
        Command::Inspect(args) => handle_inspect(args),
    }
}

/// Load both models. Any failure here stops the process before input is taken.
pub fn load_models(args: &ModelArgs) -> Result<ModelPair, AppError> {
    let config = ModelConfig::from_env(args);
    tracing::info!(dir = %config.dir.display(), "Resolved model directory");
    Ok(ModelPair::load(&config)?)
}

fn handle_tui(args: TuiArgs) -> Result<(), AppError> {
    let models = load_models(&args.models)?;
    crate::tui::run(models)
}

fn handle_predict(args: PredictArgs) -> Result<(), AppError> {
    let models = load_models(&args.models)?;
    let inputs = args.to_inputs();
    let outcome = pipeline::run_prediction(&models, &inputs)?;
    print_outcome(&inputs, &outcome, args.breakdown, !args.no_color)
}

fn handle_ask(args: AskArgs) -> Result<(), AppError> {
    let models = load_models(&args.models)?;
    let inputs = crate::cli::prompt::prompt_for_inputs()?;
    println!();
    print!("{}", crate::report::format_inputs(&inputs));
    println!();
    let outcome = pipeline::run_prediction(&models, &inputs)?;
    print_outcome(&inputs, &outcome, args.breakdown, !args.no_color)
}

fn handle_inspect(args: InspectArgs) -> Result<(), AppError> {
    let models = load_models(&args.models)?;
    print!("{}", crate::report::format_models(&models));
    Ok(())
}

fn print_outcome(
    inputs: &UserInputs,
    outcome: &PredictionOutcome,
    breakdown: bool,
    color: bool,
) -> Result<(), AppError> {
    let text = crate::report::format_result(inputs, outcome, breakdown);
    let mut stdout = io::stdout().lock();

    let written = if color {
        let mut lines = text.lines();
        let headline = lines.next().unwrap_or_default();
        let accent = to_color(outcome.tier.accent);
        let fg = to_color(outcome.tier.text);
        writeln!(stdout, "{}", headline.bold().with(fg).on(accent)).and_then(|_| {
            lines.try_for_each(|line| writeln!(stdout, "{}", line.with(fg)))
        })
    } else {
        write!(stdout, "{text}")
    };
    written.map_err(|e| AppError::runtime(format!("Failed to write result: {e}")))
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}

/// Rewrite argv so `relscore` defaults to `relscore tui`.
///
/// Rules:
/// - `relscore`                        -> `relscore tui`
/// - `relscore --model-dir X ...`      -> `relscore tui --model-dir X ...`
/// - `relscore --help/--version/-h`    -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "predict" | "ask" | "inspect");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
