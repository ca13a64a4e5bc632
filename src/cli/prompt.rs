//! Line-based questionnaire.
//!
//! This is intentionally kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the prompt provides the "run `relscore ask` and answer questions" UX
//!
//! Each question re-prompts until it gets a valid answer. A blank answer keeps
//! the default, `q` cancels (except on the name, where it is just a name).

use std::io::{self, BufRead, Write};

use crate::domain::{Branch, InputField, UserInputs};
use crate::error::AppError;

/// Ask for every input on stdin/stdout.
pub fn prompt_for_inputs() -> Result<UserInputs, AppError> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    ask_inputs(&mut stdin.lock(), &mut stdout)
}

/// Ask for every input on the given reader/writer.
pub fn ask_inputs<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<UserInputs, AppError> {
    let mut inputs = UserInputs::default();

    let name = read_line(input, out, "Enter your name (optional): ")?;
    if !name.is_empty() {
        inputs.name = Some(name);
    }

    for field in InputField::ALL {
        match field {
            InputField::Branch => inputs.branch = ask_branch(input, out)?,
            _ => {
                let value = ask_number(input, out, field)?;
                inputs.set_numeric_clamped(field, i32::from(value));
            }
        }
    }

    Ok(inputs)
}

fn ask_number<R: BufRead, W: Write>(input: &mut R, out: &mut W, field: InputField) -> Result<u8, AppError> {
    let (Some(range), Some(default)) = (field.range(), field.default_value()) else {
        return Err(AppError::input(format!("{} is not numeric.", field.display_name())));
    };
    let prompt = format!(
        "{} [{}-{}, default {default}]: ",
        field.display_name(),
        range.start(),
        range.end()
    );

    loop {
        let answer = read_answer(input, out, &prompt)?;
        if answer.is_empty() {
            return Ok(default);
        }
        let parsed = match answer.parse::<u8>() {
            Ok(v) => field.check(v),
            Err(_) => Err(AppError::input(format!("Not a whole number: {answer}"))),
        };
        match parsed {
            Ok(v) => return Ok(v),
            Err(err) => write_line(out, err.message())?,
        }
    }
}

fn ask_branch<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Branch, AppError> {
    write_line(out, "Branches:")?;
    for (idx, branch) in Branch::ALL.iter().enumerate() {
        write_line(out, &format!("{:>3}) {branch}", idx + 1))?;
    }
    let prompt = format!(
        "Branch by number (1-{}) or name [default {}]: ",
        Branch::ALL.len(),
        Branch::default()
    );

    loop {
        let answer = read_answer(input, out, &prompt)?;
        if answer.is_empty() {
            return Ok(Branch::default());
        }
        if let Ok(choice) = answer.parse::<usize>() {
            if (1..=Branch::ALL.len()).contains(&choice) {
                return Ok(Branch::ALL[choice - 1]);
            }
            write_line(
                out,
                &format!("Invalid choice: {choice}. Enter a number between 1 and {}.", Branch::ALL.len()),
            )?;
            continue;
        }
        match Branch::from_label(&answer) {
            Some(branch) => return Ok(branch),
            None => write_line(out, &format!("Unknown branch: {answer}"))?,
        }
    }
}

/// Like [`read_line`], but `q` cancels the questionnaire.
fn read_answer<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> Result<String, AppError> {
    let answer = read_line(input, out, prompt)?;
    if answer.eq_ignore_ascii_case("q") {
        return Err(AppError::input("Canceled."));
    }
    Ok(answer)
}

/// Print `prompt`, read one trimmed line. EOF is an error.
fn read_line<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> Result<String, AppError> {
    write!(out, "{prompt}")
        .and_then(|_| out.flush())
        .map_err(|e| AppError::input(format!("Failed to write prompt: {e}")))?;

    let mut line = String::new();
    let bytes = input
        .read_line(&mut line)
        .map_err(|e| AppError::input(format!("Failed to read input: {e}")))?;
    if bytes == 0 {
        return Err(AppError::input(
            "No input received. Pass values with `relscore predict --age ...` instead.",
        ));
    }

    Ok(line.trim().to_string())
}

fn write_line<W: Write>(out: &mut W, line: &str) -> Result<(), AppError> {
    writeln!(out, "{line}").map_err(|e| AppError::input(format!("Failed to write prompt: {e}")))
}
