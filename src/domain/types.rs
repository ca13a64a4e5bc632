//! Shared domain types.
//!
//! Inputs are validated here, once, at the edge. Everything downstream
//! (assembly, blending, reporting) assumes a `UserInputs` value has passed
//! [`UserInputs::validate`].

use std::ops::RangeInclusive;

use clap::ValueEnum;

use crate::error::AppError;

/// Branch of study, the single categorical input.
///
/// The integer codes are the ones the models were trained with; the
/// label → code mapping is total and injective.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum)]
#[value(rename_all = "UPPERCASE")]
pub enum Branch {
    #[default]
    Biotech,
    Ce,
    Cse,
    Ece,
    It,
    Me,
}

impl Branch {
    pub const ALL: [Branch; 6] = [
        Branch::Biotech,
        Branch::Ce,
        Branch::Cse,
        Branch::Ece,
        Branch::It,
        Branch::Me,
    ];

    /// Encoded value fed to the models (slot `F5`).
    pub fn code(self) -> u8 {
        match self {
            Branch::Biotech => 0,
            Branch::Ce => 1,
            Branch::Cse => 2,
            Branch::Ece => 3,
            Branch::It => 4,
            Branch::Me => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Branch::Biotech => "BIOTECH",
            Branch::Ce => "CE",
            Branch::Cse => "CSE",
            Branch::Ece => "ECE",
            Branch::It => "IT",
            Branch::Me => "ME",
        }
    }

    /// Case-insensitive lookup by display label.
    pub fn from_label(label: &str) -> Option<Branch> {
        let label = label.trim();
        Branch::ALL
            .into_iter()
            .find(|b| b.label().eq_ignore_ascii_case(label))
    }

    pub fn next(self) -> Branch {
        let idx = Branch::ALL.iter().position(|b| *b == self).unwrap_or(0);
        Branch::ALL[(idx + 1) % Branch::ALL.len()]
    }

    pub fn prev(self) -> Branch {
        let idx = Branch::ALL.iter().position(|b| *b == self).unwrap_or(0);
        Branch::ALL[(idx + Branch::ALL.len() - 1) % Branch::ALL.len()]
    }
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The six user-editable inputs.
///
/// Numeric fields carry their declared inclusive range and default; the
/// front ends read both from here so the limits live in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Age,
    Height,
    Weight,
    GymFrequency,
    Branch,
    SocialScore,
}

impl InputField {
    pub const ALL: [InputField; 6] = [
        InputField::Age,
        InputField::Height,
        InputField::Weight,
        InputField::GymFrequency,
        InputField::Branch,
        InputField::SocialScore,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            InputField::Age => "Age",
            InputField::Height => "Height (cm)",
            InputField::Weight => "Weight (kg)",
            InputField::GymFrequency => "Gym frequency per week",
            InputField::Branch => "Branch",
            InputField::SocialScore => "Social vibe score",
        }
    }

    /// Declared inclusive range. `None` for the categorical field.
    pub fn range(self) -> Option<RangeInclusive<u8>> {
        match self {
            InputField::Age => Some(16..=35),
            InputField::Height => Some(140..=200),
            InputField::Weight => Some(40..=100),
            InputField::GymFrequency => Some(0..=7),
            InputField::Branch => None,
            InputField::SocialScore => Some(0..=10),
        }
    }

    /// Default slider position. `None` for the categorical field.
    pub fn default_value(self) -> Option<u8> {
        match self {
            InputField::Age => Some(20),
            InputField::Height => Some(170),
            InputField::Weight => Some(60),
            InputField::GymFrequency => Some(2),
            InputField::Branch => None,
            InputField::SocialScore => Some(5),
        }
    }

    /// Check a numeric value against the declared range.
    pub fn check(self, value: u8) -> Result<u8, AppError> {
        match self.range() {
            Some(range) if !range.contains(&value) => Err(AppError::input(format!(
                "{} must be between {} and {} (got {value}).",
                self.display_name(),
                range.start(),
                range.end()
            ))),
            _ => Ok(value),
        }
    }
}

/// One submission of user-supplied values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInputs {
    /// Cosmetic only; never fed to the models.
    pub name: Option<String>,
    pub age: u8,
    pub height_cm: u8,
    pub weight_kg: u8,
    pub gym_freq: u8,
    pub branch: Branch,
    pub social_score: u8,
}

impl Default for UserInputs {
    fn default() -> Self {
        Self {
            name: None,
            age: 20,
            height_cm: 170,
            weight_kg: 60,
            gym_freq: 2,
            branch: Branch::Biotech,
            social_score: 5,
        }
    }
}

impl UserInputs {
    /// Verify every numeric field lies inside its declared range.
    pub fn validate(&self) -> Result<(), AppError> {
        InputField::Age.check(self.age)?;
        InputField::Height.check(self.height_cm)?;
        InputField::Weight.check(self.weight_kg)?;
        InputField::GymFrequency.check(self.gym_freq)?;
        InputField::SocialScore.check(self.social_score)?;
        Ok(())
    }

    /// Name used in greetings: the trimmed name, or "You" when blank.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => "You",
        }
    }

    /// Current numeric value of a field (`None` for the branch).
    pub fn numeric(&self, field: InputField) -> Option<u8> {
        match field {
            InputField::Age => Some(self.age),
            InputField::Height => Some(self.height_cm),
            InputField::Weight => Some(self.weight_kg),
            InputField::GymFrequency => Some(self.gym_freq),
            InputField::Branch => None,
            InputField::SocialScore => Some(self.social_score),
        }
    }

    /// Set a numeric field, clamping into its declared range.
    pub fn set_numeric_clamped(&mut self, field: InputField, value: i32) {
        let Some(range) = field.range() else {
            return;
        };
        let clamped = value.clamp(i32::from(*range.start()), i32::from(*range.end())) as u8;
        match field {
            InputField::Age => self.age = clamped,
            InputField::Height => self.height_cm = clamped,
            InputField::Weight => self.weight_kg = clamped,
            InputField::GymFrequency => self.gym_freq = clamped,
            InputField::SocialScore => self.social_score = clamped,
            InputField::Branch => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn branch_codes_are_total_and_injective() {
        let codes: HashSet<u8> = Branch::ALL.iter().map(|b| b.code()).collect();
        assert_eq!(codes.len(), 6);
        assert_eq!(codes, (0..=5).collect::<HashSet<u8>>());
    }

    #[test]
    fn branch_from_label_ignores_case() {
        assert_eq!(Branch::from_label("cse"), Some(Branch::Cse));
        assert_eq!(Branch::from_label(" BIOTECH "), Some(Branch::Biotech));
        assert_eq!(Branch::from_label("MBA"), None);
    }

    #[test]
    fn branch_cycles_in_both_directions() {
        assert_eq!(Branch::Me.next(), Branch::Biotech);
        assert_eq!(Branch::Biotech.prev(), Branch::Me);
        assert_eq!(Branch::Ce.next().prev(), Branch::Ce);
    }

    #[test]
    fn defaults_match_field_table() {
        let inputs = UserInputs::default();
        for field in InputField::ALL {
            assert_eq!(inputs.numeric(field), field.default_value());
        }
        assert!(inputs.validate().is_ok());
    }

    #[test]
    fn validate_names_the_offending_field() {
        let inputs = UserInputs {
            age: 40,
            ..UserInputs::default()
        };
        let err = inputs.validate().unwrap_err();
        assert!(err.message().contains("Age"));
        assert!(err.message().contains("16"));
    }

    #[test]
    fn set_numeric_clamps_into_range() {
        let mut inputs = UserInputs::default();
        inputs.set_numeric_clamped(InputField::GymFrequency, 12);
        assert_eq!(inputs.gym_freq, 7);
        inputs.set_numeric_clamped(InputField::Height, 0);
        assert_eq!(inputs.height_cm, 140);
    }

    #[test]
    fn display_name_falls_back_to_you() {
        let mut inputs = UserInputs::default();
        assert_eq!(inputs.display_name(), "You");
        inputs.name = Some("   ".to_string());
        assert_eq!(inputs.display_name(), "You");
        inputs.name = Some(" Priya ".to_string());
        assert_eq!(inputs.display_name(), "Priya");
    }
}
