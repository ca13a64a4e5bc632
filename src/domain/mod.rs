//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the categorical branch enumeration (`Branch`)
//! - the editable input fields and their declared ranges (`InputField`)
//! - one submission of user values (`UserInputs`)

pub mod types;

pub use types::*;
