//! Presentation helpers: display tiers and formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the scoring code stays clean and testable
//! - output changes are localized

pub mod format;
pub mod tiers;

pub use format::*;
pub use tiers::*;
