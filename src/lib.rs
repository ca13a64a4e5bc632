//! `relscore` library crate.
//!
//! The binary (`relscore`) is a thin wrapper around this library so that:
//!
//! - the scoring core is testable without spawning processes or a terminal
//! - every front end (TUI, questionnaire, one-shot CLI) shares one pipeline

pub mod app;
pub mod blend;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod features;
pub mod logging;
pub mod models;
pub mod report;
pub mod tui;
