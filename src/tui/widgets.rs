//! Small rendering helpers for the input and result panels.

use std::ops::RangeInclusive;

use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

use crate::blend::{BlendedScore, SCORE_MAX, SCORE_MIN};
use crate::domain::Branch;

const TRACK_WIDTH: usize = 10;

/// `Age        20  [██░░░░░░░░]`
pub fn slider_line(label: &str, value: u8, range: &RangeInclusive<u8>) -> Line<'static> {
    let filled = slider_fill(value, range);
    let track = format!("{}{}", "█".repeat(filled), "░".repeat(TRACK_WIDTH - filled));
    Line::from(vec![
        Span::raw(format!("{label:<14.14} {value:>3} ")),
        Span::styled(track, Style::default().fg(Color::LightRed)),
    ])
}

pub fn branch_line(branch: Branch) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("{:<14} ", "Branch")),
        Span::styled(format!("‹ {branch} ›"), Style::default().fg(Color::Cyan)),
    ])
}

/// Number of filled cells for `value` within `range`.
pub fn slider_fill(value: u8, range: &RangeInclusive<u8>) -> usize {
    let (lo, hi) = (f64::from(*range.start()), f64::from(*range.end()));
    if hi <= lo {
        return TRACK_WIDTH;
    }
    let u = ((f64::from(value) - lo) / (hi - lo)).clamp(0.0, 1.0);
    (u * TRACK_WIDTH as f64).round() as usize
}

/// Gauge position for a score, in `[0, 1]`.
pub fn gauge_ratio(score: BlendedScore) -> f64 {
    ((score.value() - SCORE_MIN) / (SCORE_MAX - SCORE_MIN)).clamp(0.0, 1.0)
}
