//! Ratatui-based terminal UI.
//!
//! The TUI provides an input panel for the name and the six scored fields,
//! runs the prediction pipeline on demand, and renders the result themed in
//! the colour of its tier.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Wrap},
};
use tracing::{info, warn};

use crate::app::pipeline::{ModelPair, PredictionOutcome, run_prediction};
use crate::domain::{InputField, UserInputs};
use crate::error::AppError;
use crate::report::{DISCLAIMER, Rgb, TIERS};

mod widgets;

const NAME_MAX_LEN: usize = 32;
const BIG_STEP: i32 = 5;

/// Start the TUI with models that are already loaded.
pub fn run(models: ModelPair) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal =
        Terminal::new(backend).map_err(|e| AppError::runtime(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(models);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::runtime(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::runtime(format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Row in the input panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    Name,
    Field(InputField),
}

impl Row {
    fn at(index: usize) -> Row {
        match index {
            0 => Row::Name,
            i => Row::Field(InputField::ALL[(i - 1).min(InputField::ALL.len() - 1)]),
        }
    }

    const COUNT: usize = InputField::ALL.len() + 1;
}

struct App {
    models: ModelPair,
    inputs: UserInputs,
    selected: usize,
    editing_name: bool,
    status: String,
    status_is_error: bool,
    outcome: Option<PredictionOutcome>,
    /// Inputs that produced `outcome`; used to flag a stale result.
    scored_inputs: Option<UserInputs>,
}

impl App {
    fn new(models: ModelPair) -> Self {
        Self {
            models,
            inputs: UserInputs::default(),
            selected: 1,
            editing_name: false,
            status: "Adjust your inputs, then press Enter.".to_string(),
            status_is_error: false,
            outcome: None,
            scored_inputs: None,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::runtime(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::runtime(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::runtime(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.editing_name {
            self.handle_name_edit(key.code);
            return false;
        }

        let step = if key.modifiers.contains(KeyModifiers::SHIFT) { BIG_STEP } else { 1 };
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                if self.selected > 0 {
                    self.selected -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected + 1 < Row::COUNT {
                    self.selected += 1;
                }
            }
            KeyCode::Left => self.adjust(-step),
            KeyCode::Right => self.adjust(step),
            KeyCode::PageDown => self.adjust(-BIG_STEP),
            KeyCode::PageUp => self.adjust(BIG_STEP),
            KeyCode::Enter => match Row::at(self.selected) {
                Row::Name => {
                    self.editing_name = true;
                    self.set_status("Editing name. Enter or Esc to finish.");
                }
                Row::Field(_) => self.predict(),
            },
            KeyCode::Char('p') => self.predict(),
            KeyCode::Char('r') => {
                self.inputs = UserInputs {
                    name: self.inputs.name.take(),
                    ..UserInputs::default()
                };
                self.set_status("Inputs reset to defaults.");
            }
            _ => {}
        }

        false
    }

    fn handle_name_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter | KeyCode::Esc => {
                self.editing_name = false;
                let greeting = format!("Hi, {}.", self.inputs.display_name());
                self.set_status(&greeting);
            }
            KeyCode::Backspace => {
                if let Some(name) = self.inputs.name.as_mut() {
                    name.pop();
                }
            }
            KeyCode::Char(c) => {
                let name = self.inputs.name.get_or_insert_with(String::new);
                if name.chars().count() < NAME_MAX_LEN && !c.is_control() {
                    name.push(c);
                }
            }
            _ => {}
        }
    }

    fn adjust(&mut self, delta: i32) {
        let Row::Field(field) = Row::at(self.selected) else {
            return;
        };
        match field {
            InputField::Branch => {
                self.inputs.branch = if delta >= 0 {
                    self.inputs.branch.next()
                } else {
                    self.inputs.branch.prev()
                };
            }
            _ => {
                let current = self.inputs.numeric(field).map(i32::from).unwrap_or_default();
                self.inputs.set_numeric_clamped(field, current + delta);
            }
        }
    }

    fn predict(&mut self) {
        match run_prediction(&self.models, &self.inputs) {
            Ok(outcome) => {
                info!(score = outcome.score.value(), "TUI prediction");
                self.status = format!(
                    "{} -> {} ({})",
                    self.inputs.display_name(),
                    outcome.score.percent_label(),
                    outcome.tier.label
                );
                self.status_is_error = false;
                self.outcome = Some(outcome);
                self.scored_inputs = Some(self.inputs.clone());
            }
            Err(err) => {
                warn!(error = %err, "TUI prediction failed");
                self.outcome = None;
                self.scored_inputs = None;
                self.status = err.message().to_string();
                self.status_is_error = true;
            }
        }
    }

    fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
        self.status_is_error = false;
    }

    fn is_stale(&self) -> bool {
        match (&self.outcome, &self.scored_inputs) {
            (Some(_), Some(scored)) => scored != &self.inputs,
            _ => false,
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(5),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        draw_legend(frame, chunks[2]);
        self.draw_footer(frame, chunks[3]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let lines = vec![
            Line::from(vec![
                Span::styled("relscore", Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD)),
                Span::raw(" - Relationship Probability Predictor"),
            ]),
            Line::from(Span::styled(
                "Minimal inputs, maximum emotional damage.",
                Style::default().fg(Color::Gray),
            )),
        ];
        let p = Paragraph::new(Text::from(lines))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(38), Constraint::Min(0)])
            .split(area);

        self.draw_inputs(frame, chunks[0]);
        self.draw_result(frame, chunks[1]);
    }

    fn draw_inputs(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut items = Vec::with_capacity(Row::COUNT);
        let name = match self.inputs.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => "-".to_string(),
        };
        let cursor = if self.editing_name { "_" } else { "" };
        items.push(ListItem::new(format!("Name: {name}{cursor}")));

        for field in InputField::ALL {
            let line = match (field, self.inputs.numeric(field), field.range()) {
                (InputField::Branch, _, _) => widgets::branch_line(self.inputs.branch),
                (_, Some(value), Some(range)) => widgets::slider_line(field.display_name(), value, &range),
                _ => Line::from(field.display_name()),
            };
            items.push(ListItem::new(line));
        }

        let list = List::new(items)
            .block(Block::default().title("Tell us just the basics").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_result(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let Some(outcome) = &self.outcome else {
            let msg = Paragraph::new("Press Enter to calculate your relationship probability.")
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(Block::default().title("Result").borders(Borders::ALL));
            frame.render_widget(msg, area);
            return;
        };

        let tier = outcome.tier;
        let accent = rgb(tier.accent);
        let text = rgb(tier.text);
        let block = Block::default()
            .title(format!("Result: {}", tier.label))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent).add_modifier(Modifier::BOLD));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Length(3), Constraint::Min(0)])
            .split(inner);

        let name = self.inputs_for_display().display_name().to_string();
        let headline = Paragraph::new(Line::from(Span::styled(
            format!("Probability for {name}: {}", outcome.score.percent_label()),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(headline, chunks[0]);

        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL))
            .gauge_style(Style::default().fg(accent).bg(Color::Black))
            .ratio(widgets::gauge_ratio(outcome.score))
            .label(outcome.score.percent_label());
        frame.render_widget(gauge, chunks[1]);

        let mut lines = vec![
            Line::from(Span::styled(tier.message_for(&name), Style::default().fg(text))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Catch line: ", Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("\"{}\"", tier.catch_line),
                    Style::default().fg(text).add_modifier(Modifier::ITALIC),
                ),
            ]),
        ];
        if self.is_stale() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Inputs changed. Press Enter to recalculate.",
                Style::default().fg(Color::Yellow),
            )));
        }
        let body = Paragraph::new(Text::from(lines))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(body, chunks[2]);
    }

    /// The greeting uses the name the result was computed for.
    fn inputs_for_display(&self) -> &UserInputs {
        self.scored_inputs.as_ref().unwrap_or(&self.inputs)
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  Shift/PgUp/PgDn ±5  Enter calculate/edit name  r reset  q quit";
        let status_color = if self.status_is_error { Color::Red } else { Color::Yellow };
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(status_color)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// One coloured cell per tier plus the disclaimer, always visible.
fn draw_legend(frame: &mut ratatui::Frame<'_>, area: Rect) {
    let spans: Vec<Span> = TIERS
        .iter()
        .flat_map(|row| {
            [
                Span::styled(
                    format!(" {} ", row.legend_label()),
                    Style::default().fg(rgb(row.text)).bg(rgb(row.accent)),
                ),
                Span::raw(" "),
            ]
        })
        .collect();
    let lines = vec![
        Line::from(spans),
        Line::from(Span::styled(DISCLAIMER, Style::default().fg(Color::DarkGray))),
    ];
    let legend = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Color legend").borders(Borders::ALL));
    frame.render_widget(legend, area);
}

fn rgb(c: Rgb) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::blend::tests::{Failing, fixed};
    use crate::domain::Branch;
    use crate::models::LoadedModel;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn shift(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::SHIFT)
    }

    fn app(a: f64, b: f64) -> App {
        App::new(ModelPair {
            a: fixed("XGBoost model", a),
            b: fixed("CatBoost model", b),
        })
    }

    fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn arrows_adjust_the_selected_field() {
        let mut app = app(50.0, 50.0);
        assert_eq!(Row::at(app.selected), Row::Field(InputField::Age));
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.inputs.age, 21);
        app.handle_key(key(KeyCode::PageUp));
        assert_eq!(app.inputs.age, 26);
        for _ in 0..10 {
            app.handle_key(key(KeyCode::PageUp));
        }
        assert_eq!(app.inputs.age, 35);
    }

    #[test]
    fn shift_arrows_take_big_steps() {
        let mut app = app(50.0, 50.0);
        app.handle_key(shift(KeyCode::Right));
        assert_eq!(app.inputs.age, 25);
        app.handle_key(shift(KeyCode::Left));
        app.handle_key(shift(KeyCode::Left));
        assert_eq!(app.inputs.age, 16);
    }

    #[test]
    fn branch_cycles_with_arrows() {
        let mut app = app(50.0, 50.0);
        for _ in 0..4 {
            app.handle_key(key(KeyCode::Down));
        }
        assert_eq!(Row::at(app.selected), Row::Field(InputField::Branch));
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.inputs.branch, Branch::Cse);
        app.handle_key(key(KeyCode::Left));
        app.handle_key(key(KeyCode::Left));
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.inputs.branch, Branch::Me);
    }

    #[test]
    fn name_editing_captures_q() {
        let mut app = app(50.0, 50.0);
        app.handle_key(key(KeyCode::Up));
        app.handle_key(key(KeyCode::Enter));
        assert!(app.editing_name);
        for c in "Quinn q".chars() {
            assert!(!app.handle_key(key(KeyCode::Char(c))));
        }
        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Enter));
        assert!(!app.editing_name);
        assert_eq!(app.inputs.display_name(), "Quinn");
        assert!(app.handle_key(key(KeyCode::Char('q'))));
    }

    #[test]
    fn enter_predicts_and_renders_themed_result() {
        let mut app = app(72.0, 68.0);
        app.handle_key(key(KeyCode::Enter));
        let outcome = app.outcome.as_ref().unwrap();
        assert_eq!(outcome.tier.label, "Strong");

        let screen = render(&mut app);
        assert!(screen.contains("Probability for You: 70.40%"));
        assert!(screen.contains("Result: Strong"));
    }

    #[test]
    fn changed_inputs_mark_result_stale() {
        let mut app = app(72.0, 68.0);
        app.handle_key(key(KeyCode::Char('p')));
        assert!(!app.is_stale());
        app.handle_key(key(KeyCode::Right));
        assert!(app.is_stale());
        app.handle_key(key(KeyCode::Char('p')));
        assert!(!app.is_stale());
    }

    #[test]
    fn prediction_error_is_shown_inline() {
        let mut app = App::new(ModelPair {
            a: fixed("XGBoost model", 50.0),
            b: LoadedModel::from_regressor("CatBoost model", Box::new(Failing)),
        });
        app.handle_key(key(KeyCode::Enter));
        assert!(app.outcome.is_none());
        assert!(app.status_is_error);
        assert!(app.status.contains("CatBoost model"));

        let screen = render(&mut app);
        assert!(screen.contains("Press Enter to calculate"));
    }

    #[test]
    fn nan_model_is_an_inline_error_not_a_score() {
        let mut app = App::new(ModelPair {
            a: fixed("XGBoost model", f64::NAN),
            b: fixed("CatBoost model", 50.0),
        });
        app.handle_key(key(KeyCode::Enter));
        assert!(app.outcome.is_none());
        assert!(app.status_is_error);
        assert!(app.status.contains("XGBoost model"));

        let screen = render(&mut app);
        assert!(!screen.contains("Result: Elite"));
        assert!(screen.contains("Press Enter to calculate"));
    }

    #[test]
    fn legend_and_disclaimer_are_always_rendered() {
        let mut app = app(50.0, 50.0);
        let before = render(&mut app);
        app.handle_key(key(KeyCode::Enter));
        let after = render(&mut app);
        for screen in [before, after] {
            assert!(screen.contains("Color legend"));
            for label in ["0-20%: Dead scene", "40-60%: Maybe", "80-100%: Elite"] {
                assert!(screen.contains(label), "missing {label}");
            }
            assert!(screen.contains("This is a fun ML demo"));
        }
    }

    #[test]
    fn reset_keeps_the_name() {
        let mut app = app(50.0, 50.0);
        app.inputs.name = Some("Priya".to_string());
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Char('r')));
        assert_eq!(app.inputs.age, 20);
        assert_eq!(app.inputs.name.as_deref(), Some("Priya"));
    }
}
