//! TUI rendering: orchestrates all panes.

pub mod inputs;
pub mod results;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};

use crate::app::{App, Field, Mode};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(f.area());

  draw_header(f, rows[0]);
  draw_body(f, rows[1], app);
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let left = Span::styled(
    " readtrail  [1-7] tasks  [d/u] edit  [s] sort  [r] reload  [q] quit",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(
    format!("{date} "),
    Style::default().fg(Color::DarkGray),
  );

  let pad = area
    .width
    .saturating_sub(left.width() as u16)
    .saturating_sub(right.width() as u16);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body(f: &mut Frame, area: Rect, app: &App) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
    .split(area);

  inputs::draw(f, cols[0], app);
  results::draw(f, cols[1], app);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match app.mode {
    Mode::Editing(Field::Document) => ("DOCUMENT", "Type a document id  Enter/Esc done"),
    Mode::Editing(Field::Visitor) => ("VISITOR", "Type a visitor id  Enter/Esc done"),
    Mode::Normal => ("NORMAL", "1-7 run task  d/u edit  s sort  ↑↓ scroll  w write graph  q quit"),
  };

  let (text, color) = if app.status.text.is_empty() {
    (hints, Color::DarkGray)
  } else if app.status.is_error {
    (app.status.text.as_str(), Color::Red)
  } else {
    (app.status.text.as_str(), Color::Green)
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(if app.status.is_error { Color::Red } else { Color::Cyan })
      .add_modifier(Modifier::BOLD),
  );
  let text_span = Span::styled(format!("  {text}"), Style::default().fg(color));

  f.render_widget(
    Paragraph::new(Line::from(vec![mode_span, text_span]))
      .style(Style::default().bg(Color::Black)),
    area,
  );
}
