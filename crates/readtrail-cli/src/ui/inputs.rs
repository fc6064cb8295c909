//! Inputs pane: left panel: id fields, sort policy, dataset and task keys.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::{
  app::{App, Field, Mode},
  task::Task,
};

/// Render the inputs pane into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(" Query ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let label = Style::default().fg(Color::DarkGray);
  let mut lines = vec![
    field_line(app, Field::Document, "document", &app.document),
    field_line(app, Field::Visitor, "visitor ", &app.visitor),
    Line::from(vec![
      Span::styled("sort      ", label),
      Span::raw(app.sort.as_str()),
    ]),
    Line::default(),
    Line::from(vec![Span::styled("dataset   ", label), Span::raw(app.source.as_str())]),
    Line::from(vec![
      Span::styled("version   ", label),
      Span::raw(format!(
        "{}  ({} rows)",
        app.session.version(),
        app.session.table().len()
      )),
    ]),
  ];
  if app.skipped > 0 {
    lines.push(Line::from(Span::styled(
      format!("          {} lines skipped", app.skipped),
      Style::default().fg(Color::Yellow),
    )));
  }

  lines.push(Line::default());
  let current = app.results.as_ref().map(|r| r.task);
  for task in Task::ALL {
    let style = if Some(task) == current {
      Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
      Style::default()
    };
    lines.push(Line::from(vec![
      Span::styled(format!("[{}] ", task.key()), label),
      Span::styled(format!("{:<3}", task.code()), label),
      Span::styled(task.title(), style),
    ]));
  }

  f.render_widget(Paragraph::new(lines).block(block), area);
}

fn field_line<'a>(app: &App, field: Field, name: &'a str, value: &'a str) -> Line<'a> {
  let editing = app.mode == Mode::Editing(field);
  let value_style = if editing {
    Style::default().fg(Color::Black).bg(Color::Yellow)
  } else {
    Style::default().fg(Color::White)
  };
  let shown = if value.is_empty() && !editing { "—" } else { value };

  let mut spans = vec![
    Span::styled(format!("{name}  "), Style::default().fg(Color::DarkGray)),
    Span::styled(shown, value_style),
  ];
  if editing {
    spans.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
  }
  Line::from(spans)
}
