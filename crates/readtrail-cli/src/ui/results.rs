//! Results pane: right panel: the output of the last task.

use ratatui::{
  Frame,
  layout::{Direction, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{BarChart, Block, Borders, Paragraph},
};
use readtrail_analytics::{AffinityGraph, Histogram, graph::GraphNode};

use crate::{app::App, task::Output};

/// Longest label kept in a bar chart. User-agent strings are truncated.
const MAX_LABEL: usize = 32;

/// Render the results pane into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let Some(results) = &app.results else {
    draw_empty(f, area);
    return;
  };

  let title = format!(
    " {} · {} ({}) ",
    results.task.code(),
    results.task.title(),
    results.snapshot.version()
  );
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));

  match &results.output {
    Output::Histogram(h) => draw_histogram(f, area, block, h, app.scroll),
    Output::TopReaders(top) => {
      let lines = top
        .iter()
        .enumerate()
        .map(|(i, (visitor, seconds))| {
          Line::from(vec![
            rank_span(i),
            Span::raw(format!("{visitor}  ")),
            Span::styled(format!("{seconds:.3} s"), Style::default().fg(Color::Green)),
          ])
        })
        .collect();
      draw_lines(f, area, block, lines, app.scroll);
    }
    Output::TopDocuments(top) => {
      let lines = top
        .iter()
        .enumerate()
        .map(|(i, (doc, count))| {
          Line::from(vec![
            rank_span(i),
            Span::styled(
              format!("{:<6}", doc.short()),
              Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("{count:>4}  "), Style::default().fg(Color::Green)),
            Span::styled(doc.as_str(), Style::default().fg(Color::DarkGray)),
          ])
        })
        .collect();
      draw_lines(f, area, block, lines, app.scroll);
    }
    Output::Graph(graph) => draw_lines(f, area, block, graph_lines(graph), app.scroll),
  }
}

fn draw_empty(f: &mut Frame, area: Rect) {
  let block = Block::default()
    .title(" Results ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  f.render_widget(
    Paragraph::new(Line::from(Span::styled(
      "Enter a document id with d, then press a task key.",
      Style::default().fg(Color::DarkGray),
    )))
    .block(block),
    area,
  );
}

fn rank_span(index: usize) -> Span<'static> {
  Span::styled(format!("{:>2}. ", index + 1), Style::default().fg(Color::DarkGray))
}

fn draw_lines(f: &mut Frame, area: Rect, block: Block, lines: Vec<Line>, scroll: usize) {
  if lines.is_empty() {
    f.render_widget(
      Paragraph::new(Span::styled("(nothing to show)", Style::default().fg(Color::DarkGray)))
        .block(block),
      area,
    );
    return;
  }
  let scroll = u16::try_from(scroll).unwrap_or(u16::MAX);
  f.render_widget(Paragraph::new(lines).block(block).scroll((scroll, 0)), area);
}

fn draw_histogram(f: &mut Frame, area: Rect, block: Block, histogram: &Histogram, scroll: usize) {
  let labels: Vec<String> = histogram
    .bins()
    .iter()
    .skip(scroll)
    .map(|(label, _)| truncate(label, MAX_LABEL))
    .collect();
  let data: Vec<(&str, u64)> = labels
    .iter()
    .zip(histogram.bins().iter().skip(scroll))
    .map(|(label, (_, count))| (label.as_str(), *count as u64))
    .collect();

  if data.is_empty() {
    draw_lines(f, area, block, Vec::new(), 0);
    return;
  }

  let chart = BarChart::default()
    .block(block)
    .direction(Direction::Horizontal)
    .bar_width(1)
    .bar_gap(0)
    .bar_style(Style::default().fg(Color::Cyan))
    .value_style(Style::default().fg(Color::Black).bg(Color::Cyan))
    .data(data.as_slice());
  f.render_widget(chart, area);
}

/// One line per edge, grouped by source node, followed by any shared labels.
fn graph_lines(graph: &AffinityGraph) -> Vec<Line<'static>> {
  let mut lines = vec![Line::from(vec![
    Span::styled("document ", Style::default().fg(Color::DarkGray)),
    Span::styled(
      graph.root().label().to_owned(),
      Style::default().add_modifier(Modifier::BOLD),
    ),
    Span::styled(
      format!("  {} nodes, {} edges", graph.node_count(), graph.edge_count()),
      Style::default().fg(Color::DarkGray),
    ),
  ])];

  for (from, to) in graph.edges() {
    lines.push(Line::from(vec![
      node_span(from),
      Span::styled(" → ", Style::default().fg(Color::DarkGray)),
      node_span(to),
    ]));
  }

  for collision in graph.label_collisions() {
    lines.push(Line::from(Span::styled(
      format!("label {} is shared by {}", collision.label, collision.ids.join(", ")),
      Style::default().fg(Color::Yellow),
    )));
  }
  lines
}

fn node_span(node: &GraphNode) -> Span<'static> {
  let (prefix, color) = match node {
    GraphNode::Document(_) => ("doc ", Color::White),
    GraphNode::Reader(_) => ("reader ", Color::Cyan),
    GraphNode::SelfRoot(_) => ("you ", Color::Green),
  };
  Span::styled(format!("{prefix}{}", node.label()), Style::default().fg(color))
}

fn truncate(label: &str, max: usize) -> String {
  if label.chars().count() <= max {
    return label.to_owned();
  }
  let mut out: String = label.chars().take(max - 1).collect();
  out.push('…');
  out
}
