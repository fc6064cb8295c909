//! Application state machine and key dispatcher for the TUI.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use readtrail_analytics::{Analytics, Session, Snapshot, SortPolicy};
use readtrail_core::{EventTable, LoadReport};

use crate::task::{self, Output, Query, Task};

// ─── Mode ─────────────────────────────────────────────────────────────────────

/// An editable input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
  Document,
  Visitor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
  /// Keys run commands.
  Normal,
  /// Printable keys go into the field.
  Editing(Field),
}

/// What the event loop should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
  Continue,
  /// Load the dataset again and call [`App::replace_table`].
  Reload,
  Quit,
}

// ─── Results ──────────────────────────────────────────────────────────────────

/// Output of the last task, with the snapshot it was computed on.
#[derive(Debug, Clone)]
pub struct Results {
  pub task:     Task,
  pub output:   Output,
  pub snapshot: Snapshot,
}

/// One-line message for the status bar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Status {
  pub text:     String,
  pub is_error: bool,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  pub mode: Mode,

  /// Document id field.
  pub document: String,

  /// Visitor id field; used as the excluded visitor by the also-likes tasks.
  pub visitor: String,

  pub sort: SortPolicy,

  /// Current dataset and its version.
  pub session: Session,

  /// Where the dataset came from, for the inputs pane.
  pub source: String,

  /// Lines skipped by the last load.
  pub skipped: usize,

  /// Output of the last task, if still current.
  pub results: Option<Results>,

  /// Scroll offset within list-style results.
  pub scroll: usize,

  /// Where `w` writes the graph.
  pub graph_out: PathBuf,

  pub status: Status,
}

impl App {
  pub fn new(session: Session, source: impl Into<String>, graph_out: PathBuf) -> Self {
    Self {
      mode: Mode::Normal,
      document: String::new(),
      visitor: String::new(),
      sort: SortPolicy::default(),
      session,
      source: source.into(),
      skipped: 0,
      results: None,
      scroll: 0,
      graph_out,
      status: Status::default(),
    }
  }

  pub fn with_inputs(
    mut self,
    document: Option<String>,
    visitor: Option<String>,
    sort: SortPolicy,
  ) -> Self {
    self.document = document.unwrap_or_default();
    self.visitor = visitor.unwrap_or_default();
    self.sort = sort;
    self
  }

  pub fn info(&mut self, text: impl Into<String>) {
    self.status = Status { text: text.into(), is_error: false };
  }

  pub fn error(&mut self, text: impl Into<String>) {
    self.status = Status { text: text.into(), is_error: true };
  }

  // ── Data ──────────────────────────────────────────────────────────────────

  /// Run `task` on the current snapshot and keep its output.
  pub fn run_task(&mut self, task: Task) {
    let snapshot = self.session.snapshot();
    let analytics = Analytics::new(snapshot.clone());
    let query = Query {
      document: Some(self.document.as_str()),
      visitor:  Some(self.visitor.as_str()),
      sort:     self.sort,
    };

    match task::run(&analytics, task, &query) {
      Ok(output) => {
        let summary = summarize(&output);
        self.results = Some(Results { task, output, snapshot });
        self.scroll = 0;
        self.info(format!("{}: {summary}", task.title()));
      }
      Err(e) if e.is_fatal() => {
        self.results = None;
        self.error(format!("internal error: {e}"));
      }
      Err(e) => self.error(e.to_string()),
    }
  }

  /// Swap in a freshly loaded table. Results computed on the old one are
  /// dropped.
  pub fn replace_table(&mut self, table: EventTable, report: LoadReport) {
    let rows = table.len();
    let version = self.session.replace(table);
    self.skipped = report.skipped;
    let discarded = self.discard_stale();

    let mut text = format!("reloaded {rows} rows as {version}");
    if report.skipped > 0 {
      text.push_str(&format!(", {} lines skipped", report.skipped));
    }
    if discarded {
      text.push_str("; old results discarded");
    }
    self.info(text);
  }

  /// Drop results that no longer match the session. Returns true if any
  /// were dropped.
  fn discard_stale(&mut self) -> bool {
    let stale = self
      .results
      .as_ref()
      .is_some_and(|r| r.snapshot.ensure_current(&self.session).is_err());
    if stale {
      self.results = None;
      self.scroll = 0;
    }
    stale
  }

  /// Write the graph currently shown to [`App::graph_out`].
  fn write_graph(&mut self) {
    let Some(Results { output: Output::Graph(graph), .. }) = &self.results else {
      self.error("no graph to write; run task 7 first");
      return;
    };
    let dot = graph.to_dot();
    let path = self.graph_out.clone();
    match std::fs::write(&path, dot) {
      Ok(()) => self.info(format!("graph written to {}", path.display())),
      Err(e) => self.error(format!("writing {}: {e}", path.display())),
    }
  }

  fn result_rows(&self) -> usize {
    match self.results.as_ref().map(|r| &r.output) {
      Some(Output::Histogram(h)) => h.len(),
      Some(Output::TopReaders(top)) => top.len(),
      Some(Output::TopDocuments(top)) => top.len(),
      Some(Output::Graph(g)) => g.edge_count(),
      None => 0,
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  pub fn handle_key(&mut self, key: KeyEvent) -> Action {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Action::Quit;
    }

    match self.mode {
      Mode::Editing(field) => {
        self.handle_edit_key(field, key);
        Action::Continue
      }
      Mode::Normal => self.handle_normal_key(key),
    }
  }

  fn handle_edit_key(&mut self, field: Field, key: KeyEvent) {
    let value = match field {
      Field::Document => &mut self.document,
      Field::Visitor => &mut self.visitor,
    };
    match key.code {
      KeyCode::Enter | KeyCode::Esc => self.mode = Mode::Normal,
      KeyCode::Backspace => {
        value.pop();
      }
      KeyCode::Char(c) => value.push(c),
      _ => {}
    }
  }

  fn handle_normal_key(&mut self, key: KeyEvent) -> Action {
    match key.code {
      KeyCode::Char('q') => return Action::Quit,
      KeyCode::Char('r') => {
        self.info(format!("reloading {}…", self.source));
        return Action::Reload;
      }

      KeyCode::Char('d') => self.mode = Mode::Editing(Field::Document),
      KeyCode::Char('u') => self.mode = Mode::Editing(Field::Visitor),
      KeyCode::Char('s') => {
        self.sort = self.sort.toggled();
        self.info(format!("sort: {}", self.sort));
      }
      KeyCode::Char('w') => self.write_graph(),

      KeyCode::Char(c) => {
        if let Some(task) = Task::from_key(c) {
          self.run_task(task);
        }
      }

      KeyCode::Down | KeyCode::PageDown => {
        if self.scroll + 1 < self.result_rows() {
          self.scroll += 1;
        }
      }
      KeyCode::Up | KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(1),

      _ => {}
    }
    Action::Continue
  }
}

fn summarize(output: &Output) -> String {
  match output {
    Output::Histogram(h) => format!("{} views in {} groups", h.total(), h.len()),
    Output::TopReaders(top) => format!("{} readers", top.len()),
    Output::TopDocuments(top) => format!("{} documents", top.len()),
    Output::Graph(g) => {
      let collisions = g.label_collisions().len();
      if collisions == 0 {
        format!("{} nodes, {} edges  (w to write DOT)", g.node_count(), g.edge_count())
      } else {
        format!(
          "{} nodes, {} edges, {collisions} shared labels  (w to write DOT)",
          g.node_count(),
          g.edge_count()
        )
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use crossterm::event::{KeyEventKind, KeyEventState};
  use readtrail_core::Event;

  use super::*;

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
      code,
      modifiers: KeyModifiers::NONE,
      kind: KeyEventKind::Press,
      state: KeyEventState::NONE,
    }
  }

  fn type_str(app: &mut App, s: &str) {
    for c in s.chars() {
      app.handle_key(key(KeyCode::Char(c)));
    }
  }

  fn table() -> EventTable {
    EventTable::new(vec![
      Event::read("v1", "doc-aaaa").with_country("GB"),
      Event::read("v2", "doc-aaaa").with_country("DE"),
      Event::read("v1", "doc-bbbb"),
      Event::read("v2", "doc-bbbb"),
    ])
  }

  fn app() -> App { App::new(Session::new(table()), "test", "graph.dot".into()) }

  #[test]
  fn editing_a_field_captures_command_keys() {
    let mut app = app();
    app.handle_key(key(KeyCode::Char('d')));
    assert_eq!(app.mode, Mode::Editing(Field::Document));

    type_str(&mut app, "doc-aaaaq");
    app.handle_key(key(KeyCode::Backspace));
    app.handle_key(key(KeyCode::Enter));

    assert_eq!(app.mode, Mode::Normal);
    assert_eq!(app.document, "doc-aaaa");
  }

  #[test]
  fn q_and_ctrl_c_quit() {
    let mut app = app();
    assert_eq!(app.handle_key(key(KeyCode::Char('q'))), Action::Quit);

    app.handle_key(key(KeyCode::Char('u')));
    let ctrl_c = KeyEvent { modifiers: KeyModifiers::CONTROL, ..key(KeyCode::Char('c')) };
    assert_eq!(app.handle_key(ctrl_c), Action::Quit);
  }

  #[test]
  fn number_keys_run_tasks() {
    let mut app = app().with_inputs(Some("doc-aaaa".into()), None, SortPolicy::Alphabetical);
    app.handle_key(key(KeyCode::Char('1')));

    let results = app.results.as_ref().unwrap();
    assert_eq!(results.task, Task::Countries);
    assert!(!app.status.is_error);
  }

  #[test]
  fn errors_go_to_the_status_bar() {
    let mut app = app();
    app.handle_key(key(KeyCode::Char('6')));
    assert!(app.status.is_error);
    assert!(app.results.is_none());

    app.document = "doc-zzzz".into();
    app.handle_key(key(KeyCode::Char('6')));
    assert!(app.status.is_error);
    assert!(app.status.text.contains("doc-zzzz"), "{}", app.status.text);
  }

  #[test]
  fn s_toggles_sort_policy() {
    let mut app = app();
    app.handle_key(key(KeyCode::Char('s')));
    assert_eq!(app.sort, SortPolicy::DescendingCount);
    app.handle_key(key(KeyCode::Char('s')));
    assert_eq!(app.sort, SortPolicy::Alphabetical);
  }

  #[test]
  fn reload_discards_results_from_the_old_table() {
    let mut app = app().with_inputs(Some("doc-aaaa".into()), None, SortPolicy::Alphabetical);
    assert_eq!(app.handle_key(key(KeyCode::Char('r'))), Action::Reload);

    app.run_task(Task::AlsoLikes);
    assert!(app.results.is_some());

    app.replace_table(table(), LoadReport::default());
    assert!(app.results.is_none());
    assert_eq!(app.session.version().get(), 2);
    assert!(app.status.text.contains("discarded"));
  }

  #[test]
  fn write_without_graph_is_an_error() {
    let mut app = app();
    app.handle_key(key(KeyCode::Char('w')));
    assert!(app.status.is_error);
  }

  #[test]
  fn scrolling_stays_within_results() {
    let mut app = app().with_inputs(Some("doc-aaaa".into()), None, SortPolicy::Alphabetical);
    app.run_task(Task::Countries);
    for _ in 0..5 {
      app.handle_key(key(KeyCode::Down));
    }
    assert_eq!(app.scroll, 1);
    app.handle_key(key(KeyCode::Up));
    app.handle_key(key(KeyCode::Up));
    assert_eq!(app.scroll, 0);
  }
}
