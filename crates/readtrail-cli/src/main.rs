//! `readtrail`: reading analytics over a document-tracking event log.
//!
//! # Usage
//!
//! ```
//! readtrail -f issuu_cw2.json -t 2a -d 140224101516-e5c074c3404177518bab9d7a65fb578e
//! readtrail -f issuu_cw2.json -t 6 -d <doc> -u <visitor> --graph-out also_likes.dot
//! readtrail --url https://example.org/sample.json      # interactive
//! ```

mod app;
mod render;
mod settings;
mod source;
mod task;
mod ui;

use std::{io, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use app::{Action, App};
use clap::Parser;
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use readtrail_analytics::{Analytics, Session, SortPolicy};
use readtrail_jsonl::ParseMode;
use settings::Settings;
use source::Input;
use task::{Output, Query, Task};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "readtrail", version, about = "Reading analytics over a document-tracking log")]
struct Args {
  /// Config file (TOML, JSON or YAML). Defaults to ./readtrail.* if present.
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// JSON-lines event log on disk.
  #[arg(short, long, value_name = "FILE", env = "READTRAIL_FILE", conflicts_with = "url")]
  file: Option<PathBuf>,

  /// Download the event log from this URL instead.
  #[arg(long, env = "READTRAIL_URL")]
  url: Option<String>,

  /// Document id for tasks 2a, 2b, 5d and 6.
  #[arg(short, long = "doc", value_name = "DOC")]
  document: Option<String>,

  /// Visitor id, left out of the also-likes results.
  #[arg(short = 'u', long = "user", value_name = "VISITOR")]
  visitor: Option<String>,

  /// Task to run once; without it the interactive UI starts.
  #[arg(short, long, value_enum)]
  task: Option<Task>,

  /// Ordering of also-likes documents.
  #[arg(long, value_name = "POLICY")]
  sort: Option<SortPolicy>,

  /// Write task 6 DOT output here instead of stdout.
  #[arg(long, value_name = "FILE")]
  graph_out: Option<PathBuf>,

  /// Fail on the first malformed line instead of skipping it.
  #[arg(long)]
  strict: bool,
}

/// Flags layered over settings.
struct Resolved {
  input:     Input,
  mode:      ParseMode,
  document:  Option<String>,
  visitor:   Option<String>,
  sort:      SortPolicy,
  graph_out: Option<PathBuf>,
}

impl Resolved {
  fn new(args: Args, settings: Settings) -> Result<Self> {
    let strict = args.strict || settings.strict;
    Ok(Self {
      input:     Input::resolve(args.file.or(settings.file), args.url.or(settings.url))?,
      mode:      if strict { ParseMode::Strict } else { ParseMode::Lenient },
      document:  args.document.or(settings.document),
      visitor:   args.visitor.or(settings.visitor),
      sort:      args.sort.unwrap_or(settings.sort),
      graph_out: args.graph_out.or(settings.graph_out),
    })
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();
  let settings = Settings::load(args.config.as_deref())?;
  let task = args.task;
  let resolved = Resolved::new(args, settings)?;

  match task {
    Some(task) => {
      init_tracing();
      run_once(task, &resolved).await
    }
    None => run_tui(resolved).await,
  }
}

/// Logs go to stderr, so stdout stays clean for task output.
fn init_tracing() {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(io::stderr)
    .init();
}

// ─── One-shot mode ────────────────────────────────────────────────────────────

async fn run_once(task: Task, resolved: &Resolved) -> Result<()> {
  let (table, _) = resolved.input.load(resolved.mode).await?;
  let analytics = Analytics::new(Session::new(table).snapshot());
  let query = Query {
    document: resolved.document.as_deref(),
    visitor:  resolved.visitor.as_deref(),
    sort:     resolved.sort,
  };

  let output = task::run(&analytics, task, &query)
    .with_context(|| format!("task {} failed", task.code()))?;

  if let Output::Graph(graph) = &output {
    for collision in graph.label_collisions() {
      tracing::warn!(
        label = %collision.label,
        ids = ?collision.ids,
        "distinct ids share one graph label"
      );
    }
    if let Some(path) = &resolved.graph_out {
      std::fs::write(path, graph.to_dot())
        .with_context(|| format!("writing {}", path.display()))?;
      tracing::info!(path = %path.display(), "graph written");
      return Ok(());
    }
  }

  print!("{}", render::render(task.title(), &output));
  Ok(())
}

// ─── Interactive mode ─────────────────────────────────────────────────────────

async fn run_tui(resolved: Resolved) -> Result<()> {
  // Load before touching the terminal so load errors print normally.
  let (table, report) = resolved.input.load(resolved.mode).await?;
  let graph_out = resolved
    .graph_out
    .clone()
    .unwrap_or_else(|| PathBuf::from(settings::DEFAULT_GRAPH_OUT));

  let mut app = App::new(Session::new(table), resolved.input.to_string(), graph_out)
    .with_inputs(resolved.document.clone(), resolved.visitor.clone(), resolved.sort);
  app.skipped = report.skipped;

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let run_result = run_event_loop(&mut terminal, &mut app, &resolved).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
  resolved: &Resolved,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    let Some(Event::Key(key)) = maybe_event else {
      continue;
    };
    if key.kind != KeyEventKind::Press {
      continue;
    }

    match app.handle_key(key) {
      Action::Continue => {}
      Action::Quit => break,
      Action::Reload => {
        // Show the "reloading" status while the load runs.
        terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;
        match resolved.input.load(resolved.mode).await {
          Ok((table, report)) => app.replace_table(table, report),
          Err(e) => app.error(format!("reload failed: {e:#}")),
        }
      }
    }
  }

  Ok(())
}
