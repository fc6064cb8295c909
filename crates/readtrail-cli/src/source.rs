//! Where the event log comes from: a local file or a URL.

use std::{fmt, path::PathBuf, time::{Duration, Instant}};

use anyhow::{Context, Result, anyhow, bail};
use readtrail_core::{EventSource, EventTable, LoadReport};
use readtrail_jsonl::{JsonLinesFile, JsonLinesText, ParseMode};
use reqwest::Client;

/// A dataset location. Loading it again gives a fresh table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
  File(PathBuf),
  Url(String),
}

impl Input {
  /// Exactly one of `file` and `url` must be given.
  pub fn resolve(file: Option<PathBuf>, url: Option<String>) -> Result<Self> {
    match (file, url) {
      (Some(_), Some(_)) => bail!("give either a file or a URL, not both"),
      (Some(path), None) if path.as_os_str().is_empty() => bail!("file path is empty"),
      (Some(path), None) => Ok(Self::File(path)),
      (None, Some(url)) if url.trim().is_empty() => bail!("URL is empty"),
      (None, Some(url)) => Ok(Self::Url(url)),
      (None, None) => bail!("no dataset given; pass --file or --url"),
    }
  }

  /// Read and decode the whole log.
  pub async fn load(&self, mode: ParseMode) -> Result<(EventTable, LoadReport)> {
    let started = Instant::now();
    let (table, report) = match self {
      Self::File(path) => {
        let source = JsonLinesFile::new(path, mode);
        tokio::task::block_in_place(|| load_from(&source))?
      }
      Self::Url(url) => {
        let body = fetch(url).await?;
        load_from(&JsonLinesText::new(url, body, mode))?
      }
    };

    if report.skipped > 0 {
      tracing::warn!(
        source = %self,
        skipped = report.skipped,
        first = report.first_skip.as_deref().unwrap_or_default(),
        "skipped malformed lines"
      );
    }
    tracing::info!(
      source = %self,
      rows = table.len(),
      elapsed = ?started.elapsed(),
      "dataset loaded"
    );
    Ok((table, report))
  }
}

impl fmt::Display for Input {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::File(path) => write!(f, "{}", path.display()),
      Self::Url(url) => f.write_str(url),
    }
  }
}

fn load_from<S: EventSource>(source: &S) -> Result<(EventTable, LoadReport)> {
  source
    .load()
    .with_context(|| format!("failed to load {}", source.describe()))
}

/// `GET url`, returning the body as text.
async fn fetch(url: &str) -> Result<String> {
  let client = Client::builder()
    .timeout(Duration::from_secs(60))
    .build()
    .context("failed to build HTTP client")?;

  let resp = client
    .get(url)
    .send()
    .await
    .with_context(|| format!("GET {url} failed"))?;

  if !resp.status().is_success() {
    return Err(anyhow!("GET {url} → {}", resp.status()));
  }
  resp.text().await.context("reading response body")
}
