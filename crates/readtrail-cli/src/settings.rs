//! Layered settings: an optional config file, then `READTRAIL_*` environment
//! variables. Command-line flags are applied on top by `main`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use readtrail_analytics::SortPolicy;
use serde::Deserialize;

/// Name searched for in the working directory when no `--config` is given
/// (`readtrail.toml`, `readtrail.json`, …).
const DEFAULT_CONFIG_NAME: &str = "readtrail";

/// File the TUI writes the also-likes graph to when nothing else is set.
pub const DEFAULT_GRAPH_OUT: &str = "also_likes.dot";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
  pub file:      Option<PathBuf>,
  pub url:       Option<String>,
  pub document:  Option<String>,
  pub visitor:   Option<String>,
  pub sort:      SortPolicy,
  pub strict:    bool,
  pub graph_out: Option<PathBuf>,
}

impl Settings {
  /// Load settings. An explicit `path` must exist; the default file is
  /// optional.
  pub fn load(path: Option<&Path>) -> Result<Self> {
    let file = match path {
      Some(path) => config::File::from(path).required(true),
      None => config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
    };

    config::Config::builder()
      .add_source(file)
      .add_source(config::Environment::with_prefix("READTRAIL").try_parsing(true))
      .build()
      .context("failed to read config")?
      .try_deserialize()
      .context("invalid config")
  }
}
