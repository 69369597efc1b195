
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::file_sink::OpenMode;

/// Settings for a [`DeferredLogger`](crate::DeferredLogger).
///
/// Every field has a default, so an empty TOML table is a valid configuration:
///
/// ```toml
/// log_file_path = "results/run.log"   # optional, activates immediately
/// create_dir = true                   # create missing parent directories
/// mode = "append"                     # or "overwrite"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
  /// Destination of the log. When set, the logger opens it on construction.
  #[serde(default)]
  pub log_file_path: Option<PathBuf>,

  /// Whether missing parent directories of the destination are created.
  #[serde(default = "default_true")]
  pub create_dir: bool,

  /// How the destination is opened.
  #[serde(default)]
  pub mode: OpenMode,
}

fn default_true() -> bool {
  true
}

impl Default for LoggerConfig {
  fn default() -> Self {
    LoggerConfig {
      log_file_path: None,
      create_dir: default_true(),
      mode: OpenMode::default(),
    }
  }
}

impl LoggerConfig {
  pub fn with_log_file_path(mut self, path: impl Into<PathBuf>) -> Self {
    self.log_file_path = Some(path.into());
    self
  }

  pub fn with_create_dir(mut self, create_dir: bool) -> Self {
    self.create_dir = create_dir;
    self
  }

  pub fn with_mode(mut self, mode: OpenMode) -> Self {
    self.mode = mode;
    self
  }

  /// Parses a configuration from TOML text.
  pub fn from_toml_str(text: &str) -> Result<Self> {
    Ok(toml::from_str(text)?)
  }

  /// Reads and parses a TOML configuration file.
  pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Self::from_toml_str(&text)
  }
}
