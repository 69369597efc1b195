mod __test__;

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::event::{Level, Record};

/// How the destination file is opened on activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenMode {
  /// Truncate any existing file
  #[default]
  Overwrite,
  /// Keep existing content and write after it
  Append,
}

impl OpenMode {
  pub fn as_str(&self) -> &'static str {
    match self {
      OpenMode::Overwrite => "overwrite",
      OpenMode::Append => "append",
    }
  }
}

impl fmt::Display for OpenMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for OpenMode {
  type Err = String;

  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "overwrite" | "w" => Ok(OpenMode::Overwrite),
      "append" | "a" => Ok(OpenMode::Append),
      other => Err(format!("unknown open mode '{}'", other)),
    }
  }
}

/// Line-oriented file output owned by a single logger.
///
/// The sink is never shared: whoever holds it is the only writer, and dropping
/// or closing it releases the file.
pub struct FileSink {
  path: PathBuf,
  mode: OpenMode,
  threshold: Level,
  writer: BufWriter<File>,
}

impl FileSink {
  /// Opens `path` for writing, creating the file if it is missing.
  ///
  /// Parent directories are not created here; that is the caller's decision.
  pub fn open(path: impl AsRef<Path>, mode: OpenMode, threshold: Level) -> Result<Self> {
    let path = path.as_ref();

    let mut options = OpenOptions::new();
    options.create(true);
    match mode {
      OpenMode::Overwrite => options.write(true).truncate(true),
      OpenMode::Append => options.append(true),
    };

    let file = options.open(path).map_err(|e| Error::io(path, e))?;

    Ok(Self {
      path: path.to_path_buf(),
      mode,
      threshold,
      writer: BufWriter::new(file),
    })
  }

  /// Writes one record, unless it is below the sink's threshold.
  pub fn handle(&mut self, record: &Record) -> Result<()> {
    if record.level < self.threshold {
      return Ok(());
    }

    self
      .writer
      .write_all(record.format_line().as_bytes())
      .map_err(|e| Error::io(&self.path, e))
  }

  pub fn flush(&mut self) -> Result<()> {
    self.writer.flush().map_err(|e| Error::io(&self.path, e))
  }

  /// Flushes buffered lines and releases the file handle.
  pub fn close(mut self) -> Result<()> {
    self.flush()?;
    let file = self
      .writer
      .into_inner()
      .map_err(|e| Error::io(&self.path, e.into_error()))?;
    file.sync_all().map_err(|e| Error::io(&self.path, e))
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  pub fn mode(&self) -> OpenMode {
    self.mode
  }
}

impl fmt::Debug for FileSink {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("FileSink")
      .field("path", &self.path)
      .field("mode", &self.mode)
      .field("threshold", &self.threshold)
      .finish()
  }
}
