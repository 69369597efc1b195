//! # Deferred logger
//!
//! [`DeferredLogger`] records provenance for a computation run: which files went
//! in and came out (with checksums), digests of in-memory data, the parameters
//! used and the versions of the software involved.
//!
//! Records can be made before the log destination is known. Until then they are
//! held in a [`MessageCache`]; assigning a destination (activation) opens the
//! file, writes a short environment header and replays the cache in call order.
//! From then on every record is written as soon as it is made.
//!
//! ## Lifecycle
//!
//! ```text
//! new ──record*──▶ set_log_file_path ──record*──▶ shutdown ──▶ (reusable)
//!      (cached)      (header + replay)  (written)
//! ```
//!
//! Each logger owns its file exclusively. There is no process-wide sink, so two
//! active loggers never see each other's records unless they are pointed at the
//! same path, in which case the operating system's append semantics apply and
//! no locking is performed.
//!
//! ## Line format
//!
//! ```text
//! 2024-03-09 07:05:01	node-7:4242	INFO	input_file_path : /data/sample.fasta
//! ```


use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use tracing::{debug, warn};

use crate::buffer::MessageCache;
use crate::checksum::{file_hexdigest, text_hexdigest, TextData};
use crate::config::LoggerConfig;
use crate::environment;
use crate::error::{Error, Result};
use crate::event::{format_body, Level, Record};
use crate::file_sink::{FileSink, OpenMode};
use crate::version::{version_for_package, Package, PackageRef, PackageRegistry};

/// Key of the marker object a logger serialises to.
pub const LOGGER_MARKER: &str = "$deferred_logger";

pub const INPUT_FILE_LABEL: &str = "input_file_path";
pub const OUTPUT_FILE_LABEL: &str = "output_file_path";
pub const PARAMS_LABEL: &str = "params";
pub const VERSION_LABEL: &str = "version";

/// Rendered in place of a version that could not be determined.
const UNKNOWN_VERSION: &str = "unknown";

/// Caches provenance records until a log file is assigned, then writes them.
#[derive(Debug)]
pub struct DeferredLogger {
  log_file_path: Option<PathBuf>,
  create_dir: bool,
  mode: OpenMode,
  cache: MessageCache,
  sink: Option<FileSink>,
  hostname: String,
}

impl DeferredLogger {
  /// Creates an inactive logger with default settings.
  pub fn new() -> Self {
    Self {
      log_file_path: None,
      create_dir: true,
      mode: OpenMode::default(),
      cache: MessageCache::new(),
      sink: None,
      hostname: environment::hostname(),
    }
  }

  /// Creates a logger from `config`, activating it right away when the
  /// configuration names a destination.
  pub fn with_config(config: LoggerConfig) -> Result<Self> {
    let mut logger = Self::new();
    logger.create_dir = config.create_dir;
    logger.mode = config.mode;

    if let Some(path) = config.log_file_path {
      logger.set_log_file_path(path)?;
    }
    Ok(logger)
  }

  /// Creates a logger that writes to `path` immediately.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let mut logger = Self::new();
    logger.set_log_file_path(path)?;
    Ok(logger)
  }

  /// Absolute path of the destination, once assigned.
  pub fn log_file_path(&self) -> Option<&Path> {
    self.log_file_path.as_deref()
  }

  pub fn mode(&self) -> OpenMode {
    self.mode
  }

  /// Changes how the destination is opened. Takes effect on the next activation.
  pub fn set_mode(&mut self, mode: OpenMode) {
    self.mode = mode;
  }

  pub fn create_dir(&self) -> bool {
    self.create_dir
  }

  pub fn set_create_dir(&mut self, create_dir: bool) {
    self.create_dir = create_dir;
  }

  pub fn is_active(&self) -> bool {
    self.sink.is_some()
  }

  /// Number of records waiting for a destination.
  pub fn pending(&self) -> usize {
    self.cache.len()
  }

  pub fn hostname(&self) -> &str {
    &self.hostname
  }

  /// Assigns the destination and activates the logger.
  ///
  /// The path is `~`-expanded and made absolute, its parent directory is created
  /// when `create_dir` is set, and the file is opened according to `mode`. The
  /// environment header is written first, then every cached record in the order
  /// it was made.
  ///
  /// # Errors
  ///
  /// [`Error::AlreadyActive`] if a destination is already open; the open file
  /// is left untouched. [`Error::Io`] if the directory or file cannot be
  /// created, in which case cached records are kept.
  pub fn set_log_file_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
    if let Some(sink) = &self.sink {
      return Err(Error::AlreadyActive {
        path: sink.path().to_path_buf(),
      });
    }

    let path = environment::expand_path(path)?;
    if self.create_dir {
      if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
      }
    }

    let mut sink = FileSink::open(&path, self.mode, Level::Debug)?;

    let pending = self.cache.drain_all();
    if let Err(e) = write_preamble(&mut sink, &self.hostname, &pending) {
      for body in pending {
        self.cache.push(body);
      }
      return Err(e);
    }

    debug!(
      path = %path.display(),
      mode = %self.mode,
      replayed = pending.len(),
      "provenance log opened"
    );

    self.sink = Some(sink);
    self.log_file_path = Some(path);
    Ok(())
  }

  /// Records a free-form message as `"<label> : <message>"`.
  ///
  /// The label defaults to `misc`. Any [`Display`](fmt::Display) value is accepted.
  pub fn log_message(&mut self, message: impl fmt::Display, label: Option<&str>) -> Result<()> {
    self.emit(format_body(label, message))
  }

  /// Records the absolute path and MD5 of an input file.
  ///
  /// Two records are made: `<label> : <path>` and `<label> md5sum : <digest>`,
  /// with the label defaulting to `input_file_path`.
  pub fn input_file(&mut self, path: impl AsRef<Path>, label: Option<&str>) -> Result<()> {
    self.record_file(label.unwrap_or(INPUT_FILE_LABEL), path.as_ref())
  }

  /// Same as [`input_file`](Self::input_file) with `output_file_path` as the default label.
  pub fn output_file(&mut self, path: impl AsRef<Path>, label: Option<&str>) -> Result<()> {
    self.record_file(label.unwrap_or(OUTPUT_FILE_LABEL), path.as_ref())
  }

  /// Records the MD5 of in-memory data under `label`.
  ///
  /// The digest is only meaningful if the data is produced in a stable order.
  ///
  /// # Errors
  ///
  /// [`Error::MissingLabel`] when `label` is empty.
  pub fn text_data<'a>(&mut self, data: impl Into<TextData<'a>>, label: &str) -> Result<()> {
    if label.is_empty() {
      return Err(Error::MissingLabel);
    }
    let md5sum = text_hexdigest(data);
    self.emit(format_body(Some(label), md5sum))
  }

  /// Records run parameters as a `params` line holding a compact JSON object.
  ///
  /// `args` must serialise to a map (a struct, a `HashMap`, a `json!({..})`
  /// object...). Entries whose value is a serialised `DeferredLogger` are
  /// dropped. That is any object whose only key is `$deferred_logger` and whose
  /// value is a string or null, so the key is reserved in that shape.
  ///
  /// # Errors
  ///
  /// [`Error::InvalidArgs`] when `args` does not serialise to a map.
  pub fn log_args<T: Serialize + ?Sized>(&mut self, args: &T) -> Result<()> {
    let mut map = match serde_json::to_value(args)? {
      Value::Object(map) => map,
      other => return Err(Error::InvalidArgs(json_kind(&other).to_string())),
    };

    map.retain(|_, value| !is_logger_marker(value));
    self.emit(format_body(Some(PARAMS_LABEL), Value::Object(map)))
  }

  /// Records `version : <name>==<version>` for the caller's own package, then
  /// for each of `packages` in order.
  ///
  /// The caller is looked up in `registry` by name first; if the registry does
  /// not know it, the version fields of `caller` itself are used. Pass
  /// [`current_package!()`](crate::current_package) to describe the calling crate.
  ///
  /// Versions that cannot be determined are written as `unknown`. Every lookup
  /// happens before anything is recorded, so an unknown package name records
  /// nothing.
  ///
  /// # Errors
  ///
  /// [`Error::UnknownPackage`] when a name in `packages` is not in `registry`.
  pub fn log_versions(
    &mut self,
    registry: &PackageRegistry,
    caller: &Package,
    packages: &[PackageRef<'_>],
  ) -> Result<()> {
    let caller_version = match registry.get(caller.name()) {
      Some(registered) => registered.version(),
      None => caller.version(),
    };

    let mut versions = vec![(caller.name().to_string(), caller_version)];
    for package in packages {
      let version = version_for_package(registry, *package)?;
      versions.push((package.name().to_string(), version));
    }

    for (name, version) in versions {
      let version = version.as_deref().unwrap_or(UNKNOWN_VERSION);
      self.emit(format_body(
        Some(VERSION_LABEL),
        format_args!("{}=={}", name, version),
      ))?;
    }
    Ok(())
  }

  /// Flushes and closes the destination and returns the logger to its initial
  /// state: no destination, empty cache, `Overwrite` mode.
  ///
  /// # Errors
  ///
  /// [`Error::NotActive`] when no destination is open. If closing the file fails
  /// the logger is still reset and the error is returned.
  pub fn shutdown(&mut self) -> Result<()> {
    let sink = self.sink.take().ok_or(Error::NotActive)?;
    let path = sink.path().to_path_buf();
    let closed = sink.close();

    self.reset();
    debug!(path = %path.display(), "provenance log closed");
    closed
  }

  fn reset(&mut self) {
    self.log_file_path = None;
    self.mode = OpenMode::Overwrite;
    self.cache.clear();
    self.sink = None;
  }

  fn record_file(&mut self, label: &str, path: &Path) -> Result<()> {
    let path = environment::expand_path(path)?;
    let md5sum = file_hexdigest(&path)?;

    let md5_label = format!("{} md5sum", label);
    self.emit(format_body(Some(label), path.display()))?;
    self.emit(format_body(Some(md5_label.as_str()), md5sum))
  }

  /// Writes a body now when active, otherwise caches it.
  fn emit(&mut self, body: String) -> Result<()> {
    match self.sink.as_mut() {
      Some(sink) => {
        sink.handle(&Record::now(&self.hostname, Level::Info, body))?;
        sink.flush()
      },
      None => {
        self.cache.push(body);
        Ok(())
      },
    }
  }
}

impl Default for DeferredLogger {
  fn default() -> Self {
    Self::new()
  }
}

impl Drop for DeferredLogger {
  fn drop(&mut self) {
    if let Some(sink) = self.sink.as_mut() {
      if let Err(e) = sink.flush() {
        warn!(error = %e, "failed to flush provenance log on drop");
      }
    }
  }
}

/// A logger serialises to `{"$deferred_logger": <path or null>}` so that
/// [`DeferredLogger::log_args`] can recognise and drop it.
impl Serialize for DeferredLogger {
  fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    let path = self
      .log_file_path
      .as_ref()
      .map(|p| p.to_string_lossy().into_owned());

    let mut map = serializer.serialize_map(Some(1))?;
    map.serialize_entry(LOGGER_MARKER, &path)?;
    map.end()
  }
}

/// Writes the environment header followed by `pending`, then flushes.
fn write_preamble(sink: &mut FileSink, hostname: &str, pending: &[String]) -> Result<()> {
  let bodies = environment_header()
    .into_iter()
    .chain(pending.iter().cloned());
  for body in bodies {
    sink.handle(&Record::now(hostname, Level::Info, body))?;
  }
  sink.flush()
}

/// The four lines written at the top of every activation.
fn environment_header() -> [String; 4] {
  [
    format_body(
      Some("system_details"),
      format_args!("system={}", environment::platform_details()),
    ),
    format_body(Some("rust"), environment::runtime_version()),
    format_body(Some("user"), environment::user_name()),
    format_body(Some("command_string"), environment::command_line()),
  ]
}

/// Matches exactly what `impl Serialize for DeferredLogger` produces.
fn is_logger_marker(value: &Value) -> bool {
  let Some(obj) = value.as_object() else {
    return false;
  };
  obj.len() == 1
    && obj
      .get(LOGGER_MARKER)
      .map_or(false, |path| path.is_string() || path.is_null())
}

fn json_kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "an array",
    Value::Object(_) => "an object",
  }
}
