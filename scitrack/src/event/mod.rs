
use std::fmt;

use chrono::{Local, NaiveDateTime};

/// Label used when a message is logged without one.
pub const DEFAULT_LABEL: &str = "misc";

/// Separator between a record's label and its message.
pub const LABEL_SEPARATOR: &str = " : ";

/// Timestamp layout of every written line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Defines the severity of a record.
///
/// Levels are ordered from the most detailed to the most severe:
/// `Debug < Info < Warn < Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
  /// Diagnostic detail; the file sink accepts it but provenance records never use it
  Debug,
  /// Every provenance record is written at this level
  Info,
  Warn,
  Error,
}

impl Level {
  /// Upper-case name as written into the log line.
  pub fn as_str(&self) -> &'static str {
    match self {
      Level::Debug => "DEBUG",
      Level::Info => "INFO",
      Level::Warn => "WARN",
      Level::Error => "ERROR",
    }
  }
}

impl fmt::Display for Level {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Builds the `"<label> : <message>"` body shared by every record.
///
/// Both the buffered path and the immediate path go through this function, so a
/// record looks the same whether it was written before or after activation.
///
/// # Example
///
/// ```rust
/// use scitrack::event::format_body;
///
/// assert_eq!(format_body(Some("params"), "{}"), "params : {}");
/// assert_eq!(format_body(None, 42), "misc : 42");
/// ```
pub fn format_body(label: Option<&str>, message: impl fmt::Display) -> String {
  let label = match label {
    Some(l) if !l.is_empty() => l,
    _ => DEFAULT_LABEL,
  };
  format!("{}{}{}", label, LABEL_SEPARATOR, message)
}

/// One line of a provenance log.
///
/// A record carries the wall-clock time it was written, the host and process that
/// wrote it, its severity and the already formatted `label : message` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
  /// Local time at which the record was written.
  pub timestamp: NaiveDateTime,

  /// Host name of the machine that produced the record.
  pub host: String,

  /// Process ID of the writer.
  pub pid: u32,

  /// Severity of the record.
  pub level: Level,

  /// The `label : message` body.
  pub body: String,
}

impl Record {
  /// Creates a record stamped with the current local time and process ID.
  ///
  /// # Example
  ///
  /// ```rust
  /// use scitrack::event::{Level, Record};
  ///
  /// let record = Record::now("node-7", Level::Info, "misc : hello");
  /// assert_eq!(record.pid, std::process::id());
  /// assert!(record.format_line().ends_with("\tINFO\tmisc : hello\n"));
  /// ```
  pub fn now(host: impl Into<String>, level: Level, body: impl Into<String>) -> Self {
    Self {
      timestamp: Local::now().naive_local(),
      host: host.into(),
      pid: std::process::id(),
      level,
      body: body.into(),
    }
  }

  /// Renders the record as a newline-terminated, tab-separated line:
  /// `<timestamp>\t<host>:<pid>\t<LEVEL>\t<body>\n`.
  pub fn format_line(&self) -> String {
    format!("{}\n", self)
  }
}

impl fmt::Display for Record {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{}\t{}:{}\t{}\t{}",
      self.timestamp.format(TIMESTAMP_FORMAT),
      self.host,
      self.pid,
      self.level,
      self.body
    )
  }
}
