
use std::io;
use std::path::{Path, PathBuf};

/// Errors raised by the provenance logger and its helpers.
///
/// Nothing here is retried or downgraded to a log line; every variant reaches
/// the caller unchanged.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /// A destination was assigned while the logger already writes to one.
  #[error("logger is already writing to {}", path.display())]
  AlreadyActive { path: PathBuf },

  /// An operation that needs an open destination was called without one.
  #[error("logger has no open destination")]
  NotActive,

  /// `text_data` was called with an empty label.
  #[error("a data label is required")]
  MissingLabel,

  /// `log_args` received something that does not serialise to a name/value map.
  #[error("arguments must serialise to a map of names to values, got {0}")]
  InvalidArgs(String),

  /// A package name that the registry does not know about.
  #[error("unknown package {0}")]
  UnknownPackage(String),

  /// Opening, reading or writing a file failed.
  #[error("{}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error(transparent)]
  Json(#[from] serde_json::Error),

  #[error("invalid configuration: {0}")]
  Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
  /// Wraps an I/O error together with the path it happened on.
  pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
    Error::Io {
      path: path.as_ref().to_path_buf(),
      source,
    }
  }

  /// True for caller mistakes, as opposed to I/O or lookup failures.
  pub fn is_configuration(&self) -> bool {
    matches!(
      self,
      Error::AlreadyActive { .. } | Error::NotActive | Error::MissingLabel | Error::InvalidArgs(_)
    )
  }
}
