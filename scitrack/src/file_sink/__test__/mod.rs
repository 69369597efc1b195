#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::tempdir;

  use crate::event::{Level, Record};
  use crate::file_sink::{FileSink, OpenMode};

  #[test]
  fn test_open_mode_parsing() {
    assert_eq!("overwrite".parse::<OpenMode>().unwrap(), OpenMode::Overwrite);
    assert_eq!("w".parse::<OpenMode>().unwrap(), OpenMode::Overwrite);
    assert_eq!("Append".parse::<OpenMode>().unwrap(), OpenMode::Append);
    assert_eq!("a".parse::<OpenMode>().unwrap(), OpenMode::Append);
    assert!("rw".parse::<OpenMode>().is_err());
    assert_eq!(OpenMode::default(), OpenMode::Overwrite);
  }

  #[test]
  fn test_overwrite_truncates() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.log");
    fs::write(&path, "stale line\n").unwrap();

    let mut sink = FileSink::open(&path, OpenMode::Overwrite, Level::Debug).unwrap();
    sink
      .handle(&Record::now("host", Level::Info, "misc : fresh"))
      .unwrap();
    sink.close().unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert!(!contents.contains("stale line"));
    assert!(contents.ends_with("\tINFO\tmisc : fresh\n"));
  }

  #[test]
  fn test_append_keeps_existing_lines() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.log");
    fs::write(&path, "first\n").unwrap();

    let mut sink = FileSink::open(&path, OpenMode::Append, Level::Debug).unwrap();
    assert_eq!(sink.mode(), OpenMode::Append);
    sink
      .handle(&Record::now("host", Level::Info, "misc : second"))
      .unwrap();
    sink.close().unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 2);
    assert!(contents.starts_with("first\n"));
  }

  #[test]
  fn test_threshold_filters_lower_levels() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.log");

    let mut sink = FileSink::open(&path, OpenMode::Overwrite, Level::Info).unwrap();
    sink
      .handle(&Record::now("host", Level::Debug, "misc : hidden"))
      .unwrap();
    sink
      .handle(&Record::now("host", Level::Warn, "misc : shown"))
      .unwrap();
    sink.close().unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert!(!contents.contains("hidden"));
    assert!(contents.contains("\tWARN\tmisc : shown"));
  }

  #[test]
  fn test_open_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent").join("run.log");
    let err = FileSink::open(&path, OpenMode::Overwrite, Level::Debug).unwrap_err();
    assert!(err.to_string().contains("absent"));
  }
}
