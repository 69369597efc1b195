#[cfg(test)]
mod tests {
  use std::env;
  use std::ffi::OsString;
  use std::path::{Path, PathBuf};

  use crate::environment::{
    command_line, expand_path, hostname, join_args, platform_details, runtime_version, user_name,
  };

  #[test]
  fn test_probes_are_non_empty() {
    assert!(!platform_details().is_empty());
    assert!(!runtime_version().is_empty());
    assert!(!user_name().is_empty());
    assert!(!hostname().is_empty());
  }

  #[test]
  fn test_command_line_starts_with_program() {
    let program = env::args().next().unwrap();
    assert!(command_line().starts_with(&program));
  }

  #[test]
  fn test_join_args() {
    let args = ["track", "--in", "reads.fasta"].map(OsString::from);
    assert_eq!(join_args(args.into_iter()), "track --in reads.fasta");
    assert_eq!(join_args(std::iter::empty()), "");
  }

  #[cfg(unix)]
  #[test]
  fn test_join_args_non_utf8() {
    use std::os::unix::ffi::OsStringExt;

    let args = vec![
      OsString::from("track"),
      OsString::from_vec(b"reads_\xff.fasta".to_vec()),
    ];
    assert_eq!(join_args(args.into_iter()), "track reads_\u{FFFD}.fasta");
  }

  #[test]
  fn test_expand_relative_path() {
    let expanded = expand_path("logs/run.log").unwrap();
    assert!(expanded.is_absolute());
    assert_eq!(expanded, env::current_dir().unwrap().join("logs/run.log"));
  }

  #[test]
  fn test_expand_folds_dots() {
    let expanded = expand_path("/data/./raw/../clean/run.log").unwrap();
    assert_eq!(expanded, PathBuf::from("/data/clean/run.log"));

    let rooted = expand_path("/../run.log").unwrap();
    assert_eq!(rooted, PathBuf::from("/run.log"));
  }

  #[test]
  fn test_expand_home() {
    if let Some(home) = dirs::home_dir() {
      let expanded = expand_path("~/results/run.log").unwrap();
      assert_eq!(expanded, home.join("results/run.log"));
    }

    // Only a leading `~` component is special
    let literal = expand_path("/tmp/~x").unwrap();
    assert_eq!(literal, Path::new("/tmp/~x"));
  }
}
