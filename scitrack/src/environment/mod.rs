//! Facts about the running process that go into the header of every log:
//! platform, toolchain, user, command line and host.

mod __test__;

use std::env;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use sysinfo::System;

use crate::error::{Error, Result};

/// Environment variables consulted, in order, for the invoking user's name.
pub const USER_ENV_VARS: [&str; 4] = ["LOGNAME", "USER", "LNAME", "USERNAME"];

const UNKNOWN: &str = "unknown";

/// Describes the operating system, kernel and CPU architecture.
pub fn platform_details() -> String {
  let os = System::long_os_version().unwrap_or_else(|| env::consts::OS.to_string());
  let arch = env::consts::ARCH;

  match System::kernel_version() {
    Some(kernel) => format!("{} (kernel {}) {}", os, kernel, arch),
    None => format!("{} {}", os, arch),
  }
}

/// Version of the compiler that built this crate.
pub fn runtime_version() -> &'static str {
  env!("SCITRACK_RUSTC_VERSION")
}

/// Name of the invoking user, taken from the login environment.
pub fn user_name() -> String {
  USER_ENV_VARS
    .iter()
    .filter_map(|key| env::var(key).ok())
    .find(|value| !value.is_empty())
    .unwrap_or_else(|| UNKNOWN.to_string())
}

/// The full command line of this process, space-joined.
pub fn command_line() -> String {
  join_args(env::args_os())
}

/// Space-joins arguments; bytes that are not valid UTF-8 become U+FFFD.
pub(crate) fn join_args(args: impl Iterator<Item = OsString>) -> String {
  args
    .map(|arg| arg.to_string_lossy().into_owned())
    .collect::<Vec<_>>()
    .join(" ")
}

pub fn hostname() -> String {
  gethostname::gethostname().to_string_lossy().into_owned()
}

/// Expands a leading `~` and makes `path` absolute.
///
/// Normalisation is purely lexical: `.` and `..` are folded, symlinks are left
/// alone, and the path does not have to exist.
pub fn expand_path(path: impl AsRef<Path>) -> Result<PathBuf> {
  let path = path.as_ref();

  let expanded = match path.strip_prefix("~") {
    Ok(rest) => match dirs::home_dir() {
      Some(home) => home.join(rest),
      None => path.to_path_buf(),
    },
    Err(_) => path.to_path_buf(),
  };

  let absolute = if expanded.is_absolute() {
    expanded
  } else {
    let cwd = env::current_dir().map_err(|e| Error::io(path, e))?;
    cwd.join(expanded)
  };

  Ok(normalize(&absolute))
}

fn normalize(path: &Path) -> PathBuf {
  let mut out = PathBuf::new();
  for component in path.components() {
    match component {
      Component::CurDir => {},
      Component::ParentDir => {
        // `..` at the root stays at the root
        out.pop();
      },
      other => out.push(other.as_os_str()),
    }
  }
  out
}
