use std::env;
use std::process::Command;

/// Records the compiler version so the run header can report which toolchain built the binary.
fn main() {
  let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());

  let version = Command::new(rustc)
    .arg("--version")
    .output()
    .ok()
    .filter(|out| out.status.success())
    .and_then(|out| String::from_utf8(out.stdout).ok())
    .map(|s| s.trim().to_string())
    .filter(|s| !s.is_empty())
    .unwrap_or_else(|| "unknown".to_string());

  println!("cargo:rustc-env=SCITRACK_RUSTC_VERSION={}", version);
  println!("cargo:rerun-if-env-changed=RUSTC");
  println!("cargo:rerun-if-changed=build.rs");
}
