mod example_deferred;
mod example_simple;

use tracing_subscriber::EnvFilter;

use crate::{example_deferred::example_deferred, example_simple::example_simple};

fn main() {
  // RUST_LOG=scitrack=debug shows when logs are opened and closed
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  println!("scitrack Examples");
  println!("=================");

  if let Err(e) = example_simple() {
    eprintln!("simple example failed: {}", e);
  }
  if let Err(e) = example_deferred() {
    eprintln!("deferred example failed: {}", e);
  }
}
