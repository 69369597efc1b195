use std::env;
use std::fs;

use tracing::info;

use scitrack::{current_package, DeferredLogger, LoggerConfig, PackageRegistry};

/// Opens the log straight away, taking settings from `scitrack.toml` if present.
pub fn example_simple() -> scitrack::Result<()> {
  println!("\n--- Quick start ---");

  let config = match fs::metadata("scitrack.toml") {
    Ok(_) => LoggerConfig::from_file("scitrack.toml")?,
    Err(_) => LoggerConfig::default(),
  };
  let log_path = config
    .log_file_path
    .clone()
    .unwrap_or_else(|| env::temp_dir().join("scitrack-demo").join("simple.log"));

  let mut logger = DeferredLogger::with_config(config.with_log_file_path(&log_path))?;
  info!(path = %log_path.display(), "logging provenance");

  logger.log_message("quick start example", None)?;
  logger.text_data("ACGTACGTAC\n", "reference_sequence")?;
  logger.log_versions(&PackageRegistry::new(), &current_package!(), &[])?;
  logger.shutdown()?;

  println!("Done! Inspect {}", log_path.display());
  Ok(())
}
