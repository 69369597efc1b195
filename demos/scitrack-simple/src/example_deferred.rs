use std::env;
use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use scitrack::{current_package, DeferredLogger, OpenMode, PackageRef, PackageRegistry};

#[derive(Serialize)]
struct RunParams<'a> {
  window: usize,
  threshold: f64,
  alphabet: &'a str,
}

/// Records inputs and parameters before the output location is decided.
pub fn example_deferred() -> scitrack::Result<()> {
  println!("\n--- Deferred destination ---");

  let work = env::temp_dir().join("scitrack-demo");
  let input = work.join("reads.fasta");
  let output = work.join("counts.tsv");
  fs::create_dir_all(&work).map_err(|e| scitrack::Error::io(&work, e))?;
  fs::write(&input, ">read1\nACGTTGCA\n>read2\nGGCCAATT\n")
    .map_err(|e| scitrack::Error::io(&input, e))?;

  let mut logger = DeferredLogger::new();
  let params = RunParams {
    window: 4,
    threshold: 0.25,
    alphabet: "ACGT",
  };
  logger.log_args(&params)?;
  logger.input_file(&input, None)?;
  println!("{} records cached before a destination exists", logger.pending());

  // The destination is only known once the run has produced its results
  count_bases(&input, &output)?;
  logger.set_mode(OpenMode::Append);
  logger.set_log_file_path(work.join("deferred.log"))?;
  logger.output_file(&output, None)?;

  // Cargo.lock of the workspace, when run from a checkout
  let registry = match PackageRegistry::from_lockfile("Cargo.lock") {
    Ok(registry) => registry,
    Err(_) => PackageRegistry::new(),
  };
  let wanted: Vec<PackageRef<'_>> = ["serde", "md-5"]
    .into_iter()
    .filter(|name| registry.get(name).is_some())
    .map(Into::into)
    .collect();
  logger.log_versions(&registry, &current_package!(), &wanted)?;

  if let Some(path) = logger.log_file_path() {
    info!(path = %path.display(), "appended provenance");
  }
  logger.shutdown()
}

fn count_bases(input: &Path, output: &Path) -> scitrack::Result<()> {
  let text = fs::read_to_string(input).map_err(|e| scitrack::Error::io(input, e))?;
  let mut counts = [0usize; 4];
  for line in text.lines().filter(|l| !l.starts_with('>')) {
    for base in line.bytes() {
      match base {
        b'A' => counts[0] += 1,
        b'C' => counts[1] += 1,
        b'G' => counts[2] += 1,
        b'T' => counts[3] += 1,
        _ => {},
      }
    }
  }

  let table = format!(
    "A\t{}\nC\t{}\nG\t{}\nT\t{}\n",
    counts[0], counts[1], counts[2], counts[3]
  );
  fs::write(output, table).map_err(|e| scitrack::Error::io(output, e))
}
