//! # scitrack
//!
//! Provenance tracking for scientific computation runs.
//!
//! The crate centres on [`DeferredLogger`], which collects provenance records
//! (input/output files with their checksums, text digests, run parameters and
//! package versions) before the destination log file is known, then writes them
//! out as timestamped, host-tagged lines once a path is assigned.
//!
//! ```rust,no_run
//! use scitrack::{current_package, DeferredLogger, PackageRegistry};
//!
//! # fn main() -> scitrack::Result<()> {
//! let mut logger = DeferredLogger::new();
//! logger.input_file("data/sample.fasta", None)?;
//! logger.log_versions(&PackageRegistry::new(), &current_package!(), &[])?;
//!
//! // Buffered records are written once the destination is known.
//! logger.set_log_file_path("results/run.log")?;
//! logger.log_message("alignment finished", None)?;
//! logger.shutdown()?;
//! # Ok(())
//! # }
//! ```

pub mod buffer;
pub mod checksum;
pub mod config;
pub mod environment;
pub mod error;
pub mod event;
pub mod file_sink;
pub mod logger;
pub mod version;

pub use checksum::{file_hexdigest, text_hexdigest, TextData};
pub use config::LoggerConfig;
pub use error::{Error, Result};
pub use event::{Level, Record};
pub use file_sink::{FileSink, OpenMode};
pub use logger::DeferredLogger;
pub use version::{
  package_name, version_for_package, Package, PackageRef, PackageRegistry, VersionValue,
  VERSION_ATTRS,
};
