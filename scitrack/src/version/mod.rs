//! Version lookup for the running program and the packages it depends on.
//!
//! A [`Package`] is a handle exposing named version fields. Resolution looks
//! for the first field listed in [`VERSION_ATTRS`] and then reduces its value
//! with a fixed sequence of probes: call it if it is a function, take the first
//! element if it is a sequence.


use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Field names that may hold a version, highest priority first.
pub const VERSION_ATTRS: [&str; 3] = ["CARGO_PKG_VERSION", "version", "VERSION"];

/// Builds a [`Package`] describing the crate in which the macro is expanded.
///
/// ```rust
/// let package = scitrack::current_package!();
/// assert_eq!(package.name(), env!("CARGO_PKG_NAME"));
/// ```
#[macro_export]
macro_rules! current_package {
  () => {
    $crate::version::Package::new(env!("CARGO_PKG_NAME")).with_attr(
      "CARGO_PKG_VERSION",
      $crate::version::VersionValue::Text(env!("CARGO_PKG_VERSION").to_string()),
    )
  };
}

/// A value stored in a package's version field.
#[derive(Clone)]
pub enum VersionValue {
  Text(String),
  /// Only the first element counts
  Sequence(Vec<VersionValue>),
  /// Invoked without arguments to obtain the version
  Call(fn() -> VersionValue),
}

impl fmt::Debug for VersionValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      VersionValue::Text(s) => f.debug_tuple("Text").field(s).finish(),
      VersionValue::Sequence(items) => f.debug_tuple("Sequence").field(items).finish(),
      VersionValue::Call(_) => f.write_str("Call(..)"),
    }
  }
}

impl From<&str> for VersionValue {
  fn from(s: &str) -> Self {
    VersionValue::Text(s.to_string())
  }
}

impl From<String> for VersionValue {
  fn from(s: String) -> Self {
    VersionValue::Text(s)
  }
}

/// A named package and the version fields it exposes.
#[derive(Debug, Clone)]
pub struct Package {
  name: String,
  attrs: BTreeMap<String, VersionValue>,
}

impl Package {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      attrs: BTreeMap::new(),
    }
  }

  pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<VersionValue>) -> Self {
    self.attrs.insert(name.into(), value.into());
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn attr(&self, name: &str) -> Option<&VersionValue> {
    self.attrs.get(name)
  }

  /// Resolves this package's version, or `None` if it exposes none.
  pub fn version(&self) -> Option<String> {
    let value = VERSION_ATTRS.iter().find_map(|attr| self.attr(attr))?;
    reduce(value.clone())
  }
}

/// One step in turning a version field into a version string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
  CallIfCallable,
  FirstOfSequence,
}

const PROBES: [Probe; 2] = [Probe::CallIfCallable, Probe::FirstOfSequence];

impl Probe {
  fn apply(self, value: VersionValue) -> Option<VersionValue> {
    match (self, value) {
      (Probe::CallIfCallable, VersionValue::Call(f)) => Some(f()),
      (Probe::FirstOfSequence, VersionValue::Sequence(items)) => items.into_iter().next(),
      (_, other) => Some(other),
    }
  }
}

fn reduce(value: VersionValue) -> Option<String> {
  let reduced = PROBES
    .iter()
    .try_fold(value, |value, probe| probe.apply(value))?;

  match reduced {
    VersionValue::Text(s) => Some(s),
    VersionValue::Sequence(_) | VersionValue::Call(_) => None,
  }
}

/// Identifies a package either by name or by handle.
#[derive(Debug, Clone, Copy)]
pub enum PackageRef<'a> {
  Name(&'a str),
  Handle(&'a Package),
}

impl<'a> PackageRef<'a> {
  /// The name under which the package is reported.
  pub fn name(&self) -> &'a str {
    match *self {
      PackageRef::Name(name) => name,
      PackageRef::Handle(package) => package.name(),
    }
  }
}

impl<'a> From<&'a str> for PackageRef<'a> {
  fn from(name: &'a str) -> Self {
    PackageRef::Name(name)
  }
}

impl<'a> From<&'a String> for PackageRef<'a> {
  fn from(name: &'a String) -> Self {
    PackageRef::Name(name.as_str())
  }
}

impl<'a> From<&'a Package> for PackageRef<'a> {
  fn from(package: &'a Package) -> Self {
    PackageRef::Handle(package)
  }
}

/// The packages that can be looked up by name.
#[derive(Debug, Clone, Default)]
pub struct PackageRegistry {
  packages: BTreeMap<String, Package>,
}

#[derive(Deserialize)]
struct Lockfile {
  #[serde(default)]
  package: Vec<LockedPackage>,
}

#[derive(Deserialize)]
struct LockedPackage {
  name: String,
  version: String,
}

impl PackageRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds or replaces a package, keyed by its name.
  pub fn register(&mut self, package: Package) {
    self.packages.insert(package.name().to_string(), package);
  }

  pub fn with_package(mut self, package: Package) -> Self {
    self.register(package);
    self
  }

  pub fn get(&self, name: &str) -> Option<&Package> {
    self.packages.get(name)
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.packages.keys().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.packages.len()
  }

  pub fn is_empty(&self) -> bool {
    self.packages.is_empty()
  }

  /// Loads every package pinned in a `Cargo.lock`.
  pub fn from_lockfile(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Self::from_lockfile_str(&text)
  }

  /// Parses `Cargo.lock` content. When a crate is locked at several versions
  /// the last entry wins.
  pub fn from_lockfile_str(text: &str) -> Result<Self> {
    let lockfile: Lockfile = toml::from_str(text)?;

    let mut registry = Self::new();
    for locked in lockfile.package {
      registry.register(Package::new(locked.name).with_attr("version", locked.version));
    }
    Ok(registry)
  }
}

/// Resolves the version of a package.
///
/// Unknown names are an error; a known package without any version field
/// resolves to `Ok(None)`.
pub fn version_for_package(
  registry: &PackageRegistry,
  package: PackageRef<'_>,
) -> Result<Option<String>> {
  let package = match package {
    PackageRef::Name(name) => registry
      .get(name)
      .ok_or_else(|| Error::UnknownPackage(name.to_string()))?,
    PackageRef::Handle(package) => package,
  };

  Ok(package.version())
}

/// Top-level crate of a `::`-separated module path, as given by `module_path!()`.
///
/// ```rust
/// assert_eq!(scitrack::package_name("scitrack::logger"), "scitrack");
/// assert_eq!(scitrack::package_name("scitrack"), "scitrack");
/// ```
pub fn package_name(module_path: &str) -> &str {
  module_path.split("::").next().unwrap_or(module_path)
}
