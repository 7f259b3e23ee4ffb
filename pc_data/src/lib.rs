//! The resource table format. The table itself is produced by an external
//! generator (one entry per game concept, with the protocol ranges each wire
//! identifier is valid for). This crate only knows how to read it. Checking
//! that the ranges make sense is done when the table is turned into a
//! resolver, in `pc_registry`.

#[macro_use]
extern crate log;

use serde::Deserialize;
use std::{
  fmt,
  fs::File,
  io,
  io::BufReader,
  path::{Path, PathBuf},
};


/// The table compiled into this crate. This only has a small set of blocks,
/// which is enough to run a server with, and for tests.
pub const BUNDLED: &str = include_str!("../data/blocks.json");

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableDef {
  pub concepts: Vec<ConceptDef>,
}

/// A single concept in the table. The order of concepts in the file is kept,
/// and is the order returned when listing all concepts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConceptDef {
  /// The name of the concept. This is normally the generator's enum constant
  /// (like `SHORT_GRASS`), but any casing is accepted.
  pub name:     String,
  pub bindings: Vec<BindingDef>,
}

/// A binding is either a single identifier, or a set of identifiers which are
/// all sent for the same range. Exactly one of `resource` or `resources` must
/// be present.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum BindingDef {
  Single(SingleDef),
  Multi(MultiDef),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SingleDef {
  pub resource: String,
  pub min:      Bound,
  pub max:      Bound,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MultiDef {
  pub resources: Vec<String>,
  pub min:       Bound,
  pub max:       Bound,
}

/// One end of a protocol range. Generated tables use protocol numbers, but
/// hand written ones can use a release name, like `"1.20.4"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Bound {
  Protocol(u32),
  Name(String),
}

impl BindingDef {
  pub fn min(&self) -> &Bound {
    match self {
      Self::Single(s) => &s.min,
      Self::Multi(m) => &m.min,
    }
  }
  pub fn max(&self) -> &Bound {
    match self {
      Self::Single(s) => &s.max,
      Self::Multi(m) => &m.max,
    }
  }
}

impl fmt::Display for Bound {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Self::Protocol(v) => write!(f, "{v}"),
      Self::Name(name) => write!(f, "`{name}`"),
    }
  }
}

#[derive(Debug)]
pub enum LoadError {
  IO(PathBuf, io::Error),
  Json(serde_json::Error),
}

impl fmt::Display for LoadError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Self::IO(path, e) => write!(f, "cannot read table at {}: {e}", path.display()),
      Self::Json(e) => write!(f, "invalid table: {e}"),
    }
  }
}

impl std::error::Error for LoadError {}

impl From<serde_json::Error> for LoadError {
  fn from(e: serde_json::Error) -> Self { LoadError::Json(e) }
}

/// Where a table comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
  /// The [`BUNDLED`] table.
  Bundled,
  /// A json file on disk.
  Local(PathBuf),
}

impl Source {
  pub fn load(&self) -> Result<TableDef, LoadError> {
    match self {
      Self::Bundled => {
        debug!("using bundled table");
        TableDef::from_json(BUNDLED)
      }
      Self::Local(path) => TableDef::load(path),
    }
  }
}

impl fmt::Display for Source {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Self::Bundled => write!(f, "bundled table"),
      Self::Local(path) => write!(f, "{}", path.display()),
    }
  }
}

impl TableDef {
  pub fn from_json(src: &str) -> Result<Self, LoadError> { Ok(serde_json::from_str(src)?) }

  pub fn from_reader(r: impl io::Read) -> Result<Self, LoadError> {
    Ok(serde_json::from_reader(r)?)
  }

  /// Reads the table at the given path.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
    let path = path.as_ref();
    info!("loading table from {}", path.display());
    let f = File::open(path).map_err(|e| LoadError::IO(path.into(), e))?;
    Self::from_reader(BufReader::new(f))
  }

  /// Returns the total number of bindings across all concepts.
  pub fn binding_count(&self) -> usize { self.concepts.iter().map(|c| c.bindings.len()).sum() }
}
