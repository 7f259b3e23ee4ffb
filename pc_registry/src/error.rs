use crate::range::VersionRange;
use pc_data::{Bound, LoadError};
use std::fmt;

/// A problem with the table. Any of these mean the generated table is broken,
/// so the resolver cannot be built at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
  /// The name is empty, or has characters other than letters, digits and `_`.
  InvalidConceptName(String),
  /// Two concepts have the same (canonical) name.
  DuplicateConcept(String),
  /// A concept has no bindings at all.
  NoBindings { concept: String },
  /// A binding has `min > max`.
  InvertedRange { concept: String, min: u32, max: u32 },
  /// A bound was a release name that isn't known.
  UnknownVersion { concept: String, bound: Bound },
  /// Two bindings of one concept have the exact same range.
  DuplicateRange { concept: String, range: VersionRange },
  /// Two bindings of one concept share some protocols.
  OverlappingRanges { concept: String, first: VersionRange, second: VersionRange },
  /// A multi-resource binding with no resources in it.
  EmptyResourceSet { concept: String, range: VersionRange },
  /// The same identifier is listed twice in one multi-resource binding.
  DuplicateResource { concept: String, range: VersionRange, id: String },
  /// An identifier is not in the form `namespace:path`.
  InvalidIdentifier { concept: String, id: String },
}

/// A lookup was given a concept that isn't in the table. This is different
/// from a concept that exists, but isn't supported on some version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownConcept(pub String);

#[derive(Debug)]
pub enum Error {
  Load(LoadError),
  Construction(ConstructionError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for ConstructionError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Self::InvalidConceptName(name) => write!(f, "invalid concept name `{name}`"),
      Self::DuplicateConcept(name) => write!(f, "concept `{name}` is defined more than once"),
      Self::NoBindings { concept } => write!(f, "concept `{concept}` has no bindings"),
      Self::InvertedRange { concept, min, max } => {
        write!(f, "concept `{concept}` has an inverted range (min {min} > max {max})")
      }
      Self::UnknownVersion { concept, bound } => {
        write!(f, "concept `{concept}` uses unknown version {bound}")
      }
      Self::DuplicateRange { concept, range } => {
        write!(f, "concept `{concept}` has more than one binding for {range}")
      }
      Self::OverlappingRanges { concept, first, second } => {
        write!(
          f,
          "concept `{concept}` has overlapping bindings {first} and {second} (use a `resources` \
           list to send multiple identifiers at once)"
        )
      }
      Self::EmptyResourceSet { concept, range } => {
        write!(f, "concept `{concept}` has an empty resource set for {range}")
      }
      Self::DuplicateResource { concept, range, id } => {
        write!(f, "concept `{concept}` lists `{id}` more than once for {range}")
      }
      Self::InvalidIdentifier { concept, id } => {
        write!(f, "concept `{concept}` has invalid resource identifier `{id}`")
      }
    }
  }
}

impl fmt::Display for UnknownConcept {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "unknown concept `{}`", self.0) }
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Self::Load(e) => write!(f, "{e}"),
      Self::Construction(e) => write!(f, "invalid table: {e}"),
    }
  }
}

impl std::error::Error for ConstructionError {}
impl std::error::Error for UnknownConcept {}
impl std::error::Error for Error {}

impl From<LoadError> for Error {
  fn from(e: LoadError) -> Self { Error::Load(e) }
}
impl From<ConstructionError> for Error {
  fn from(e: ConstructionError) -> Self { Error::Construction(e) }
}
