use crate::{ident::Identifier, range::VersionRange};
use convert_case::{Case, Casing};
use itertools::Itertools;
use std::{fmt, slice};

/// A version independent game element, like short grass. Two concepts are the
/// same if they have the same name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Concept {
  name: String,
}

impl Concept {
  /// Creates a concept from any casing of its name. `SHORT_GRASS`,
  /// `ShortGrass` and `short_grass` are all the same concept. Returns `None`
  /// if the name is empty, or contains anything other than ascii letters,
  /// digits and underscores.
  pub fn new(name: &str) -> Option<Self> { canonical_name(name).map(|name| Concept { name }) }

  /// The canonical (snake case) name.
  pub fn name(&self) -> &str { &self.name }
  /// The name as a generated enum constant, like `SHORT_GRASS`.
  pub fn const_name(&self) -> String { self.name.to_ascii_uppercase() }
}

impl AsRef<str> for Concept {
  fn as_ref(&self) -> &str { &self.name }
}

impl fmt::Display for Concept {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.name) }
}

/// Converts a concept name to snake case. Digits always stay attached to the
/// word before them, so `STONE2`, `Stone2` and `stone2` are all `stone2`.
pub(crate) fn canonical_name(name: &str) -> Option<String> {
  if !name.bytes().all(|c| c.is_ascii_alphanumeric() || c == b'_')
    || !name.bytes().any(|c| c.is_ascii_alphanumeric())
  {
    return None;
  }
  // `SHORT_GRASS` and `short_grass` only differ in case.
  if !name.bytes().any(|c| c.is_ascii_lowercase()) || !name.bytes().any(|c| c.is_ascii_uppercase())
  {
    return Some(name.to_ascii_lowercase());
  }
  // Mixed case, like `ShortGrass`. Only the letters go through `to_case`, as it
  // would split digits into their own word.
  let mut out = String::with_capacity(name.len() + 4);
  let mut after_underscore = false;
  for (digits, run) in &name.chars().group_by(char::is_ascii_digit) {
    let run: String = run.collect();
    if digits {
      if after_underscore {
        out.push('_');
      }
      out.push_str(&run);
    } else {
      let word = run.trim_matches('_').to_case(Case::Snake);
      let boundary = run.starts_with(|c: char| c == '_' || c.is_ascii_uppercase());
      if boundary && !out.is_empty() && !word.is_empty() {
        out.push('_');
      }
      out.push_str(&word);
      after_underscore = run.ends_with('_');
    }
  }
  Some(out)
}

/// The identifiers a binding writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resources {
  /// The normal case. One identifier for the whole range.
  Single(Identifier),
  /// Multiple identifiers are all sent together for the whole range. This is
  /// used for things like a block and its item sharing a single entry.
  Multi(Vec<Identifier>),
}

impl Resources {
  pub fn as_slice(&self) -> &[Identifier] {
    match self {
      Self::Single(id) => slice::from_ref(id),
      Self::Multi(ids) => ids,
    }
  }
  pub fn is_multi(&self) -> bool { matches!(self, Self::Multi(_)) }
}

/// A protocol range, and the identifiers that represent a concept within that
/// range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
  pub(crate) range:     VersionRange,
  pub(crate) resources: Resources,
}

impl Binding {
  pub fn range(&self) -> VersionRange { self.range }
  pub fn resources(&self) -> &Resources { &self.resources }
  pub fn ids(&self) -> &[Identifier] { self.resources.as_slice() }
}

/// A concept and all of its bindings. The bindings are sorted by their
/// minimum version, and never overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptRecord {
  pub(crate) concept:  Concept,
  pub(crate) bindings: Vec<Binding>,
}

impl ConceptRecord {
  pub fn concept(&self) -> &Concept { &self.concept }
  pub fn bindings(&self) -> &[Binding] { &self.bindings }

  /// Returns the binding active at `ver`, if any.
  pub fn binding_at(&self, ver: u32) -> Option<&Binding> {
    // Bindings are sorted by min, so the only candidate is the last binding
    // that starts at or before `ver`.
    let idx = self.bindings.partition_point(|b| b.range.min() <= ver);
    let binding = self.bindings.get(idx.checked_sub(1)?)?;
    if binding.range.contains(ver) {
      Some(binding)
    } else {
      None
    }
  }

  /// Returns the first min to the last max. There may be gaps in this range.
  pub fn span(&self) -> VersionRange {
    // A record always has at least one binding.
    let first = self.bindings[0].range;
    self.bindings.iter().fold(first, |span, b| span.union(&b.range))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn names() {
    assert_eq!(Concept::new("short_grass").unwrap().name(), "short_grass");
    assert_eq!(Concept::new("SHORT_GRASS").unwrap().name(), "short_grass");
    assert_eq!(Concept::new("ShortGrass").unwrap().name(), "short_grass");
    assert_eq!(Concept::new("short_grass").unwrap().const_name(), "SHORT_GRASS");
    assert_eq!(Concept::new("stone2").unwrap().name(), "stone2");

    assert_eq!(Concept::new(""), None);
    assert_eq!(Concept::new("__"), None);
    assert_eq!(Concept::new("short grass"), None);
    assert_eq!(Concept::new("minecraft:stone"), None);
  }

  #[test]
  fn names_with_digits() {
    for name in ["stone2", "STONE2", "Stone2"] {
      let concept = Concept::new(name).unwrap();
      assert_eq!(concept.name(), "stone2", "{name}");
      assert_eq!(concept.const_name(), "STONE2", "{name}");
    }
    for name in ["stone2_slab", "STONE2_SLAB", "Stone2Slab", "Stone2_Slab"] {
      assert_eq!(Concept::new(name).unwrap().name(), "stone2_slab", "{name}");
    }
    assert_eq!(Concept::new("Wall_2").unwrap().name(), "wall_2");
    assert_eq!(Concept::new("WALL_2").unwrap().name(), "wall_2");
  }

  fn record(ranges: &[(u32, u32)]) -> ConceptRecord {
    ConceptRecord {
      concept:  Concept::new("test").unwrap(),
      bindings: ranges
        .iter()
        .enumerate()
        .map(|(i, &(min, max))| Binding {
          range:     VersionRange::new(min, max).unwrap(),
          resources: Resources::Single(Identifier::new(&format!("test:id_{i}")).unwrap()),
        })
        .collect(),
    }
  }

  #[test]
  fn binding_at() {
    let r = record(&[(10, 19), (30, 39)]);
    assert_eq!(r.binding_at(9), None);
    assert_eq!(r.binding_at(10).unwrap().ids()[0].as_str(), "test:id_0");
    assert_eq!(r.binding_at(19).unwrap().ids()[0].as_str(), "test:id_0");
    assert_eq!(r.binding_at(20), None);
    assert_eq!(r.binding_at(29), None);
    assert_eq!(r.binding_at(30).unwrap().ids()[0].as_str(), "test:id_1");
    assert_eq!(r.binding_at(39).unwrap().ids()[0].as_str(), "test:id_1");
    assert_eq!(r.binding_at(40), None);
    assert_eq!(r.binding_at(u32::MAX), None);
    assert_eq!(r.binding_at(0), None);
  }

  #[test]
  fn span() {
    assert_eq!(record(&[(10, 19), (30, 39)]).span(), VersionRange::new(10, 39).unwrap());
    assert_eq!(record(&[(5, 5)]).span(), VersionRange::single(5));
  }
}
