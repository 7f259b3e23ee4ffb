use crate::{
  concept::{canonical_name, Binding, Concept, ConceptRecord},
  error::{ConstructionError, UnknownConcept},
  ident::{self, Identifier},
  index::ReverseIndex,
  range::VersionRange,
  table,
};
use pc_data::TableDef;
use std::collections::HashMap;


/// Resolves concepts to the identifiers used on a given protocol version, and
/// identifiers back to concepts.
///
/// This is built once from the resource table, and never changes afterwards.
/// It is `Send` and `Sync`, so it can be shared between any number of
/// connections with an `Arc`, without any locking.
#[derive(Debug)]
pub struct Resolver {
  records: Vec<ConceptRecord>,
  names:   HashMap<String, usize>,
  reverse: ReverseIndex,
}

/// The result of a reverse lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReverseLookup<'a> {
  /// The identifier is used on this version. This is normally a single
  /// concept.
  Found(Vec<&'a Concept>),
  /// Nothing uses this identifier on this version. This can mean the client is
  /// on a protocol the table doesn't cover yet, so it shouldn't be ignored.
  Unrecognized,
}

impl<'a> ReverseLookup<'a> {
  /// Returns all the concepts found. This is empty for
  /// [`Unrecognized`](Self::Unrecognized).
  pub fn concepts(&self) -> &[&'a Concept] {
    match self {
      Self::Found(c) => c,
      Self::Unrecognized => &[],
    }
  }
  /// Returns the first concept found.
  pub fn first(&self) -> Option<&'a Concept> { self.concepts().first().copied() }
  pub fn is_unrecognized(&self) -> bool { matches!(self, Self::Unrecognized) }
}

impl Resolver {
  /// Validates the given table, and builds a resolver from it. If anything is
  /// wrong with the table, nothing is built.
  pub fn new(def: &TableDef) -> Result<Self, ConstructionError> {
    let records = table::build_records(def)?;
    let names =
      records.iter().enumerate().map(|(i, r)| (r.concept.name().to_string(), i)).collect();
    let reverse = ReverseIndex::new(&records);

    let resolver = Resolver { records, names, reverse };
    match resolver.coverage() {
      Some(range) => info!(
        "loaded {} concepts ({} bindings) covering protocols {:#}",
        resolver.len(),
        resolver.records.iter().map(|r| r.bindings.len()).sum::<usize>(),
        range,
      ),
      None => warn!("loaded an empty resource table"),
    }
    debug!("reverse index has {} buckets", resolver.reverse.bucket_count());
    for (range, ids) in resolver.reverse.buckets() {
      debug!("  {:#}: {} identifiers", range, ids);
    }
    Ok(resolver)
  }

  /// The number of concepts.
  pub fn len(&self) -> usize { self.records.len() }
  pub fn is_empty(&self) -> bool { self.records.is_empty() }

  /// Lists every concept, in table order.
  pub fn all_concepts(&self) -> impl ExactSizeIterator<Item = &Concept> + '_ {
    self.records.iter().map(|r| &r.concept)
  }
  /// Lists every record, in table order.
  pub fn records(&self) -> &[ConceptRecord] { &self.records }

  /// Looks up a concept by name. Any casing of the name is accepted (see
  /// [`Concept::new`]).
  pub fn concept(&self, name: &str) -> Option<&Concept> {
    self.index_of(name).map(|i| &self.records[i].concept)
  }

  pub fn record(&self, concept: impl AsRef<str>) -> Result<&ConceptRecord, UnknownConcept> {
    let name = concept.as_ref();
    match self.index_of(name) {
      Some(i) => Ok(&self.records[i]),
      None => Err(UnknownConcept(name.into())),
    }
  }

  fn index_of(&self, name: &str) -> Option<usize> {
    if let Some(&i) = self.names.get(name) {
      return Some(i);
    }
    self.names.get(&canonical_name(name)?).copied()
  }

  /// Returns the identifiers for `concept` on protocol `ver`.
  ///
  /// This is empty if the concept doesn't exist on that version. Otherwise, it
  /// is a single identifier, or every identifier of a multi-resource binding.
  /// Versions outside of every range are never clamped to the nearest one.
  pub fn resolve(
    &self,
    concept: impl AsRef<str>,
    ver: u32,
  ) -> Result<&[Identifier], UnknownConcept> {
    Ok(self.record(concept)?.binding_at(ver).map(Binding::ids).unwrap_or(&[]))
  }

  /// Returns true if [`resolve`](Self::resolve) would return anything.
  pub fn is_supported(&self, concept: impl AsRef<str>, ver: u32) -> Result<bool, UnknownConcept> {
    Ok(self.record(concept)?.binding_at(ver).is_some())
  }

  /// Returns every binding of the concept, sorted by version.
  pub fn bindings(&self, concept: impl AsRef<str>) -> Result<&[Binding], UnknownConcept> {
    Ok(self.record(concept)?.bindings())
  }

  /// Returns the first and last protocol the concept exists on. It might not
  /// exist on every protocol in between.
  pub fn span(&self, concept: impl AsRef<str>) -> Result<VersionRange, UnknownConcept> {
    Ok(self.record(concept)?.span())
  }

  /// Returns the first and last protocol of the whole table, or `None` if the
  /// table is empty.
  pub fn coverage(&self) -> Option<VersionRange> {
    self.records.iter().map(ConceptRecord::span).reduce(|a, b| a.union(&b))
  }

  /// Finds the concepts that `id` represents on protocol `ver`. Identifiers
  /// without a namespace are read as `minecraft:`.
  pub fn resolve_reverse(&self, id: &str, ver: u32) -> ReverseLookup<'_> {
    let id = ident::normalize(id);
    match self.reverse.get(&id, ver) {
      [] => ReverseLookup::Unrecognized,
      found => ReverseLookup::Found(found.iter().map(|&i| &self.records[i].concept).collect()),
    }
  }

  /// Converts an identifier sent on protocol `from` into the identifiers for
  /// the same concept on protocol `to`.
  ///
  /// Returns `None` if `id` is not recognized on `from`. Returns an empty list
  /// if the concept doesn't exist on `to`.
  pub fn translate(&self, id: &str, from: u32, to: u32) -> Option<Vec<&Identifier>> {
    let found = self.reverse.get(&ident::normalize(id), from);
    if found.is_empty() {
      return None;
    }
    let mut out: Vec<&Identifier> = vec![];
    for &i in found {
      if let Some(binding) = self.records[i].binding_at(to) {
        for id in binding.ids() {
          if !out.contains(&id) {
            out.push(id);
          }
        }
      }
    }
    Some(out)
  }
}
