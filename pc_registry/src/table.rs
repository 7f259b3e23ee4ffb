use crate::{
  concept::{Binding, Concept, ConceptRecord, Resources},
  error::ConstructionError,
  ident::Identifier,
  range::VersionRange,
};
use itertools::Itertools;
use pc_common::version::ProtocolVersion;
use pc_data::{BindingDef, Bound, ConceptDef, TableDef};
use std::collections::HashSet;

/// Validates every concept in the table, and converts them into records. The
/// order of the table is kept.
pub(crate) fn build_records(def: &TableDef) -> Result<Vec<ConceptRecord>, ConstructionError> {
  let mut names = HashSet::with_capacity(def.concepts.len());
  let mut records = Vec::with_capacity(def.concepts.len());
  for c in &def.concepts {
    let record = build_record(c)?;
    if !names.insert(record.concept.name().to_string()) {
      return Err(ConstructionError::DuplicateConcept(record.concept.name().into()));
    }
    records.push(record);
  }
  Ok(records)
}

fn build_record(def: &ConceptDef) -> Result<ConceptRecord, ConstructionError> {
  let concept = Concept::new(&def.name)
    .ok_or_else(|| ConstructionError::InvalidConceptName(def.name.clone()))?;
  let name = concept.name();
  if def.bindings.is_empty() {
    return Err(ConstructionError::NoBindings { concept: name.into() });
  }

  let mut bindings =
    def.bindings.iter().map(|b| build_binding(name, b)).collect::<Result<Vec<_>, _>>()?;
  bindings.sort_by_key(|b| (b.range.min(), b.range.max()));
  // Sorted by min, so if any two ranges overlap, then some neighbors overlap.
  for (a, b) in bindings.iter().tuple_windows() {
    if a.range == b.range {
      return Err(ConstructionError::DuplicateRange { concept: name.into(), range: a.range });
    }
    if a.range.overlaps(&b.range) {
      return Err(ConstructionError::OverlappingRanges {
        concept: name.into(),
        first:   a.range,
        second:  b.range,
      });
    }
  }

  Ok(ConceptRecord { concept, bindings })
}

fn build_binding(concept: &str, def: &BindingDef) -> Result<Binding, ConstructionError> {
  let min = protocol(concept, def.min())?;
  let max = protocol(concept, def.max())?;
  let range = VersionRange::new(min, max).ok_or_else(|| ConstructionError::InvertedRange {
    concept: concept.into(),
    min,
    max,
  })?;

  let ident = |id: &str| {
    Identifier::new(id)
      .map_err(|_| ConstructionError::InvalidIdentifier { concept: concept.into(), id: id.into() })
  };
  let resources = match def {
    BindingDef::Single(s) => Resources::Single(ident(&s.resource)?),
    BindingDef::Multi(m) => {
      if m.resources.is_empty() {
        return Err(ConstructionError::EmptyResourceSet { concept: concept.into(), range });
      }
      let mut seen = HashSet::with_capacity(m.resources.len());
      let mut ids = Vec::with_capacity(m.resources.len());
      for id in &m.resources {
        if !seen.insert(id.as_str()) {
          return Err(ConstructionError::DuplicateResource {
            concept: concept.into(),
            range,
            id: id.clone(),
          });
        }
        ids.push(ident(id)?);
      }
      Resources::Multi(ids)
    }
  };
  Ok(Binding { range, resources })
}

fn protocol(concept: &str, bound: &Bound) -> Result<u32, ConstructionError> {
  match bound {
    Bound::Protocol(v) => Ok(*v),
    Bound::Name(name) => match ProtocolVersion::from_name(name) {
      ProtocolVersion::Invalid => {
        Err(ConstructionError::UnknownVersion { concept: concept.into(), bound: bound.clone() })
      }
      ver => Ok(ver.id()),
    },
  }
}
