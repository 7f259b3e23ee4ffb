use crate::{concept::ConceptRecord, ident::Identifier, range::VersionRange};
use std::collections::{HashMap, HashSet};

/// Maps identifiers back to concepts.
///
/// The protocol axis is split at every binding's `min` and `max + 1`. Between
/// two of those points, the set of active bindings never changes, so each of
/// those buckets gets a single map from identifier to concept indices. A
/// lookup is then a binary search for the bucket, and a hash lookup.
#[derive(Debug)]
pub(crate) struct ReverseIndex {
  /// Bucket `i` covers `bounds[i]..bounds[i + 1]`. These are `u64`, as a
  /// range ending at `u32::MAX` has an end bound of `u32::MAX + 1`.
  bounds:  Vec<u64>,
  buckets: Vec<HashMap<Identifier, Vec<usize>>>,
}

impl ReverseIndex {
  pub fn new(records: &[ConceptRecord]) -> Self {
    let mut bounds: Vec<u64> = records
      .iter()
      .flat_map(|r| r.bindings())
      .flat_map(|b| [u64::from(b.range().min()), u64::from(b.range().max()) + 1])
      .collect();
    bounds.sort_unstable();
    bounds.dedup();

    let mut buckets = Vec::with_capacity(bounds.len().saturating_sub(1));
    let mut reported = HashSet::new();
    for window in bounds.windows(2) {
      // Only the very last bound can be past `u32::MAX`, and that is never the
      // start of a bucket.
      let Ok(start) = u32::try_from(window[0]) else { break };
      let mut bucket: HashMap<Identifier, Vec<usize>> = HashMap::new();
      for (idx, record) in records.iter().enumerate() {
        if let Some(binding) = record.binding_at(start) {
          for id in binding.ids() {
            bucket.entry(id.clone()).or_default().push(idx);
          }
        }
      }
      for (id, concepts) in &bucket {
        if concepts.len() > 1 && reported.insert((id.clone(), concepts.clone())) {
          warn!(
            "`{}` is used by {} concepts at once ({}), reverse lookups will return all of them",
            id,
            concepts.len(),
            concepts.iter().map(|&c| records[c].concept().name()).collect::<Vec<_>>().join(", "),
          );
        }
      }
      buckets.push(bucket);
    }
    ReverseIndex { bounds, buckets }
  }

  /// Returns the indices of every concept that uses `id` at `ver`.
  pub fn get(&self, id: &str, ver: u32) -> &[usize] {
    let idx = self.bounds.partition_point(|&b| b <= u64::from(ver));
    if idx == 0 || idx >= self.bounds.len() {
      return &[];
    }
    self.buckets[idx - 1].get(id).map(Vec::as_slice).unwrap_or(&[])
  }

  pub fn bucket_count(&self) -> usize { self.buckets.len() }

  /// Returns the range and number of identifiers of each bucket.
  pub fn buckets(&self) -> impl Iterator<Item = (VersionRange, usize)> + '_ {
    self.bounds.windows(2).zip(&self.buckets).filter_map(|(w, bucket)| {
      let min = u32::try_from(w[0]).ok()?;
      let max = u32::try_from(w[1] - 1).ok()?;
      Some((VersionRange::new(min, max)?, bucket.len()))
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::table::build_records;
  use pc_data::TableDef;
  use pretty_assertions::assert_eq;

  fn index(src: &str) -> ReverseIndex {
    ReverseIndex::new(&build_records(&TableDef::from_json(src).unwrap()).unwrap())
  }

  #[test]
  fn buckets() {
    let index = index(
      r#"{ "concepts": [
        { "name": "a", "bindings": [
          { "resource": "test:a", "min": 10, "max": 19 },
          { "resource": "test:a2", "min": 20, "max": 29 } ] },
        { "name": "b", "bindings": [ { "resource": "test:b", "min": 15, "max": 40 } ] }
      ] }"#,
    );
    assert_eq!(
      index.buckets().collect::<Vec<_>>(),
      vec![
        (VersionRange::new(10, 14).unwrap(), 1),
        (VersionRange::new(15, 19).unwrap(), 2),
        (VersionRange::new(20, 29).unwrap(), 2),
        (VersionRange::new(30, 40).unwrap(), 1),
      ]
    );
    assert_eq!(index.bucket_count(), 4);

    assert_eq!(index.get("test:a", 9), &[] as &[usize]);
    assert_eq!(index.get("test:a", 10), &[0]);
    assert_eq!(index.get("test:a", 19), &[0]);
    assert_eq!(index.get("test:a", 20), &[] as &[usize]);
    assert_eq!(index.get("test:a2", 20), &[0]);
    assert_eq!(index.get("test:b", 14), &[] as &[usize]);
    assert_eq!(index.get("test:b", 40), &[1]);
    assert_eq!(index.get("test:b", 41), &[] as &[usize]);
  }

  #[test]
  fn gaps() {
    let index = index(
      r#"{ "concepts": [
        { "name": "a", "bindings": [
          { "resource": "test:a", "min": 10, "max": 19 },
          { "resource": "test:a", "min": 30, "max": 39 } ] }
      ] }"#,
    );
    assert_eq!(index.get("test:a", 19), &[0]);
    assert_eq!(index.get("test:a", 25), &[] as &[usize]);
    assert_eq!(index.get("test:a", 30), &[0]);
    assert_eq!(index.buckets().map(|(_, n)| n).collect::<Vec<_>>(), vec![1, 0, 1]);
  }

  #[test]
  fn max_protocol() {
    let index = index(
      r#"{ "concepts": [
        { "name": "a", "bindings": [ { "resource": "test:a", "min": 0, "max": 4294967295 } ] }
      ] }"#,
    );
    assert_eq!(index.get("test:a", 0), &[0]);
    assert_eq!(index.get("test:a", u32::MAX), &[0]);
    assert_eq!(index.bucket_count(), 1);
  }

  #[test]
  fn empty() {
    let index = ReverseIndex::new(&[]);
    assert_eq!(index.bucket_count(), 0);
    assert_eq!(index.get("test:a", 0), &[] as &[usize]);
  }
}
