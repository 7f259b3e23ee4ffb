use pc_common::version::ProtocolVersion;
use std::fmt;

/// An inclusive range of protocol versions. `min` is always less than or
/// equal to `max`.
///
/// This is not `Ord`, as `Ord::min` and `Ord::max` would shadow the getters
/// below on by-value receivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VersionRange {
  min: u32,
  max: u32,
}

impl VersionRange {
  /// Creates a new range. Returns `None` if `min > max`.
  pub const fn new(min: u32, max: u32) -> Option<Self> {
    if min <= max {
      Some(VersionRange { min, max })
    } else {
      None
    }
  }
  /// A range containing a single protocol.
  pub const fn single(ver: u32) -> Self { VersionRange { min: ver, max: ver } }

  pub const fn min(&self) -> u32 { self.min }
  pub const fn max(&self) -> u32 { self.max }

  /// Returns true if `ver` is within this range. Both ends are inclusive.
  pub const fn contains(&self, ver: u32) -> bool { self.min <= ver && ver <= self.max }
  /// Returns true if any protocol is within both ranges.
  pub const fn overlaps(&self, other: &VersionRange) -> bool {
    self.min <= other.max && other.min <= self.max
  }
  /// Returns the smallest range containing both `self` and `other`.
  pub fn union(&self, other: &VersionRange) -> VersionRange {
    VersionRange { min: self.min.min(other.min), max: self.max.max(other.max) }
  }

  /// The number of protocols in this range. This is a `u64`, as `0..=u32::MAX`
  /// has one more element than a `u32` can hold.
  pub fn len(&self) -> u64 { u64::from(self.max) - u64::from(self.min) + 1 }
}

impl fmt::Display for VersionRange {
  /// Writes `755..=774`, or `755 (1.17)..=774 (1.21.11)` with `{:#}`.
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    if f.alternate() {
      fmt_named(self.min, f)?;
      write!(f, "..=")?;
      fmt_named(self.max, f)
    } else {
      write!(f, "{}..={}", self.min, self.max)
    }
  }
}

fn fmt_named(ver: u32, f: &mut fmt::Formatter) -> fmt::Result {
  match ProtocolVersion::from(ver) {
    ProtocolVersion::Invalid => write!(f, "{ver}"),
    named => write!(f, "{ver} ({named})"),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn inclusive() {
    let r = VersionRange::new(755, 764).unwrap();
    assert!(!r.contains(754));
    assert!(r.contains(755));
    assert!(r.contains(764));
    assert!(!r.contains(765));
    assert_eq!(r.len(), 10);

    assert!(VersionRange::single(3).contains(3));
    assert_eq!(VersionRange::new(0, u32::MAX).unwrap().len(), 1 << 32);
  }

  #[test]
  fn bounds() {
    let r = VersionRange::new(755, 764).unwrap();
    let (min, max) = (r.min(), r.max());
    assert_eq!(min, 755);
    assert_eq!(max, 764);
    assert_eq!(u64::from(r.max()) + 1, 765);
  }

  #[test]
  fn inverted() {
    assert_eq!(VersionRange::new(765, 764), None);
    assert!(VersionRange::new(765, 765).is_some());
  }

  #[test]
  fn overlaps() {
    let a = VersionRange::new(755, 764).unwrap();
    let b = VersionRange::new(765, 774).unwrap();
    let c = VersionRange::new(760, 770).unwrap();
    assert!(!a.overlaps(&b));
    assert!(a.overlaps(&c));
    assert!(c.overlaps(&b));
    assert!(a.overlaps(&a));
    assert_eq!(a.union(&b), VersionRange::new(755, 774).unwrap());
  }

  #[test]
  fn display() {
    let r = VersionRange::new(755, 800).unwrap();
    assert_eq!(r.to_string(), "755..=800");
    assert_eq!(format!("{r:#}"), "755 (1.17)..=800");
  }
}
