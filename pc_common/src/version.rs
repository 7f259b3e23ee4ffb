use num_derive::{FromPrimitive, ToPrimitive};
use std::fmt;
use strum_macros::EnumString;

macro_rules! protocol_version {
  [$([$v: ident, $maj: expr, $min: expr, $id: expr]),*,] => {
    /// A list of all named protocol versions. Resource tables are not limited
    /// to these numbers (any `u32` is a valid protocol), this is only used to
    /// give names to the protocols we know about.
    ///
    /// If any protocol versions collide, there is always a simple rule to follow:
    /// use the highest minor version. This means that things like 1.20.3 and
    /// 1.20.4 are both named `V1_20_4`.
    ///
    /// This will always be non exhaustive, as there will always be new versions
    /// added to the game.
    #[non_exhaustive]
    #[derive(
      Clone, Copy, FromPrimitive, ToPrimitive, Debug, PartialEq, Eq, Hash, PartialOrd, Ord,
      EnumString,
    )]
    pub enum ProtocolVersion {
      Invalid = 0,
      $(
        $v = $id,
      )*
    }

    impl ProtocolVersion {
      /// Every named version, oldest first.
      pub const ALL: &'static [ProtocolVersion] = &[$(Self::$v),*];

      /// Returns the major version, so 20 for 1.20.4. Returns `None` for
      /// [`Invalid`](Self::Invalid).
      pub fn maj(&self) -> Option<u32> {
        match self {
          Self::Invalid => None,
          $(
            Self::$v => Some($maj),
          )*
        }
      }
      /// Returns the minor version, so 4 for 1.20.4, and 0 for 1.17. Returns
      /// `None` for [`Invalid`](Self::Invalid).
      pub fn min(&self) -> Option<u32> {
        match self {
          Self::Invalid => None,
          $(
            Self::$v => Some($min),
          )*
        }
      }
    }
  }
}

protocol_version![
  [V1_17, 17, 0, 755],
  [V1_17_1, 17, 1, 756],
  [V1_18_1, 18, 1, 757],
  [V1_18_2, 18, 2, 758],
  [V1_19, 19, 0, 759],
  [V1_19_2, 19, 2, 760],
  [V1_19_3, 19, 3, 761],
  [V1_19_4, 19, 4, 762],
  [V1_20_1, 20, 1, 763],
  [V1_20_2, 20, 2, 764],
  [V1_20_4, 20, 4, 765],
  [V1_20_6, 20, 6, 766],
  [V1_21_1, 21, 1, 767],
  [V1_21_3, 21, 3, 768],
  [V1_21_4, 21, 4, 769],
  [V1_21_5, 21, 5, 770],
  [V1_21_6, 21, 6, 771],
  [V1_21_8, 21, 8, 772],
  [V1_21_10, 21, 10, 773],
  [V1_21_11, 21, 11, 774],
];

impl ProtocolVersion {
  /// Returns the latest protocol version.
  pub const fn latest() -> Self { Self::V1_21_11 }

  /// Creates a new protocol version from the given id. If the version is
  /// unknown, then this returns [`Self::Invalid`].
  pub fn from(v: u32) -> Self {
    match num::FromPrimitive::from_u32(v) {
      Some(v) => v,
      None => Self::Invalid,
    }
  }
  /// Converts the given string to a protocol version. This string should be in
  /// the same format as the enums. That is, V1_20_4 would get
  /// `ProtocolVersion::V1_20_4`. This will return [`Self::Invalid`]
  /// if the string could not be parsed.
  pub fn parse_str(s: &str) -> Self {
    match s.parse() {
      Ok(v) => v,
      Err(_) => Self::Invalid,
    }
  }
  /// Parses a release name, like `1.20.4` or `1.17`. The enum form accepted by
  /// [`parse_str`](Self::parse_str) is also accepted. Releases that share a
  /// protocol with a later patch (like `1.20.3`) are not named, and will
  /// return [`Self::Invalid`].
  pub fn from_name(s: &str) -> Self {
    let rest = match s.strip_prefix("1.") {
      Some(rest) => rest,
      None => return Self::parse_str(s),
    };
    let mut sections = rest.split('.');
    let maj = match sections.next().map(str::parse::<u32>) {
      Some(Ok(v)) => v,
      _ => return Self::Invalid,
    };
    let min = match sections.next().map(str::parse::<u32>) {
      Some(Ok(v)) => v,
      Some(Err(_)) => return Self::Invalid,
      None => 0,
    };
    if sections.next().is_some() {
      return Self::Invalid;
    }
    Self::ALL
      .iter()
      .copied()
      .find(|v| v.maj() == Some(maj) && v.min() == Some(min))
      .unwrap_or(Self::Invalid)
  }

  /// Returns the protocol id. This is the version that is sent to the server
  /// from the client. If this is 0, then this is an invalid protocol.
  pub fn id(&self) -> u32 { num::ToPrimitive::to_u32(self).unwrap_or(0) }
}

impl fmt::Display for ProtocolVersion {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match (self.maj(), self.min()) {
      (Some(maj), Some(0)) => write!(f, "1.{maj}"),
      (Some(maj), Some(min)) => write!(f, "1.{maj}.{min}"),
      _ => write!(f, "Invalid version"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn ids() {
    assert_eq!(ProtocolVersion::from(765), ProtocolVersion::V1_20_4);
    assert_eq!(ProtocolVersion::from(773).id(), 773);
    assert_eq!(ProtocolVersion::from(1), ProtocolVersion::Invalid);
    assert_eq!(ProtocolVersion::Invalid.id(), 0);
    assert_eq!(ProtocolVersion::latest().id(), 774);
  }

  #[test]
  fn names() {
    assert_eq!(ProtocolVersion::from_name("1.17"), ProtocolVersion::V1_17);
    assert_eq!(ProtocolVersion::from_name("1.20.4"), ProtocolVersion::V1_20_4);
    assert_eq!(ProtocolVersion::from_name("V1_21_10"), ProtocolVersion::V1_21_10);
    assert_eq!(ProtocolVersion::from_name("1.20.3"), ProtocolVersion::Invalid);
    assert_eq!(ProtocolVersion::from_name("1.20.4.1"), ProtocolVersion::Invalid);
    assert_eq!(ProtocolVersion::from_name("1.x"), ProtocolVersion::Invalid);
    assert_eq!(ProtocolVersion::parse_str("nope"), ProtocolVersion::Invalid);

    assert_eq!(ProtocolVersion::V1_17.to_string(), "1.17");
    assert_eq!(ProtocolVersion::V1_21_11.to_string(), "1.21.11");
    assert_eq!(ProtocolVersion::Invalid.to_string(), "Invalid version");
  }

  #[test]
  fn ordered() {
    for pair in ProtocolVersion::ALL.windows(2) {
      assert!(pair[0] < pair[1]);
      assert!(pair[0].id() < pair[1].id());
    }
  }
}
