use std::{borrow::Borrow, borrow::Cow, fmt, sync::Arc};

/// The namespace used when an identifier doesn't have one.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// A namespaced resource identifier, like `minecraft:short_grass`. This is
/// what actually gets written on the wire.
///
/// Cloning is cheap, as the reverse index stores a copy of every identifier
/// for each protocol bucket it is in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(Arc<str>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidIdentifier(pub String);

impl fmt::Display for InvalidIdentifier {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "invalid resource identifier `{}`", self.0)
  }
}

impl std::error::Error for InvalidIdentifier {}

impl Identifier {
  /// Parses a fully namespaced identifier. Table entries must always include
  /// the namespace, so this does not fill in [`DEFAULT_NAMESPACE`].
  pub fn new(s: &str) -> Result<Self, InvalidIdentifier> {
    match s.split_once(':') {
      Some((namespace, path)) if valid_namespace(namespace) && valid_path(path) => {
        Ok(Identifier(s.into()))
      }
      _ => Err(InvalidIdentifier(s.into())),
    }
  }

  pub fn as_str(&self) -> &str { &self.0 }
  pub fn namespace(&self) -> &str { self.split().0 }
  pub fn path(&self) -> &str { self.split().1 }

  fn split(&self) -> (&str, &str) {
    // `new` makes sure there is a `:`.
    self.0.split_once(':').unwrap_or(("", &self.0))
  }
}

/// Adds the default namespace to `s` if it doesn't have one. This is how the
/// client reads identifiers, so `stone` and `minecraft:stone` are the same
/// thing.
pub fn normalize(s: &str) -> Cow<'_, str> {
  if s.contains(':') {
    Cow::Borrowed(s)
  } else {
    Cow::Owned(format!("{DEFAULT_NAMESPACE}:{s}"))
  }
}

fn valid_namespace(s: &str) -> bool {
  !s.is_empty() && s.bytes().all(|c| matches!(c, b'a'..=b'z' | b'0'..=b'9' | b'_' | b'.' | b'-'))
}
fn valid_path(s: &str) -> bool {
  !s.is_empty()
    && s.bytes().all(|c| matches!(c, b'a'..=b'z' | b'0'..=b'9' | b'_' | b'.' | b'-' | b'/'))
}

impl Borrow<str> for Identifier {
  fn borrow(&self) -> &str { &self.0 }
}
impl AsRef<str> for Identifier {
  fn as_ref(&self) -> &str { &self.0 }
}

impl fmt::Display for Identifier {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.0) }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn parse() {
    let id = Identifier::new("minecraft:short_grass").unwrap();
    assert_eq!(id.namespace(), "minecraft");
    assert_eq!(id.path(), "short_grass");
    assert_eq!(id.to_string(), "minecraft:short_grass");

    assert!(Identifier::new("my-mod:blocks/thing.v2").is_ok());
    assert!(Identifier::new("short_grass").is_err());
    assert!(Identifier::new("minecraft:").is_err());
    assert!(Identifier::new(":stone").is_err());
    assert!(Identifier::new("minecraft:Stone").is_err());
    assert!(Identifier::new("minecraft:stone:slab").is_err());
    assert!(Identifier::new("mine craft:stone").is_err());
  }

  #[test]
  fn normalized() {
    assert_eq!(normalize("stone"), "minecraft:stone");
    assert_eq!(normalize("minecraft:stone"), "minecraft:stone");
    assert_eq!(normalize("other:stone"), "other:stone");
  }
}
