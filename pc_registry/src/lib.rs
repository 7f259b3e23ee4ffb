//! Resolves game concepts (like short grass) to the resource identifiers used
//! for them on each protocol version, and back.
//!
//! Identifiers get renamed between versions (`minecraft:grass` became
//! `minecraft:short_grass` in 1.20.3), and concepts get added. A [`Resolver`]
//! is built once from the generated resource table, and answers both
//! directions for any protocol number:
//!
//! ```
//! # use pc_registry::{Resolver, ReverseLookup};
//! # use pc_data::Source;
//! let resolver = Resolver::new(&Source::Bundled.load().unwrap()).unwrap();
//!
//! assert_eq!(resolver.resolve("short_grass", 764).unwrap()[0].as_str(), "minecraft:grass");
//! assert_eq!(resolver.resolve("short_grass", 765).unwrap()[0].as_str(), "minecraft:short_grass");
//! assert!(resolver.resolve("copper_bars", 755).unwrap().is_empty());
//!
//! let grass = resolver.resolve_reverse("minecraft:grass", 760);
//! assert_eq!(grass.first().unwrap().name(), "short_grass");
//! assert!(resolver.resolve_reverse("minecraft:grass", 765).is_unrecognized());
//! ```

#[macro_use]
extern crate log;

mod concept;
mod error;
mod ident;
mod index;
mod range;
mod resolver;
mod table;

pub use concept::{Binding, Concept, ConceptRecord, Resources};
pub use error::{ConstructionError, Error, Result, UnknownConcept};
pub use ident::{Identifier, InvalidIdentifier, DEFAULT_NAMESPACE};
pub use range::VersionRange;
pub use resolver::{Resolver, ReverseLookup};

use pc_common::config::{Config, TableSource};
use pc_data::Source;

/// Returns where the config says the table should be loaded from.
pub fn source(config: &Config) -> Source {
  match config.table.source {
    TableSource::Bundled => Source::Bundled,
    TableSource::Local => Source::Local(config.table.path.clone().into()),
  }
}

/// Loads the table described by the config, and builds a resolver from it.
/// This is meant to be called once on startup. Any error here means there is
/// no usable table, so callers should not continue.
pub fn load(config: &Config) -> Result<Resolver> {
  let source = source(config);
  let def = source.load()?;
  info!("read {} concepts from {}", def.concepts.len(), source);
  Ok(Resolver::new(&def)?)
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn load_bundled() {
    let resolver = load(&Config::default()).unwrap();
    assert!(!resolver.is_empty());
    assert_eq!(resolver.coverage(), VersionRange::new(755, 774));
  }

  #[test]
  fn load_missing() {
    let mut config = Config::default();
    config.table.source = TableSource::Local;
    config.table.path = "does/not/exist.json".into();
    assert_eq!(source(&config), Source::Local("does/not/exist.json".into()));
    assert!(matches!(load(&config), Err(Error::Load(_))));
  }
}
