use log::LevelFilter;
use serde::Deserialize;
use std::{fmt, fs, io, path::Path};


/// The default config source. This is written next to the real config by
/// [`load_config_write_default`], so that users can see every key.
pub const DEFAULT_CONFIG: &str = include_str!("default.toml");

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
  /// Only show info logs by default.
  pub log_level: LevelFilter,

  /// Where the resource table is loaded from.
  pub table: TableConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct TableConfig {
  pub source: TableSource,
  /// The path of the table. Only used when `source` is `local`.
  pub path:   String,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub enum TableSource {
  /// The table compiled into `pc_data`. This is the default.
  #[serde(rename = "bundled")]
  Bundled,
  /// A generated table read from disk at startup.
  #[serde(rename = "local")]
  Local,
}

impl Default for Config {
  fn default() -> Self { Config { log_level: LevelFilter::Info, table: TableConfig::default() } }
}
impl Default for TableConfig {
  fn default() -> Self {
    TableConfig { source: TableSource::Bundled, path: "data/blocks.json".into() }
  }
}

#[derive(Debug)]
pub enum ConfigError {
  IO(io::Error),
  Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Self::IO(e) => write!(f, "{e}"),
      Self::Parse(e) => write!(f, "invalid config: {e}"),
    }
  }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
  fn from(e: io::Error) -> Self { ConfigError::IO(e) }
}
impl From<toml::de::Error> for ConfigError {
  fn from(e: toml::de::Error) -> Self { ConfigError::Parse(e) }
}

impl Config {
  /// Parses a config from toml source. Any missing keys use their default.
  pub fn new_src(src: &str) -> Result<Self, ConfigError> { Ok(toml::from_str(src)?) }
}

/// Loads the config at the given path. If the file doesn't exist, a warning is
/// logged and the default config is used. If the file exists but cannot be
/// parsed, this returns an error.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
  let path = path.as_ref();
  match fs::read_to_string(path) {
    Ok(src) => Config::new_src(&src),
    Err(e) if e.kind() == io::ErrorKind::NotFound => {
      warn!("no config found at `{}`, using defaults", path.display());
      Ok(Config::default())
    }
    Err(e) => Err(e.into()),
  }
}

/// Same as [`load_config`], but also writes [`DEFAULT_CONFIG`] to
/// `default_path`. If that file cannot be written, a warning is logged.
pub fn load_config_write_default(
  path: impl AsRef<Path>,
  default_path: impl AsRef<Path>,
) -> Result<Config, ConfigError> {
  let default_path = default_path.as_ref();
  fs::write(default_path, DEFAULT_CONFIG).unwrap_or_else(|e| {
    warn!("could not write default configuration to disk at `{}`: {}", default_path.display(), e);
  });
  load_config(path)
}
