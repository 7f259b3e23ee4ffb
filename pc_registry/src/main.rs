#[macro_use]
extern crate log;

use clap::Parser;
use pc_common::{
  config::{load_config, load_config_write_default},
  version::ProtocolVersion,
};
use pc_registry::{Resolver, ReverseLookup};
use std::{
  path::{Path, PathBuf},
  process,
};

/// Loads a resource table, and checks that it is valid. Optionally prints what
/// the table resolves to on a single protocol.
#[derive(Parser, Debug)]
#[clap(about, version, author)]
struct Args {
  /// The config file to load.
  #[clap(long, default_value = "registry.toml")]
  config: PathBuf,

  /// Writes the default config next to the config, with `-default` added to
  /// the name. Does not overwrite the existing config.
  #[clap(long)]
  write_default_config: bool,

  /// Prints the identifiers of every concept on this protocol.
  #[clap(long)]
  at: Option<u32>,

  /// Finds the concepts this identifier is used for on the `--at` protocol,
  /// instead of printing the whole table.
  #[clap(long, requires = "at")]
  reverse: Option<String>,
}

fn main() {
  let args = Args::parse();
  let config = if args.write_default_config {
    load_config_write_default(&args.config, default_path(&args.config))
  } else {
    load_config(&args.config)
  };
  let config = match config {
    Ok(v) => v,
    Err(e) => {
      eprintln!("could not load config at {}: {}", args.config.display(), e);
      process::exit(1);
    }
  };
  pc_common::init_with_level("check", config.log_level);

  let resolver = match pc_registry::load(&config) {
    Ok(v) => v,
    Err(e) => {
      error!("error in setup: {}", e);
      process::exit(1);
    }
  };

  match (args.at, args.reverse) {
    (Some(ver), Some(id)) => {
      if !print_reverse(&resolver, &id, ver) {
        process::exit(2);
      }
    }
    (Some(ver), None) => print_table(&resolver, ver),
    _ => {}
  }
}

fn default_path(config: &Path) -> PathBuf {
  let stem = config.file_stem().map(|s| s.to_string_lossy()).unwrap_or_else(|| "config".into());
  config.with_file_name(format!("{stem}-default.toml"))
}

fn protocol_name(ver: u32) -> String {
  match ProtocolVersion::from(ver) {
    ProtocolVersion::Invalid => ver.to_string(),
    named => format!("{ver} ({named})"),
  }
}

fn print_table(resolver: &Resolver, ver: u32) {
  let mut supported = 0;
  for record in resolver.records() {
    match record.binding_at(ver) {
      Some(binding) => {
        supported += 1;
        let ids: Vec<_> = binding.ids().iter().map(|id| id.as_str()).collect();
        println!("{:<32} {}", record.concept().const_name(), ids.join(", "));
      }
      None => println!("{:<32} -", record.concept().const_name()),
    }
  }
  info!("{} of {} concepts exist on protocol {}", supported, resolver.len(), protocol_name(ver));
}

fn print_reverse(resolver: &Resolver, id: &str, ver: u32) -> bool {
  match resolver.resolve_reverse(id, ver) {
    ReverseLookup::Found(concepts) => {
      for concept in concepts {
        println!("{}", concept.const_name());
      }
      true
    }
    ReverseLookup::Unrecognized => {
      warn!("`{}` is not used on protocol {}", id, protocol_name(ver));
      false
    }
  }
}
