#[macro_use]
extern crate log;

use log::LevelFilter;

pub mod config;
pub mod version;

pub use config::Config;

/// Initializes logger at the info level.
pub fn init(name: &str) { init_with_level(name, LevelFilter::Info) }

/// Initializes the logger, writing everything at or above `level` to stdout.
/// Calling this more than once does nothing; the first logger stays
/// installed.
pub fn init_with_level(name: &str, level: LevelFilter) {
  use log::{Level, Metadata, Record};

  struct Logger {
    level: LevelFilter,
  }

  impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool { metadata.level() <= self.level }

    fn log(&self, record: &Record) {
      if self.enabled(record.metadata()) {
        let now = chrono::Local::now();
        print!("{} ", now.format("%Y-%m-%d %H:%M:%S%.3f"));
        #[cfg(debug_assertions)]
        {
          if let Some(path) = record.module_path() {
            print!("{path}");
          }
          if let Some(line) = record.line() {
            print!(":{line}");
          }
          print!(" ");
        }
        match record.level() {
          Level::Trace => print!("[\x1b[36mTRACE\x1b[0m]"),
          Level::Debug => print!("[\x1b[34mDEBUG\x1b[0m]"),
          Level::Info => print!("[\x1b[32mINFO\x1b[0m]"),
          Level::Warn => print!("[\x1b[33mWARN\x1b[0m]"),
          Level::Error => print!("[\x1b[31m\x1b[1mERROR\x1b[0m]"),
        }
        println!(" {}", record.args());
      }
    }

    fn flush(&self) {}
  }

  let logger = Box::new(Logger { level });
  match log::set_boxed_logger(logger) {
    Ok(()) => {
      log::set_max_level(level);
      debug!("logger for `{}` installed at {}", name, level);
    }
    Err(_) => debug!("logger already installed, ignoring init for `{}`", name),
  }
}
