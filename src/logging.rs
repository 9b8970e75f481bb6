#![cfg(feature = "std")]

use log::{self, LevelFilter, Metadata, Record};
use std::env;

/// Environment variable selecting the log level.
pub const LOG_ENV: &str = "BATTLEBOATS_LOG";

struct NodeLogger;

impl log::Log for NodeLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let module = record
                .module_path()
                .and_then(|path| path.rsplit("::").next())
                .unwrap_or("battleboats");
            println!("{} [{}] - {}", record.level(), module, record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: NodeLogger = NodeLogger;

/// Initialize logging with a level taken from `BATTLEBOATS_LOG`.
/// Defaults to `info` if the variable is not set or invalid. Calling it
/// again only adjusts the level.
pub fn init_logging() {
    let level = env::var(LOG_ENV)
        .ok()
        .and_then(|lvl| lvl.parse().ok())
        .unwrap_or(LevelFilter::Info);
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}
