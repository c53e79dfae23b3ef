use log::{LevelFilter, Metadata, Record};
use std::env;
use std::io::Write;

/// Environment variable holding the log level (`error`, `warn`, `info`,
/// `debug`, `trace`).
pub const LOG_ENV: &str = "DOMINO_LOG";

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let _ = writeln!(
                std::io::stderr(),
                "{} [{}] {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: StderrLogger = StderrLogger;

/// Parse a level from the env value; anything unset or invalid turns logging off.
pub fn level_from(value: Option<&str>) -> LevelFilter {
    value.and_then(|lvl| lvl.trim().parse().ok()).unwrap_or(LevelFilter::Off)
}

/// Install the stderr logger with a level taken from `DOMINO_LOG`.
///
/// Logging is off by default so the terminal UI is not disturbed; redirect
/// stderr (`2>domino.log`) when enabling it alongside the TUI.
pub fn init_logging() {
    let level = level_from(env::var(LOG_ENV).ok().as_deref());
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(level));
}
