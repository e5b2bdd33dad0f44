//! Logging setup for both halves of the app. Everything logs through the
//! `log` facade; the server prints with `env_logger`, the browser bundle
//! forwards to the developer console.

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Initializes server-side logging. `RUST_LOG` overrides `default_filter`.
#[cfg(feature = "ssr")]
pub fn init_server(default_filter: &str) {
    let result = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .try_init();

    if result.is_ok() {
        log::info!("Logging initialized with default filter '{}'", default_filter);
    }
}

struct ConsoleLogger;

static CONSOLE_LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("[{}] {}: {}", record.level(), record.target(), record.args());
        match record.level() {
            Level::Error => leptos::logging::error!("{}", line),
            Level::Warn => leptos::logging::warn!("{}", line),
            _ => leptos::logging::log!("{}", line),
        }
    }

    fn flush(&self) {}
}

/// Routes `log` records to the browser console. Returns false when another
/// logger was installed first.
pub fn init_browser(level: LevelFilter) -> bool {
    if log::set_logger(&CONSOLE_LOGGER).is_err() {
        return false;
    }
    log::set_max_level(level);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_logger_respects_max_level_and_installs_once() {
        assert!(init_browser(LevelFilter::Warn));
        assert!(!init_browser(LevelFilter::Info));

        let info = Metadata::builder().level(Level::Info).build();
        let warn = Metadata::builder().level(Level::Warn).build();
        assert!(!CONSOLE_LOGGER.enabled(&info));
        assert!(CONSOLE_LOGGER.enabled(&warn));

        log::warn!("forwarded to the console");
        log::error!("forwarded to the console");
    }
}
