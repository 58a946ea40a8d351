//! Logger installation.
//!
//! Native builds log through `env_logger`, the browser build through
//! `console_log`. `RUST_LOG` still overrides the configured level natively.

use crate::config::LogLevel;

/// Install the global logger at `level`.
///
/// Safe to call more than once: later calls only adjust the maximum level.
/// Returns true if this call installed the logger.
pub fn init(level: LogLevel) -> bool {
    let installed = install(level);
    if installed {
        log::info!("Logging initialized at {}", level.name());
    } else {
        log::set_max_level(level.to_level_filter());
        log::debug!("Logger already installed, level set to {}", level.name());
    }
    installed
}

#[cfg(not(target_arch = "wasm32"))]
fn install(level: LogLevel) -> bool {
    env_logger::Builder::new()
        .filter_level(level.to_level_filter())
        .parse_default_env()
        .try_init()
        .is_ok()
}

#[cfg(target_arch = "wasm32")]
fn install(level: LogLevel) -> bool {
    let level = match level {
        LogLevel::Error => log::Level::Error,
        LogLevel::Warn => log::Level::Warn,
        LogLevel::Info => log::Level::Info,
        LogLevel::Debug => log::Level::Debug,
        LogLevel::Trace => log::Level::Trace,
    };
    console_log::init_with_level(level).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init(LogLevel::Debug);
        assert!(!init(LogLevel::Warn));
        assert_eq!(log::max_level(), log::LevelFilter::Warn);
    }
}
