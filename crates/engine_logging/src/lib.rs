#![deny(missing_docs)]
//! Shared logging utilities for the parser workspace.
//!
//! This crate provides the `engine_*` logging macros used across the codebase,
//! the stdout logger used by the binary, a minimal test initializer for the
//! global logger, and [`ok_or_log`] for steps whose failures are logged and
//! then treated as "no data".

use std::fmt::Display;

use log::LevelFilter;
use simplelog::{ColorChoice, Config, ConfigBuilder, TermLogger, TerminalMode};

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Converts a fallible step into an optional value, logging the failure.
///
/// The error is reported at warn level together with `context` and then
/// discarded; the caller continues with `None`.
pub fn ok_or_log<T, E: Display>(context: &str, result: Result<T, E>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("{context}: {err}");
            None
        }
    }
}

/// Initializes the process logger, writing to stdout so log lines interleave
/// with the program's regular output.
///
/// Returns `false` if a global logger was already installed.
pub fn initialize_stdout(level: LevelFilter) -> bool {
    TermLogger::init(level, build_config(), TerminalMode::Stdout, ColorChoice::Auto).is_ok()
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto);
}
