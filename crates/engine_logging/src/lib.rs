#![deny(missing_docs)]
//! Shared logging utilities for the tradeview workspace.
//!
//! This crate provides the `engine_*` logging macros used across the codebase,
//! a per-thread scope label that prefixes every message, and a minimal test
//! initializer for the global logger.

use std::cell::Cell;

thread_local! {
    /// Thread-local label for the unit of work currently being processed.
    static SCOPE: Cell<Option<&'static str>> = const { Cell::new(None) };
}

/// Sets the scope label for the current thread.
///
/// The harvester sets this to the view being processed.
pub fn set_scope(label: &'static str) {
    SCOPE.with(|v| v.set(Some(label)));
}

/// Clears the scope label for the current thread.
pub fn clear_scope() {
    SCOPE.with(|v| v.set(None));
}

/// Retrieves the scope label for the current thread, if any.
pub fn scope() -> Option<&'static str> {
    SCOPE.with(|v| v.get())
}

/// Returns the message prefix for the current scope: `"[label] "` or `""`.
pub fn scope_prefix() -> String {
    match scope() {
        Some(label) => format!("[{label}] "),
        None => String::new(),
    }
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => {{
        log::trace!("{}{}", $crate::scope_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        log::info!("{}{}", $crate::scope_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        log::debug!("{}{}", $crate::scope_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        log::warn!("{}{}", $crate::scope_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        log::error!("{}{}", $crate::scope_prefix(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
