//! Structured logging for swapwatch
//!
//! Tag-based leveled logging with colored console output:
//! - Standard log levels (Error/Warning/Info/Debug)
//! - Debug output gated by `--debug` or the `SWAPWATCH_DEBUG` env var
//!
//! ## Usage
//!
//! ```rust,ignore
//! use swapwatch::logger::{self, LogTag};
//!
//! logger::error(LogTag::Telegram, "Send failed");
//! logger::warning(LogTag::Allowlist, "Sync deferred");
//! logger::info(LogTag::System, "Starting up");
//! logger::debug(LogTag::Webhook, "Raw event: ..."); // only with --debug
//! ```

mod core;
mod levels;
mod tags;

pub use levels::LogLevel;
pub use tags::LogTag;

/// Initialize the logger system
///
/// Call once at startup, before any logging occurs. Scans the command line
/// and environment for debug flags.
pub fn init() {
    core::init_from_env();
}

/// Log at ERROR level (always shown, critical issues)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level (important issues that need attention)
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level (standard operations)
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level (detailed diagnostics)
///
/// Debug lines are only shown when `--debug` is passed on the command line
/// or `SWAPWATCH_DEBUG` is set in the environment.
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}
