use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use colored::Colorize;

use super::levels::LogLevel;
use super::tags::LogTag;

/// Whether debug-level lines are emitted
static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

/// Scan the command line and environment for debug flags
pub fn init_from_env() {
    let from_args = std::env::args().any(|a| a == "--debug");
    let from_env = std::env::var("SWAPWATCH_DEBUG").is_ok();
    DEBUG_ENABLED.store(from_args || from_env, Ordering::SeqCst);
}

/// Check if debug output is enabled
pub fn debug_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::SeqCst)
}

/// Central log dispatch: filter, format, print
pub fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    if level == LogLevel::Debug && !debug_enabled() {
        return;
    }

    let timestamp = Utc::now().format("%H:%M:%S").to_string();
    let body = match level {
        LogLevel::Error => message.red().to_string(),
        LogLevel::Warning => message.yellow().to_string(),
        LogLevel::Info => message.normal().to_string(),
        LogLevel::Debug => message.dimmed().to_string(),
    };

    println!(
        "{} {} {} {}",
        level.emoji(),
        tag.colored(),
        format!("[{}]", timestamp).dimmed(),
        body
    );
    let _ = io::stdout().flush();
}
