/// Configuration loading and access helpers
///
/// - Loading configuration from the environment at startup
/// - Thread-safe global access
use std::sync::RwLock;

use once_cell::sync::OnceCell;

use super::schemas::Config;
use crate::logger::{self, LogTag};

/// Global configuration instance
///
/// Single source of truth for all configuration values. Access it through
/// the helper functions below.
pub static CONFIG: OnceCell<RwLock<Config>> = OnceCell::new();

/// Load configuration from the environment and initialize the global CONFIG
///
/// Reads a `.env` file first if one exists, then builds the configuration
/// from environment variables. Call once at startup.
pub fn load_config() -> Result<(), String> {
    let _ = dotenv::dotenv();

    let config = Config::from_env();

    if config.telegram.bot_token.is_empty() {
        logger::warning(
            LogTag::Config,
            "TELEGRAM_BOT_TOKEN is not set; the bot cannot start without it",
        );
    }
    if config.helius.api_key.is_empty() || config.helius.webhook_id.is_empty() {
        logger::warning(
            LogTag::Config,
            "Helius credentials missing; allowlist sync is disabled",
        );
    }

    CONFIG
        .set(RwLock::new(config))
        .map_err(|_| "Config already initialized".to_string())?;

    Ok(())
}

/// Run a closure against the global configuration
///
/// # Example
/// ```rust,ignore
/// let token = with_config(|c| c.telegram.bot_token.clone());
/// ```
///
/// # Panics
/// Panics if called before [`load_config`].
pub fn with_config<F, R>(f: F) -> R
where
    F: FnOnce(&Config) -> R,
{
    let lock = CONFIG.get().expect("Config not initialized");
    let config = lock.read().expect("Config lock poisoned");
    f(&config)
}

/// Initialize the global config if no loader has run yet
///
/// Used by tests that exercise code paths reading the global config.
pub fn ensure_loaded() {
    if CONFIG.get().is_none() {
        let _ = CONFIG.set(RwLock::new(Config::from_env()));
    }
}
