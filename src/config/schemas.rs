use serde::{Deserialize, Serialize};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub telegram: TelegramConfig,
    pub database: DatabaseConfig,
    pub helius: HeliusConfig,
    pub webserver: WebserverConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot token from @BotFather
    pub bot_token: String,
    /// Chat IDs allowed to use the bot; empty means open to everyone
    pub authorized_chat_ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeliusConfig {
    pub api_key: String,
    /// Identifier of the webhook whose watched-address set we manage
    pub webhook_id: String,
    /// Public URL Helius delivers transaction batches to
    pub webhook_url: String,
    /// Periodic full allowlist resync; 0 disables the background loop
    pub resync_interval_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebserverConfig {
    pub host: String,
    pub port: u16,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            authorized_chat_ids: vec![],
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "swapwatch.db".to_string(),
        }
    }
}

impl Default for HeliusConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            webhook_id: String::new(),
            webhook_url: String::new(),
            resync_interval_secs: 0,
        }
    }
}

impl Default for WebserverConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Config {
    /// Build a configuration from environment variables
    ///
    /// Missing variables fall back to the schema defaults, so the bot can
    /// come up in a degraded mode (e.g. no Helius credentials) without
    /// failing startup.
    pub fn from_env() -> Self {
        let defaults = WebserverConfig::default();

        Self {
            telegram: TelegramConfig {
                bot_token: env_string("TELEGRAM_BOT_TOKEN"),
                authorized_chat_ids: env_id_list("AUTHORIZED_CHAT_IDS"),
            },
            database: DatabaseConfig {
                path: env_or("DATABASE_PATH", &DatabaseConfig::default().path),
            },
            helius: HeliusConfig {
                api_key: env_string("HELIUS_API_KEY"),
                webhook_id: env_string("HELIUS_WEBHOOK_ID"),
                webhook_url: env_string("WEBHOOK_URL"),
                resync_interval_secs: env_parse("HELIUS_RESYNC_INTERVAL_SECS", 0),
            },
            webserver: WebserverConfig {
                host: env_or("HOST", &defaults.host),
                port: env_parse("PORT", defaults.port),
            },
        }
    }
}

fn env_string(key: &str) -> String {
    std::env::var(key).unwrap_or_default()
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parse a comma-separated list of chat IDs, ignoring malformed entries
fn env_id_list(key: &str) -> Vec<i64> {
    std::env::var(key)
        .unwrap_or_default()
        .split(',')
        .filter_map(|part| part.trim().parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_list_skips_malformed_entries() {
        std::env::set_var("TEST_CHAT_IDS_A", "123, 456,, abc, -789");
        assert_eq!(env_id_list("TEST_CHAT_IDS_A"), vec![123, 456, -789]);
        assert!(env_id_list("TEST_CHAT_IDS_UNSET").is_empty());
    }

    #[test]
    fn defaults_are_usable() {
        let config = Config::default();
        assert!(config.telegram.bot_token.is_empty());
        assert_eq!(config.webserver.port, 3000);
        assert_eq!(config.helius.resync_interval_secs, 0);
    }
}
