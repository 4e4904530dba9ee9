use colored::{ColoredString, Colorize};

/// Source tags for log lines
///
/// Each subsystem logs under its own tag so output can be scanned (and
/// debug-filtered) per module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTag {
    System,
    Config,
    Database,
    Telegram,
    Webhook,
    Swap,
    Allowlist,
    Market,
}

impl LogTag {
    /// Get string representation for logging
    pub fn as_str(&self) -> &'static str {
        match self {
            LogTag::System => "SYSTEM",
            LogTag::Config => "CONFIG",
            LogTag::Database => "DATABASE",
            LogTag::Telegram => "TELEGRAM",
            LogTag::Webhook => "WEBHOOK",
            LogTag::Swap => "SWAP",
            LogTag::Allowlist => "ALLOWLIST",
            LogTag::Market => "MARKET",
        }
    }

    /// Colored tag label for console output
    pub fn colored(&self) -> ColoredString {
        match self {
            LogTag::System => self.as_str().green().bold(),
            LogTag::Config => self.as_str().white().bold(),
            LogTag::Database => self.as_str().bright_blue().bold(),
            LogTag::Telegram => self.as_str().cyan().bold(),
            LogTag::Webhook => self.as_str().magenta().bold(),
            LogTag::Swap => self.as_str().bright_yellow().bold(),
            LogTag::Allowlist => self.as_str().yellow().bold(),
            LogTag::Market => self.as_str().bright_green().bold(),
        }
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
