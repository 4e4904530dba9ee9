//! Configuration system for swapwatch
//!
//! All runtime settings come from the environment (a `.env` file is read if
//! present). The parsed configuration lives in a global, accessed through
//! the helpers in [`utils`].

pub mod schemas;
pub mod utils;

pub use schemas::{Config, DatabaseConfig, HeliusConfig, TelegramConfig, WebserverConfig};
pub use utils::{load_config, with_config};
