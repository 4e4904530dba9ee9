//! Telegram integration
//!
//! ```text
//! telegram/
//! ├── mod.rs           # public API
//! ├── bot.rs           # lifecycle + update polling
//! ├── state.rs         # per-chat conversation steps with expiry
//! ├── keyboards.rs     # inline keyboards
//! ├── formatters.rs    # swap notification composition
//! ├── notifier.rs      # sending + fan-out dispatch
//! └── commands/        # command, text and callback handlers
//! ```

pub mod bot;
pub mod commands;
pub mod formatters;
pub mod keyboards;
pub mod notifier;
pub mod state;

pub use formatters::{format_amount, format_swap_message, html_escape, truncate_address};
pub use notifier::{dispatch_swap_notification, fan_out, DeliveryReport};
pub use state::{ConversationStep, ConversationStore, STATE_TTL};
