//! Inline keyboard builders
//!
//! The main menu mirrors the command set: wallet management on top,
//! settings and help below.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

/// Create a callback button
fn btn(text: &str, callback_data: &str) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(text.to_string(), callback_data.to_string())
}

/// Main menu keyboard with the wallet management actions
pub fn main_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            btn("➕ Add Wallet", "wallet:add"),
            btn("📋 List Wallets", "wallet:list"),
        ],
        vec![
            btn("❌ Remove Wallet", "wallet:remove"),
            btn("⚙️ Settings", "menu:settings"),
        ],
        vec![btn("ℹ️ Help", "menu:help")],
    ])
}
