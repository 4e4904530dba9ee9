//! Message sending and notification fan-out
//!
//! The dispatcher guarantees one delivery attempt per subscriber: a failed
//! send is recorded and logged, and the loop moves on to the next
//! recipient. Nothing here short-circuits.

use std::future::Future;

use teloxide::prelude::*;
use teloxide::types::{ChatId, InlineKeyboardMarkup, ParseMode};

use crate::database::Database;
use crate::errors::SwapwatchError;
use crate::logger::{self, LogTag};

/// Outcome of one delivery attempt
#[derive(Debug)]
pub struct DeliveryReport {
    pub chat_id: i64,
    pub outcome: Result<(), String>,
}

/// Send an HTML-mode message to a chat
pub async fn send_message(bot: &Bot, chat_id: i64, text: &str) -> Result<(), String> {
    bot.send_message(ChatId(chat_id), text)
        .parse_mode(ParseMode::Html)
        .await
        .map_err(|e| format!("Failed to send message: {}", e))?;
    Ok(())
}

/// Send an HTML-mode message with an inline keyboard
pub async fn send_with_keyboard(
    bot: &Bot,
    chat_id: i64,
    text: &str,
    keyboard: InlineKeyboardMarkup,
) -> Result<(), String> {
    bot.send_message(ChatId(chat_id), text)
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboard)
        .await
        .map_err(|e| format!("Failed to send message: {}", e))?;
    Ok(())
}

/// Attempt one delivery per recipient, collecting every outcome
///
/// For N recipients there are exactly N attempts regardless of failures;
/// each failure is logged and recorded, never propagated.
pub async fn fan_out<F, Fut>(recipients: &[i64], send: F) -> Vec<DeliveryReport>
where
    F: Fn(i64) -> Fut,
    Fut: Future<Output = Result<(), String>>,
{
    let mut reports = Vec::with_capacity(recipients.len());

    for &chat_id in recipients {
        let outcome = send(chat_id).await;
        if let Err(message) = &outcome {
            let failure = SwapwatchError::DeliveryFailed {
                chat_id,
                message: message.clone(),
            };
            logger::warning(LogTag::Telegram, &format!("{}", failure));
        }
        reports.push(DeliveryReport { chat_id, outcome });
    }

    reports
}

/// Deliver a composed swap notification to every subscriber of a wallet
pub async fn dispatch_swap_notification(
    bot: &Bot,
    db: &Database,
    wallet: &str,
    message: &str,
) -> Vec<DeliveryReport> {
    let subscribers = match db.find_users_for_wallet(wallet) {
        Ok(subscribers) => subscribers,
        Err(e) => {
            logger::error(
                LogTag::Telegram,
                &format!("Subscriber lookup for {} failed: {}", wallet, e),
            );
            return Vec::new();
        }
    };

    if subscribers.is_empty() {
        logger::debug(LogTag::Telegram, &format!("No subscribers for {}", wallet));
        return Vec::new();
    }

    let reports = fan_out(&subscribers, |chat_id| send_message(bot, chat_id, message)).await;

    let delivered = reports.iter().filter(|r| r.outcome.is_ok()).count();
    logger::info(
        LogTag::Telegram,
        &format!(
            "Swap by {}: notified {}/{} subscribers",
            wallet,
            delivered,
            reports.len()
        ),
    );

    reports
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn fan_out_attempts_every_recipient() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let recipients = vec![1, 2, 3];

        let counter = attempts.clone();
        let reports = fan_out(&recipients, move |chat_id| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                if chat_id == 2 {
                    Err("blocked by user".to_string())
                } else {
                    Ok(())
                }
            }
        })
        .await;

        assert_eq!(attempts.load(Ordering::SeqCst), 3);
        assert_eq!(reports.len(), 3);
        assert_eq!(reports.iter().filter(|r| r.outcome.is_err()).count(), 1);
        assert_eq!(reports[1].chat_id, 2);
        assert!(reports[1].outcome.is_err());
        assert!(reports[2].outcome.is_ok());
    }

    #[tokio::test]
    async fn fan_out_with_no_recipients_is_empty() {
        let reports = fan_out(&[], |_| async { Ok(()) }).await;
        assert!(reports.is_empty());
    }
}
