/// Error taxonomy for swapwatch
///
/// Every failure mode the bot distinguishes in behavior gets its own
/// variant; everything else stays inside anyhow at the storage layer or a
/// String at the telegram-handler seams.

#[derive(Debug, Clone)]
pub enum SwapwatchError {
    /// The (chat, wallet) pair already has an active subscription
    DuplicateSubscription { wallet: String },

    /// Neither parse strategy recognized the event's description
    UnparseableDescription { signature: String },

    /// The replace-all push of the watched-address set failed
    SyncFailed { message: String },

    /// One recipient could not be reached; the fan-out continues
    DeliveryFailed { chat_id: i64, message: String },

    /// The subscription store misbehaved outside a webhook batch
    Storage { message: String },

    /// An upstream service (market data, webhook provider) misbehaved
    Upstream { service: String, message: String },
}

impl std::fmt::Display for SwapwatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SwapwatchError::DuplicateSubscription { wallet } => {
                write!(f, "Wallet {} is already being monitored", wallet)
            }
            SwapwatchError::UnparseableDescription { signature } => {
                write!(f, "Unrecognized swap description in transaction {}", signature)
            }
            SwapwatchError::SyncFailed { message } => {
                write!(f, "Allowlist sync failed: {}", message)
            }
            SwapwatchError::DeliveryFailed { chat_id, message } => {
                write!(f, "Delivery to chat {} failed: {}", chat_id, message)
            }
            SwapwatchError::Storage { message } => {
                write!(f, "Storage error: {}", message)
            }
            SwapwatchError::Upstream { service, message } => {
                write!(f, "{} error: {}", service, message)
            }
        }
    }
}

impl std::error::Error for SwapwatchError {}
