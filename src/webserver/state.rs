use std::sync::Arc;

use teloxide::Bot;

use crate::api::DexScreenerClient;
use crate::database::Database;

/// Shared state for webhook request handlers
pub struct AppState {
    pub db: Arc<Database>,
    pub bot: Bot,
    pub market: DexScreenerClient,
}
