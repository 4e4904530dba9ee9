use std::sync::Arc;

use tokio::sync::Notify;

use swapwatch::api::DexScreenerClient;
use swapwatch::config::{self, with_config};
use swapwatch::database::Database;
use swapwatch::logger::{self, LogTag};
use swapwatch::telegram::{self, commands, keyboards, notifier, ConversationStore};
use swapwatch::watchlist;
use swapwatch::webserver::{self, AppState};

#[tokio::main]
async fn main() {
    logger::init();

    if let Err(e) = config::load_config() {
        eprintln!("❌ Failed to load configuration: {}", e);
        std::process::exit(1);
    }

    logger::info(LogTag::System, "🚀 swapwatch starting up...");

    if let Err(e) = run().await {
        logger::error(LogTag::System, &format!("Fatal: {}", e));
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let db_path = with_config(|c| c.database.path.clone());
    let db = Arc::new(
        Database::open(&db_path).map_err(|e| format!("Failed to open database: {}", e))?,
    );

    let bot = telegram::bot::init_bot().await?;
    if let Err(e) = telegram::bot::register_commands(&bot).await {
        logger::warning(LogTag::Telegram, &e);
    }

    // conversation store with the timeout notice wired to Telegram;
    // a failed notice is logged, never retried
    let timeout_bot = bot.clone();
    let store = ConversationStore::new(move |chat_id| {
        let bot = timeout_bot.clone();
        tokio::spawn(async move {
            if let Err(e) =
                notifier::send_with_keyboard(&bot, chat_id, commands::TIMEOUT, keyboards::main_menu())
                    .await
            {
                logger::warning(
                    LogTag::Telegram,
                    &format!("Failed to send timeout notice: {}", e),
                );
            }
        });
    });

    // bring the provider's allowlist in line with the store before serving
    if let Err(e) = watchlist::sync_allowlist(&db).await {
        logger::warning(LogTag::Allowlist, &format!("Startup sync failed: {}", e));
    }

    let shutdown = Arc::new(Notify::new());
    watchlist::spawn_resync_task(db.clone(), shutdown.clone());

    let app_state = Arc::new(AppState {
        db: db.clone(),
        bot: bot.clone(),
        market: DexScreenerClient::new(),
    });
    tokio::spawn(async move {
        if let Err(e) = webserver::start_server(app_state).await {
            logger::error(LogTag::System, &format!("Webhook server failed: {}", e));
        }
    });

    let polling = tokio::spawn(telegram::bot::run_polling(
        bot,
        db,
        store,
        shutdown.clone(),
    ));

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("Failed to listen for shutdown signal: {}", e))?;

    logger::info(LogTag::System, "Shutdown signal received, cleaning up...");
    shutdown.notify_waiters();
    webserver::shutdown();
    let _ = polling.await;

    logger::info(LogTag::System, "✅ swapwatch stopped");
    Ok(())
}
