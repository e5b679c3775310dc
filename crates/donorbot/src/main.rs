use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::update_listeners::{webhooks, Polling};
use tokio::time::sleep;

use donorbot::cli::{Cli, Commands};
use donorbot::telegram::{create_bot, schema, setup_bot_commands, Bot, HandlerDeps, HandlerError};
use donorcore::core::config::{self, Settings, StoreBackend, WebhookSettings};
use donorcore::core::init_logger;
use donorcore::{ConfigError, DonorStore, FlowEngine, MemoryDonorStore, SessionStore, SqliteDonorStore};

/// Main entry point for the Telegram bot
///
/// Parses CLI arguments and dispatches to appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, settings, store, bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Log panics from handler tasks instead of losing them on stderr only
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
    }));

    // .env first so LOG_FILE_PATH from it is honoured
    let _ = dotenv();
    init_logger(&config::LOG_FILE_PATH)?;

    match cli.command_or_default() {
        Commands::Run { webhook } => run_bot(webhook).await,
        Commands::CheckConfig => check_config(),
    }
}

/// Opens the configured donor store
fn open_store(backend: &StoreBackend) -> Result<Arc<dyn DonorStore>> {
    match backend {
        StoreBackend::Sqlite { path, table } => {
            log::info!("Opening SQLite donor store at {} (table {})", path, table);
            Ok(Arc::new(SqliteDonorStore::open(path, table)?))
        }
        StoreBackend::Memory => {
            log::warn!("Using the in-memory donor store, records are lost on exit");
            Ok(Arc::new(MemoryDonorStore::new()))
        }
    }
}

fn check_config() -> Result<()> {
    let settings = Settings::from_env()?;
    open_store(&settings.store)?;

    log::info!("Configuration OK");
    println!("Configuration OK");
    println!("  store:   {:?}", settings.store);
    match &settings.webhook {
        Some(webhook) => println!("  updates: webhook {} (port {})", webhook.url, webhook.port),
        None => println!("  updates: long polling"),
    }
    Ok(())
}

async fn run_bot(use_webhook: bool) -> Result<()> {
    log::info!("Starting bot...");

    let settings = Settings::from_env()?;
    let store = open_store(&settings.store)?;

    let sessions = Arc::new(SessionStore::new());
    let _cleanup = Arc::clone(&sessions).spawn_cleanup_task(settings.session_prune_interval);
    let flow = FlowEngine::new(store, sessions);

    let bot = create_bot(&settings.bot_token, settings.bot_api_url.as_deref())?;

    match bot.get_me().await {
        Ok(me) => log::info!("Authorized as @{}", me.username()),
        Err(e) => log::warn!("getMe failed: {}. Continuing anyway.", e),
    }

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    let handler = schema(HandlerDeps::new(flow));

    match (use_webhook, settings.webhook) {
        (_, Some(webhook)) => run_webhook(bot, handler, webhook).await,
        (true, None) => Err(ConfigError::Missing("WEBHOOK_URL").into()),
        (false, None) => run_polling(bot, handler).await,
    }
}

/// Receives updates through teloxide's axum webhook listener until Ctrl-C
async fn run_webhook(bot: Bot, handler: UpdateHandler<HandlerError>, webhook: WebhookSettings) -> Result<()> {
    let url = url::Url::parse(&webhook.url)?;
    let addr = SocketAddr::from(([0, 0, 0, 0], webhook.port));
    log::info!("Starting bot in webhook mode at {} (listening on {})", url, addr);

    let listener = webhooks::axum(bot.clone(), webhooks::Options::new(addr, url)).await?;

    Dispatcher::builder(bot.clone(), handler)
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        )
        .await;

    log::info!("Shutting down gracefully...");
    bot.delete_webhook().await?;
    Ok(())
}

/// Long polling, restarting the dispatcher if it panics
async fn run_polling(bot: Bot, handler: UpdateHandler<HandlerError>) -> Result<()> {
    log::info!("Starting bot in long polling mode");

    let max_retries = config::retry::MAX_DISPATCHER_RETRIES;
    let mut retry_count = 0;

    loop {
        let bot_clone = bot.clone();
        let handler_clone = handler.clone();

        // Separate task so a panic surfaces through the JoinHandle
        let handle = tokio::spawn(async move {
            let listener = Polling::builder(bot_clone.clone()).build();

            Dispatcher::builder(bot_clone, handler_clone)
                .dependencies(DependencyMap::new())
                .enable_ctrlc_handler()
                .build()
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("An error from the update listener"),
                )
                .await
        });

        match handle.await {
            Ok(()) => {
                log::info!("Dispatcher shutdown gracefully");
                return Ok(());
            }
            Err(join_err) if join_err.is_panic() => {
                log::error!("Dispatcher panicked: {}", join_err);

                if retry_count >= max_retries {
                    log::error!("Max retries reached after panic. Exiting...");
                    return Err(anyhow::anyhow!("dispatcher panicked {} times", retry_count + 1));
                }

                retry_count += 1;
                log::info!(
                    "Restarting dispatcher after panic (attempt {}/{})...",
                    retry_count,
                    max_retries
                );
                exponential_backoff(retry_count).await;
            }
            Err(join_err) => {
                log::warn!("Dispatcher task was cancelled: {}", join_err);
                return Ok(());
            }
        }

        // Add a delay between retries to avoid overwhelming the API
        sleep(config::retry::dispatcher_delay()).await;
    }
}

/// Exponential backoff delay for retries
async fn exponential_backoff(retry_count: u32) {
    let delay = Duration::from_secs(config::retry::EXPONENTIAL_BACKOFF_BASE.pow(retry_count));
    sleep(delay).await;
}
