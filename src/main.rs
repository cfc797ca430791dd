//! Application entry point for carwatch-bot.
//!
//! Initializes all components and starts the scan scheduler and the Telegram
//! command dispatcher.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use carwatch_bot::bot::Bot;
use carwatch_bot::config::Config;
use carwatch_bot::dispatch::notification_dispatcher::NotificationDispatcher;
use carwatch_bot::logging::setup_logging;
use carwatch_bot::render::chrome_browser::ChromeBrowser;
use carwatch_bot::repository::Repository;
use carwatch_bot::scan::ScanOrchestrator;
use carwatch_bot::service::subscription_service::SubscriptionService;
use carwatch_bot::source::sources::Sources;
use carwatch_bot::task::scan_scheduler::ScanScheduler;
use carwatch_bot::transport::telegram_transport::TelegramTransport;
use dotenv::dotenv;
use log::debug;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let init_start = Instant::now();
    let config = load_config()?;

    let repo = setup_repository(&config, init_start).await?;
    let service = Arc::new(SubscriptionService::new(repo.clone()));

    let client = teloxide::Bot::new(&config.telegram_token);
    let transport = Arc::new(TelegramTransport::new(client.clone()));

    setup_bot(client, service, init_start);
    setup_scheduler(&config, repo, transport, init_start)?;

    run(init_start).await
}

fn load_config() -> Result<Arc<Config>> {
    let mut config = Config::new();
    config.load()?;
    let config = Arc::new(config);
    setup_logging(&config)?;
    info!("Starting carwatch-bot...");
    Ok(config)
}

async fn setup_repository(config: &Config, init_start: Instant) -> Result<Arc<Repository>> {
    debug!("Setting up Repository...");
    let repo = Arc::new(Repository::new(&config.db_url, &config.db_path).await?);

    info!("Running database migrations...");
    repo.run_migrations().await?;
    info!(
        "Repository setup complete ({:.2}s).",
        init_start.elapsed().as_secs_f64()
    );

    Ok(repo)
}

fn setup_bot(client: teloxide::Bot, service: Arc<SubscriptionService>, init_start: Instant) {
    debug!("Setting up Bot...");
    let bot = Bot::new(client, service);
    bot.start();
    info!(
        "Bot setup complete ({:.2}s).",
        init_start.elapsed().as_secs_f64()
    );
}

fn setup_scheduler(
    config: &Config,
    repo: Arc<Repository>,
    transport: Arc<TelegramTransport>,
    init_start: Instant,
) -> Result<()> {
    debug!("Setting up ScanScheduler...");
    let sources = Arc::new(Sources::new(config)?);
    let browser = Arc::new(ChromeBrowser::new(&config.chrome_bin));
    let dispatcher = Arc::new(NotificationDispatcher::new(repo.clone(), transport));
    let orchestrator = Arc::new(ScanOrchestrator::new(browser, sources, repo, dispatcher));

    ScanScheduler::new(orchestrator, config.scan_interval).start()?;

    info!(
        "Scheduler setup complete ({:.2}s).",
        init_start.elapsed().as_secs_f64()
    );
    Ok(())
}

async fn run(init_start: Instant) -> Result<()> {
    info!(
        "carwatch-bot is up in {:.2}s. Press Ctrl+C to stop.",
        init_start.elapsed().as_secs_f64()
    );

    tokio::signal::ctrl_c().await?;
    info!("Ctrl+C received, shutting down.");

    Ok(())
}
