use std::sync::Arc;

use affiliate_bot::bot;
use affiliate_bot::config::Config;
use affiliate_bot::localization::init_localization;
use affiliate_bot::pipeline::Pipeline;
use anyhow::{Context, Result};
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json") {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_tracing();

    info!("Starting Affiliate Telegram Bot");

    // Fail fast before serving any update
    let config = Config::from_env().context("Failed to load configuration")?;
    init_localization().context("Failed to load localization resources")?;

    let pipeline = Arc::new(Pipeline::from_config(&config).context("Failed to build recognition client")?);
    info!(
        endpoint = %config.recognition.endpoint,
        timeout_secs = config.recognition.timeout.as_secs(),
        "Recognition client ready"
    );

    // Telegram calls and file downloads share teloxide's bounded client
    let client = teloxide::net::default_reqwest_settings()
        .build()
        .context("Failed to build Telegram client")?;
    let bot = Bot::with_client(&config.telegram_token, client);

    info!("Bot initialized, starting dispatcher");

    let handler = dptree::entry().branch(Update::filter_message().endpoint(bot::message_handler));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![pipeline])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
