//! # Vaffel After-Hours Bot Main Entry Point
//!
//! This is the main entry point for the Vaffel After-Hours Bot.
//! It initializes logging, loads configuration and the city timezone
//! table, and runs the Telegram bot.

use anyhow::Result;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod bot;
mod config;
mod services;
mod utils;

use crate::bot::handlers::BotHandler;
use crate::config::Config;
use crate::services::cities::CityTimezones;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vaffel_afterhours_bot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting Vaffel After-Hours Bot v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded - City table: {}", config.cities_file);

    // Load the city timezone table
    info!("Loading city timezone table...");
    let cities = Arc::new(CityTimezones::load(&config.cities_file)?);
    info!("City timezone table loaded - {} cities", cities.len());

    // Initialize bot
    info!("Initializing Telegram bot...");
    let bot = Bot::new(&config.telegram_bot_token);
    let handler = BotHandler::new(cities);
    info!("Telegram bot initialized successfully");

    Dispatcher::builder(bot, handler.schema())
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Application stopped");
    Ok(())
}
