use anyhow::{anyhow, Result};
use std::env;

/// Path the city table is read from (bot) or written to (builder) when
/// CITIES_FILE is not set.
pub const DEFAULT_CITIES_FILE: &str = "cities_timezones.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub cities_file: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;

        if token.trim().is_empty() {
            return Err(anyhow!("TELEGRAM_BOT_TOKEN must be set"));
        }

        let cities_file = env::var("CITIES_FILE")
            .unwrap_or_else(|_| DEFAULT_CITIES_FILE.to_string());
        let cities_file = if cities_file.trim().is_empty() {
            DEFAULT_CITIES_FILE.to_string()
        } else {
            cities_file
        };

        Ok(Config {
            telegram_bot_token: token,
            cities_file,
        })
    }
}

/// Settings for the offline `build-cities` tool.
#[derive(Debug, Clone)]
pub struct BuilderConfig {
    pub geonames_username: String,
    pub output_file: String,
}

impl BuilderConfig {
    pub fn from_env() -> Result<Self> {
        let username = env::var("GEONAMES_USERNAME")
            .map_err(|_| anyhow!("GEONAMES_USERNAME must be set"))?;

        if username.trim().is_empty() {
            return Err(anyhow!("GEONAMES_USERNAME must be set"));
        }

        let output_file = env::var("CITIES_FILE")
            .unwrap_or_else(|_| DEFAULT_CITIES_FILE.to_string());
        let output_file = if output_file.trim().is_empty() {
            DEFAULT_CITIES_FILE.to_string()
        } else {
            output_file
        };

        Ok(BuilderConfig {
            geonames_username: username,
            output_file,
        })
    }
}
