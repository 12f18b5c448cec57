//! # Vaffel After-Hours Bot
//!
//! A Telegram bot that replies to group messages arriving outside the Vaffel
//! team's working hours. The chat's timezone is inferred from a city name
//! embedded in the chat title and matched against a pre-built city table.
//!
//! ## Features
//! - City timezone resolution with fuzzy name matching and a safe fallback
//! - Working-hours classification per chat timezone (Mon-Fri, 9:00-20:00)
//! - Automatic out-of-office replies in group and supergroup chats
//! - Offline GeoNames fetcher that builds the city timezone table

/// Bot update handlers and message processing
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// City timezone resolution, working-hours classification, and the GeoNames fetcher
pub mod services;
/// Utility functions for text normalization and logging
pub mod utils;
