//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use tracing::Level;

pub const DEFAULT_API_BASE: &str = "https://api.fireworks.ai/inference/v1";
pub const DEFAULT_VOCAB_MODEL: &str =
    "accounts/sentientfoundation/models/dobby-unhinged-llama-3-3-70b-new";
pub const DEFAULT_TEMPERATURE: f32 = 0.6;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub database_url: String,
    pub log_level: Level,
    /// Used only when no key has been stored through the settings endpoint.
    pub fireworks_api_key: Option<String>,
    pub fireworks_api_base: String,
    pub vocab_model: String,
    pub vocab_temperature: f32,
    pub cors_origin: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        // --- Server and Database Settings ---
        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://language_buddy.db?mode=rwc".to_string());
        if database_url.trim().is_empty() {
            return Err(ConfigError::MissingVar("DATABASE_URL".to_string()));
        }

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Vocabulary Generation Settings ---
        let fireworks_api_key = std::env::var("FIREWORKS_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        let fireworks_api_base =
            std::env::var("FIREWORKS_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let vocab_model =
            std::env::var("VOCAB_MODEL").unwrap_or_else(|_| DEFAULT_VOCAB_MODEL.to_string());

        let vocab_temperature = match std::env::var("VOCAB_TEMPERATURE") {
            Ok(raw) => raw.parse::<f32>().map_err(|_| {
                ConfigError::InvalidValue(
                    "VOCAB_TEMPERATURE".to_string(),
                    format!("'{}' is not a number", raw),
                )
            })?,
            Err(_) => DEFAULT_TEMPERATURE,
        };

        let cors_origin = std::env::var("CORS_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:5173".to_string());

        Ok(Self {
            bind_address,
            database_url,
            log_level,
            fireworks_api_key,
            fireworks_api_base,
            vocab_model,
            vocab_temperature,
            cors_origin,
        })
    }
}
