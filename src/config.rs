// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! A `.env` file is read first if present, for local development.

use std::env;

/// Default look-ahead for upcoming birthdays/anniversaries.
pub const DEFAULT_UPCOMING_WINDOW_DAYS: u32 = 7;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL (CORS origin, cookie security)
    pub frontend_url: String,
    /// Path of the JSON dataset loaded at startup
    pub data_path: String,
    /// Dashboard look-ahead for upcoming events, in days
    pub upcoming_window_days: u32,

    // --- Demo admin account ---
    pub admin_email: String,
    pub admin_name: String,
    pub admin_password: String,

    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:5173".to_string(),
            data_path: "data/club_dataset.json".to_string(),
            upcoming_window_days: DEFAULT_UPCOMING_WINDOW_DAYS,
            admin_email: "admin@example.com".to_string(),
            admin_name: "Admin User".to_string(),
            admin_password: "password123".to_string(),
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            port: parse_or("PORT", 8080)?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            data_path: env::var("DATA_PATH")
                .unwrap_or_else(|_| "data/club_dataset.json".to_string()),
            upcoming_window_days: parse_or("UPCOMING_WINDOW_DAYS", DEFAULT_UPCOMING_WINDOW_DAYS)?,

            admin_email: env::var("ADMIN_EMAIL")
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|_| "admin@example.com".to_string()),
            admin_name: env::var("ADMIN_NAME").unwrap_or_else(|_| "Admin User".to_string()),
            admin_password: env::var("ADMIN_PASSWORD")
                .map_err(|_| ConfigError::Missing("ADMIN_PASSWORD"))?,

            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
        })
    }

    /// Whether cookies should carry the `Secure` attribute.
    pub fn secure_cookies(&self) -> bool {
        self.frontend_url.starts_with("https://")
    }
}

fn parse_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
