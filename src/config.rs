//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (optional): PostgreSQL connection string. When unset the
///   service keeps accounts in process memory.
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `TRANSFER_MODE` (optional): `compensating` (default) or `atomic`
/// - `CURRENCY` (optional): currency code stamped on new accounts, defaults to USD
/// - `SEED_DEMO_ACCOUNTS` (optional): insert the ACC001..ACC004 demo accounts on startup
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database_url: Option<String>,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default)]
    pub transfer_mode: TransferMode,

    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default)]
    pub seed_demo_accounts: bool,
}

/// How `POST /transfer` moves funds once a request has been validated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferMode {
    /// Debit, then credit, as two independent store writes. A rejected credit
    /// triggers a single compensating credit back to the sender.
    #[default]
    Compensating,

    /// Conditional debit and credit applied as one unit by the store.
    Atomic,
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable value cannot be parsed
    /// into its expected type (e.g. `TRANSFER_MODE=eventual`).
    pub fn from_env() -> Result<Self, envy::Error> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        // Field names are automatically converted: transfer_mode -> TRANSFER_MODE
        envy::from_env::<Config>()
    }
}
