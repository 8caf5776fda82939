//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Ledger and posting configuration.
    #[serde(default)]
    pub ledger: LedgerConfig,
}

/// Ledger and posting configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Sequence code used for transaction numbers.
    #[serde(default = "default_transaction_sequence")]
    pub transaction_sequence: String,
    /// Sequence code used for ledger entry numbers.
    #[serde(default = "default_entry_sequence")]
    pub entry_sequence: String,
    /// Prefix applied to formatted transaction numbers.
    #[serde(default = "default_transaction_prefix")]
    pub transaction_prefix: String,
    /// Prefix applied to formatted ledger entry numbers.
    #[serde(default = "default_entry_prefix")]
    pub entry_prefix: String,
    /// Actor name recorded for engine-initiated activity.
    #[serde(default = "default_system_actor")]
    pub system_actor: String,
}

fn default_transaction_sequence() -> String {
    "transaction".to_string()
}

fn default_entry_sequence() -> String {
    "ledger_entry".to_string()
}

fn default_transaction_prefix() -> String {
    "TXN-".to_string()
}

fn default_entry_prefix() -> String {
    "LED-".to_string()
}

fn default_system_actor() -> String {
    "system".to_string()
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            transaction_sequence: default_transaction_sequence(),
            entry_sequence: default_entry_sequence(),
            transaction_prefix: default_transaction_prefix(),
            entry_prefix: default_entry_prefix(),
            system_actor: default_system_actor(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("KONTOR").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
